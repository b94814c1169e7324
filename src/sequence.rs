//! The frame sequencer: fan-triangulation, then the four-pass pipeline
//! (right-angle, rectangle, square, merge) that turns a polygon into a
//! square, exposed as a lazy, cached, pull-based [`FrameSequence`].
//!
//! The pipeline is driven by an explicit [`SequencerState`] machine, one
//! frame per `advance()` call, rather than a generator or coroutine.

use crate::common::*;
use crate::square::{merge_squares, rectangle_to_square_steps, squish_rectangle_steps};
use crate::triangle::Triangle;
use crate::shape::Shape;

/// An immutable snapshot of the piece collection at one step of the
/// pipeline. By convention the active (most recently transformed) piece's
/// triangles are appended last.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub triangles: Vec<Triangle>,
}

impl Frame {
    pub fn new(triangles: Vec<Triangle>) -> Frame {
        Frame { triangles }
    }

    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }
}

/// Fan-triangulate a polygon from its first vertex: `(p0, pi, pi+1)` for
/// `i in 1..n-1`.
///
/// Precondition (unchecked): the polygon is simple and star-shaped from
/// `p0`. A convex polygon satisfies this trivially. No validation is
/// performed; a non-star-shaped input silently produces overlapping
/// triangles rather than failing.
fn triangulate(polygon: &[DVec2]) -> Result<Vec<Triangle>, SquaringError> {
    if polygon.len() < 3 {
        return Err(SquaringError::Degenerate {
            reason: format!("a polygon needs at least 3 vertices, got {}", polygon.len()),
        });
    }
    let p0 = polygon[0];
    (1..polygon.len() - 1)
        .map(|i| Triangle::new(p0, polygon[i], polygon[i + 1]))
        .collect()
}

/// The pipeline's explicit state machine. Each [`Sequencer::advance`] call
/// produces exactly one more frame, never more.
enum SequencerState {
    Triangulate(Vec<DVec2>),
    RightAngle {
        pending: Vec<Triangle>,
        done: Vec<Triangle>,
    },
    Rectangle {
        pending: Vec<Triangle>,
        current: Vec<Shape>,
        done: Vec<Shape>,
    },
    Square {
        pending: Vec<Shape>,
        current: Vec<Shape>,
        done: Vec<Shape>,
    },
    Merge {
        pending: Vec<Shape>,
        current: Vec<Shape>,
    },
    Exhausted,
}

struct Sequencer {
    state: SequencerState,
}

fn flatten_triangles(shapes: &[Shape]) -> Vec<Triangle> {
    shapes.iter().flat_map(|s| s.triangles.iter().cloned()).collect()
}

impl Sequencer {
    fn new(polygon: Vec<DVec2>) -> Sequencer {
        Sequencer {
            state: SequencerState::Triangulate(polygon),
        }
    }

    /// Advance the state machine by exactly one frame, or `None` once the
    /// pipeline is exhausted.
    fn advance(&mut self) -> Option<Result<Frame, SquaringError>> {
        loop {
            match &mut self.state {
                SequencerState::Triangulate(polygon) => {
                    let triangles = match triangulate(polygon) {
                        Ok(t) => t,
                        Err(e) => {
                            self.state = SequencerState::Exhausted;
                            return Some(Err(e));
                        }
                    };
                    log::debug!("triangulated polygon into {} triangles", triangles.len());
                    let frame = Frame::new(triangles.clone());
                    self.state = SequencerState::RightAngle {
                        pending: triangles,
                        done: vec![],
                    };
                    return Some(Ok(frame));
                }

                SequencerState::RightAngle { pending, done } => {
                    if let Some(t) = pending.pop() {
                        match t.to_right_angle() {
                            Ok((t1, t2)) => {
                                done.push(t1);
                                done.push(t2);
                                let mut triangles = done.clone();
                                triangles.extend(pending.iter().cloned());
                                return Some(Ok(Frame::new(triangles)));
                            }
                            Err(e) => {
                                self.state = SequencerState::Exhausted;
                                return Some(Err(e));
                            }
                        }
                    } else {
                        log::debug!("entering rectangle pass");
                        let done = std::mem::take(done);
                        self.state = SequencerState::Rectangle {
                            pending: done,
                            current: vec![],
                            done: vec![],
                        };
                        continue;
                    }
                }

                SequencerState::Rectangle { pending, current, done } => {
                    if !current.is_empty() {
                        let step = current.remove(0);
                        let mut triangles = flatten_triangles(done);
                        triangles.extend(step.triangles.clone());
                        triangles.extend(pending.iter().cloned());
                        if current.is_empty() {
                            done.push(step);
                        }
                        return Some(Ok(Frame::new(triangles)));
                    }
                    if let Some(t) = pending.pop() {
                        match t.to_rectangle_steps() {
                            Ok(steps) => {
                                *current = steps;
                                continue;
                            }
                            Err(e) => {
                                self.state = SequencerState::Exhausted;
                                return Some(Err(e));
                            }
                        }
                    } else {
                        log::debug!("entering square pass");
                        let done = std::mem::take(done);
                        self.state = SequencerState::Square {
                            pending: done,
                            current: vec![],
                            done: vec![],
                        };
                        continue;
                    }
                }

                SequencerState::Square { pending, current, done } => {
                    if !current.is_empty() {
                        let step = current.remove(0);
                        let mut triangles = flatten_triangles(done);
                        triangles.extend(step.triangles.clone());
                        triangles.extend(flatten_triangles(pending));
                        if current.is_empty() {
                            done.push(step);
                        }
                        return Some(Ok(Frame::new(triangles)));
                    }
                    if let Some(rect) = pending.pop() {
                        let mut steps = match squish_rectangle_steps(&rect) {
                            Ok(s) => s,
                            Err(e) => {
                                self.state = SequencerState::Exhausted;
                                return Some(Err(e));
                            }
                        };
                        let squished = steps.last().cloned().unwrap_or_else(|| rect.clone());
                        match rectangle_to_square_steps(&squished) {
                            Ok(square_steps) => {
                                steps.extend(square_steps);
                                *current = steps;
                                continue;
                            }
                            Err(e) => {
                                self.state = SequencerState::Exhausted;
                                return Some(Err(e));
                            }
                        }
                    } else {
                        log::debug!("entering merge pass");
                        let done = std::mem::take(done);
                        self.state = SequencerState::Merge {
                            pending: done,
                            current: vec![],
                        };
                        continue;
                    }
                }

                SequencerState::Merge { pending, current } => {
                    if !current.is_empty() {
                        let step = current.remove(0);
                        let is_last = current.is_empty();
                        let piece = if is_last {
                            let hull = step.convex_hull();
                            let anchor = hull.first().copied().unwrap_or(DVec2::new(0.0, 0.0));
                            step.translate(DVec2::new(50.0 - anchor.x, 50.0 - anchor.y))
                        } else {
                            step
                        };
                        let mut triangles = flatten_triangles(pending);
                        triangles.extend(piece.triangles.clone());
                        if is_last {
                            pending.push(piece);
                        }
                        return Some(Ok(Frame::new(triangles)));
                    }
                    if pending.len() > 1 {
                        let r = pending.pop().unwrap();
                        let s = pending.pop().unwrap();
                        match merge_squares(&s, &r) {
                            Ok(steps) => {
                                *current = steps;
                                continue;
                            }
                            Err(e) => {
                                self.state = SequencerState::Exhausted;
                                return Some(Err(e));
                            }
                        }
                    } else {
                        self.state = SequencerState::Exhausted;
                        return None;
                    }
                }

                SequencerState::Exhausted => return None,
            }
        }
    }
}

/// A pull-based, cached, 0-indexed sequence of [`Frame`]s. `get(i)` forces
/// production of frames `0..=i` and never more; frames already produced are
/// never recomputed.
pub struct FrameSequence {
    sequencer: Sequencer,
    cache: Vec<Frame>,
    error: Option<SquaringError>,
}

impl FrameSequence {
    fn new(polygon: Vec<DVec2>) -> FrameSequence {
        FrameSequence {
            sequencer: Sequencer::new(polygon),
            cache: vec![],
            error: None,
        }
    }

    /// Return frame `i`, extending the cache as needed.
    pub fn get(&mut self, i: usize) -> Result<Frame, SquaringError> {
        while self.cache.len() <= i {
            if let Some(e) = &self.error {
                return Err(e.clone());
            }
            match self.sequencer.advance() {
                Some(Ok(frame)) => self.cache.push(frame),
                Some(Err(e)) => {
                    self.error = Some(e.clone());
                    return Err(e);
                }
                None => {
                    return Err(SquaringError::OutOfBounds {
                        requested: i,
                        available: self.cache.len(),
                    });
                }
            }
        }
        Ok(self.cache[i].clone())
    }
}

/// Build the lazy frame sequence that dissects `polygon` into a square of
/// equal area.
pub fn build_frames(polygon: Vec<DVec2>) -> FrameSequence {
    FrameSequence::new(polygon)
}
