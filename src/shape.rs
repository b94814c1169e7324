//! `Shape`: an ordered collection of triangles treated as a set-union over
//! the plane, plus the convex hull / height / width / orientate operations
//! built on top of it.

use crate::common::*;
use crate::kernel::{Line, LineSegment};
use crate::triangle::Triangle;

/// An ordered collection of triangles. No non-overlap invariant is enforced
/// by the type; non-overlap is a precondition of every operation here.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub triangles: Vec<Triangle>,
}

impl Shape {
    pub fn new(triangles: Vec<Triangle>) -> Shape {
        Shape { triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Split every triangle independently by `line`, unioning the positive
    /// parts and the negative parts.
    pub fn split(&self, line: &Line) -> Result<(Shape, Shape), SquaringError> {
        let mut positive = vec![];
        let mut negative = vec![];
        for t in &self.triangles {
            let (pos, neg) = t.split(line)?.into_shapes();
            positive.extend(pos.triangles);
            negative.extend(neg.triangles);
        }
        Ok((Shape::new(positive), Shape::new(negative)))
    }

    pub fn translate(&self, v: DVec2) -> Shape {
        Shape::new(self.triangles.iter().map(|t| t.translate(v)).collect())
    }

    pub fn rotate(&self, pivot: DVec2, angle: f64) -> Shape {
        Shape::new(self.triangles.iter().map(|t| t.rotate(pivot, angle)).collect())
    }

    /// De-duplicated (ε) concatenation of every triangle's vertices.
    pub fn vertices(&self) -> Vec<DVec2> {
        let mut out: Vec<DVec2> = vec![];
        for t in &self.triangles {
            for p in t.p {
                if !out.iter().any(|q| point_eq(*q, p)) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// The convex hull of this shape's vertices, via a Graham scan. `O(V log
    /// V)`.
    ///
    /// (1) pick the vertex with minimum x, tie-broken by minimum y;
    /// (2) sort the rest by polar angle about that anchor, nearer-first on
    ///     ε-collinear ties;
    /// (3) scan, popping while the last three points do not turn clockwise.
    pub fn convex_hull(&self) -> Vec<DVec2> {
        let verts = self.vertices();
        if verts.is_empty() {
            return vec![];
        }
        if verts.len() <= 2 {
            return verts;
        }

        let anchor_idx = (0..verts.len())
            .min_by(|&i, &j| point_order(verts[i], verts[j]))
            .unwrap();
        let anchor = verts[anchor_idx];
        let mut rest: Vec<DVec2> = verts
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != anchor_idx)
            .map(|(_, &p)| p)
            .collect();
        rest.sort_by(|&a, &b| clockwise_and_dist(anchor, a, b));

        let mut hull: Vec<DVec2> = vec![anchor, rest[0]];
        for &p in &rest[1..] {
            while hull.len() >= 2 && clockwise_from(hull[hull.len() - 2], hull[hull.len() - 1], p) >= 0 {
                hull.pop();
            }
            hull.push(p);
        }
        hull
    }

    /// Rotate this shape so the first edge of its convex hull is
    /// axis-aligned. Used as the first step of `merge_squares`.
    pub fn orientate(&self) -> Result<Shape, SquaringError> {
        let hull = self.convex_hull();
        if hull.len() < 2 {
            return Err(SquaringError::Degenerate {
                reason: "orientate requires a hull with at least two vertices".into(),
            });
        }
        let d = hull[0] - hull[1];
        Ok(self.rotate(hull[1], d.y.atan2(d.x)))
    }

    /// From a 4-point convex hull `[a, b, c, d]`: the longer of `ab`, `bc` is
    /// the height.
    pub fn height(&self) -> Result<LineSegment, SquaringError> {
        let (s1, s2) = self.hull_edges()?;
        Ok(if s1.length() < s2.length() { s2 } else { s1 })
    }

    /// From a 4-point convex hull `[a, b, c, d]`: the shorter of `ab`, `bc`
    /// is the width.
    pub fn width(&self) -> Result<LineSegment, SquaringError> {
        let (s1, s2) = self.hull_edges()?;
        Ok(if s1.length() < s2.length() { s1 } else { s2 })
    }

    fn hull_edges(&self) -> Result<(LineSegment, LineSegment), SquaringError> {
        let hull = self.convex_hull();
        if hull.len() != 4 {
            return Err(SquaringError::Degenerate {
                reason: format!(
                    "height/width require a 4-point rectangle hull, found {} points",
                    hull.len()
                ),
            });
        }
        Ok((
            LineSegment::new(hull[0], hull[1]),
            LineSegment::new(hull[1], hull[2]),
        ))
    }
}

/// Tie-break comparator for picking the Graham scan anchor: minimum x, then
/// minimum y.
fn point_order(a: DVec2, b: DVec2) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    if approx_eq(a.x, b.x) {
        if approx_eq(a.y, b.y) {
            Ordering::Equal
        } else if a.y < b.y {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else if a.x < b.x {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Returns > 0 if `p1` is clockwise of `p2` as seen from `p0`, < 0 if
/// counter-clockwise, 0 if collinear (within ε).
fn clockwise_from(p0: DVec2, p1: DVec2, p2: DVec2) -> i32 {
    let d1 = p1 - p0;
    let d2 = p2 - p0;
    let cross = d1.x * d2.y - d2.x * d1.y;
    if approx_eq(cross, 0.0) {
        0
    } else if cross < 0.0 {
        -1
    } else {
        1
    }
}

/// Graham-scan sort comparator about anchor `p0`: orders by the
/// `clockwise_from` sign, breaking collinear ties by nearer-first.
fn clockwise_and_dist(p0: DVec2, p1: DVec2, p2: DVec2) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let c = clockwise_from(p0, p1, p2);
    if c == 0 {
        let d1 = LineSegment::new(p0, p1).length();
        let d2 = LineSegment::new(p0, p2).length();
        if approx_eq(d1, d2) {
            Ordering::Equal
        } else if d1 < d2 {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    } else if c < 0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}
