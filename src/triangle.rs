//! Triangle algebra: sides, angles, rigid motions, splitting by a line, and
//! the two triangle-to-right-triangle / right-triangle-to-rectangle steps of
//! the squaring pipeline.

use crate::common::*;
use crate::kernel::{LineSegment, Line, Side};
use crate::shape::Shape;

/// Three points in a fixed positional order. Invariant (checked by
/// `Triangle::new`): the three points are distinct and non-collinear, within
/// ε.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p: [DVec2; 3],
}

/// The tagged outcome of splitting a triangle by an infinite line.
/// Distinguishes the two "whole triangle on one side" cases (including the
/// tangent case, where one vertex lies exactly on the line) from a genuine
/// two-piece split.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    AllPositive(Triangle),
    AllNegative(Triangle),
    Split {
        positive: Vec<Triangle>,
        negative: Vec<Triangle>,
    },
}

impl SplitOutcome {
    /// Collapse the tagged outcome into a `(positive, negative)` Shape pair.
    pub fn into_shapes(self) -> (Shape, Shape) {
        match self {
            SplitOutcome::AllPositive(t) => (Shape::new(vec![t]), Shape::new(vec![])),
            SplitOutcome::AllNegative(t) => (Shape::new(vec![]), Shape::new(vec![t])),
            SplitOutcome::Split { positive, negative } => {
                (Shape::new(positive), Shape::new(negative))
            }
        }
    }
}

impl Triangle {
    /// Construct a triangle. Fails with `Degenerate` if the three points are
    /// collinear (within ε).
    pub fn new(a: DVec2, b: DVec2, c: DVec2) -> Result<Triangle, SquaringError> {
        let tri = Triangle { p: [a, b, c] };
        if tri.is_degenerate() {
            return Err(SquaringError::Degenerate {
                reason: "three collinear (or coincident) points do not form a triangle".into(),
            });
        }
        Ok(tri)
    }

    /// Construct without checking the non-degenerate invariant. Used
    /// internally once a caller has already established the points form a
    /// valid triangle (e.g. a sub-triangle produced by `split`).
    pub(crate) fn new_unchecked(a: DVec2, b: DVec2, c: DVec2) -> Triangle {
        Triangle { p: [a, b, c] }
    }

    fn is_degenerate(&self) -> bool {
        let ab = self.p[1] - self.p[0];
        let ac = self.p[2] - self.p[0];
        let cross = ab.x * ac.y - ab.y * ac.x;
        approx_eq(cross, 0.0)
    }

    /// The i-th side: the segment connecting the *other* two vertices (the
    /// segment opposite vertex i).
    pub fn side(&self, i: usize) -> LineSegment {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;
        LineSegment::new(self.p[j], self.p[k])
    }

    /// The interior angle at vertex `i`, via the law of cosines, with the
    /// `acos` argument ε-snapped to `[-1, 1]` to survive degenerate/near
    /// -degenerate drift.
    pub fn angle(&self, i: usize) -> f64 {
        let a = self.side(i).length();
        let b = self.side((i + 1) % 3).length();
        let c = self.side((i + 2) % 3).length();
        let mut cosine = (a * a - b * b - c * c) / (-2.0 * b * c);
        if approx_eq(cosine, -1.0) {
            cosine = -1.0;
        } else if approx_eq(cosine, 1.0) {
            cosine = 1.0;
        }
        cosine.clamp(-1.0, 1.0).acos()
    }

    /// The index of the vertex with the largest interior angle. First
    /// occurrence wins on ties.
    pub fn largest_angle(&self) -> usize {
        let mut best_idx = 0;
        let mut best_angle = 0.0;
        for i in 0..3 {
            let a = self.angle(i);
            if a > best_angle {
                best_angle = a;
                best_idx = i;
            }
        }
        best_idx
    }

    /// Clockwise rotation by `angle` radians around `pivot`.
    pub fn rotate(&self, pivot: DVec2, angle: f64) -> Triangle {
        let rotate_point = |v: DVec2| -> DVec2 {
            let d = v - pivot;
            let current_angle = d.y.atan2(d.x);
            let total_angle = current_angle - angle;
            let r = d.norm();
            DVec2::new(r * total_angle.cos(), r * total_angle.sin()) + pivot
        };
        Triangle {
            p: [
                rotate_point(self.p[0]),
                rotate_point(self.p[1]),
                rotate_point(self.p[2]),
            ],
        }
    }

    /// Componentwise translation by `v`.
    pub fn translate(&self, v: DVec2) -> Triangle {
        Triangle {
            p: [self.p[0] + v, self.p[1] + v, self.p[2] + v],
        }
    }

    /// Unsigned area via the shoelace formula.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.p;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
    }

    /// Split the triangle by an infinite `line` into a positive-side and a
    /// negative-side outcome.
    pub fn split(&self, line: &Line) -> Result<SplitOutcome, SquaringError> {
        let sides = [
            line.side_of_line(self.p[0]),
            line.side_of_line(self.p[1]),
            line.side_of_line(self.p[2]),
        ];

        // All three signs equal.
        if sides[0] == sides[1] && sides[1] == sides[2] {
            return Ok(match sides[0] {
                Side::Positive => SplitOutcome::AllPositive(*self),
                Side::Negative | Side::Zero => SplitOutcome::AllNegative(*self),
            });
        }

        let sorted_signs = {
            let mut v = [sides[0].as_i32(), sides[1].as_i32(), sides[2].as_i32()];
            v.sort_unstable();
            v
        };

        // One vertex on each of {-1, 0, +1}: split via the base segment
        // connecting the +1 and -1 vertices, sharing the 0 vertex.
        if sorted_signs == [-1, 0, 1] {
            let mut inverse: [Option<DVec2>; 3] = [None; 3];
            for i in 0..3 {
                let slot = sides[i].as_i32().rem_euclid(3) as usize;
                inverse[slot] = Some(self.p[i]);
            }
            let zero_pt = inverse[0].unwrap();
            let pos_pt = inverse[1].unwrap();
            let neg_pt = inverse[2].unwrap();
            let base = LineSegment::new(pos_pt, neg_pt);
            let basepoint = line.intersection(&base.to_line()).ok().filter(|p| {
                base.contains_projection(*p, Eps::default())
            }).ok_or_else(|| SquaringError::Degenerate {
                reason: "expected the splitting line to cross the base segment".into(),
            })?;
            let pos_tri = Triangle::new_unchecked(basepoint, zero_pt, pos_pt);
            let neg_tri = Triangle::new_unchecked(basepoint, zero_pt, neg_pt);
            return Ok(SplitOutcome::Split {
                positive: vec![pos_tri],
                negative: vec![neg_tri],
            });
        }

        // Line is "tangent": one vertex on the line, the other two strictly
        // on the same side.
        if sides.contains(&Side::Zero) {
            if sides.contains(&Side::Positive) {
                return Ok(SplitOutcome::AllPositive(*self));
            }
            if sides.contains(&Side::Negative) {
                return Ok(SplitOutcome::AllNegative(*self));
            }
        }

        // Two vertices on one side, one on the other, no zeros: the line
        // crosses two sides.
        let segs = [self.side(0), self.side(1), self.side(2)];
        let intersects: Vec<DVec2> = segs
            .iter()
            .filter_map(|s| crate::kernel::line_intersects_segment(line, s))
            .collect();
        if intersects.len() < 2 {
            return Err(SquaringError::Degenerate {
                reason: format!(
                    "expected two segment intersections for a 2-vs-1 split, found {}",
                    intersects.len()
                ),
            });
        }
        let (i0, i1) = (intersects[0], intersects[1]);

        let mut negative_pts = vec![];
        let mut positive_pts = vec![];
        for i in 0..3 {
            match sides[i] {
                Side::Positive => positive_pts.push(self.p[i]),
                Side::Negative => negative_pts.push(self.p[i]),
                Side::Zero => unreachable!("zero sides handled above"),
            }
        }

        if negative_pts.len() == 1 {
            let lone = negative_pts[0];
            let neg_tri = Triangle::new_unchecked(lone, i0, i1);
            let (other1, other2) = (positive_pts[0], positive_pts[1]);
            let pos_tri_a = Triangle::new_unchecked(other1, i0, i1);
            let pos_tri_b = Triangle::new_unchecked(other1, other2, i0);
            Ok(SplitOutcome::Split {
                positive: vec![pos_tri_a, pos_tri_b],
                negative: vec![neg_tri],
            })
        } else {
            debug_assert_eq!(positive_pts.len(), 1);
            let lone = positive_pts[0];
            let pos_tri = Triangle::new_unchecked(lone, i0, i1);
            let (other1, other2) = (negative_pts[0], negative_pts[1]);
            let neg_tri_a = Triangle::new_unchecked(other1, i0, i1);
            let neg_tri_b = Triangle::new_unchecked(other1, other2, i0);
            Ok(SplitOutcome::Split {
                positive: vec![pos_tri],
                negative: vec![neg_tri_a, neg_tri_b],
            })
        }
    }

    /// Drop an altitude from the largest-angle vertex onto the opposite side
    /// (extended to a line, then intersected with that side), producing two
    /// right-angled sub-triangles sharing the altitude.
    pub fn to_right_angle(&self) -> Result<(Triangle, Triangle), SquaringError> {
        let big = self.largest_angle();
        let others = [(big + 1) % 3, (big + 2) % 3];
        let opposite_side = self.side(big);
        let cut = opposite_side.to_line().perpendicular(self.p[big]);
        let new_point = crate::kernel::line_intersects_segment(&cut, &opposite_side).ok_or_else(
            || SquaringError::Degenerate {
                reason: "altitude from the largest-angle vertex failed to cross its opposite side".into(),
            },
        )?;
        let t1 = Triangle::new_unchecked(self.p[big], new_point, self.p[others[0]]);
        let t2 = Triangle::new_unchecked(self.p[big], new_point, self.p[others[1]]);
        Ok((t1, t2))
    }

    /// Turn a right-angled triangle into a rectangle (as a `Shape`).
    /// Precondition: `angle(largest_angle()) ≈ π/2`.
    ///
    /// Returns only the final rectangle; see [`Triangle::to_rectangle_steps`]
    /// for the pre-/post-rotation pair a frame-producing caller wants.
    pub fn to_rectangle(&self) -> Result<Shape, SquaringError> {
        Ok(self.to_rectangle_steps()?.pop().unwrap())
    }

    /// As [`Triangle::to_rectangle`], but returns both the shape just before
    /// the 180° corner rotation and the shape just after it, for a caller
    /// that wants to emit both steps.
    pub fn to_rectangle_steps(&self) -> Result<Vec<Shape>, SquaringError> {
        let right = self.largest_angle();
        if !approx_eq(self.angle(right), std::f64::consts::FRAC_PI_2) {
            return Err(SquaringError::Degenerate {
                reason: "to_rectangle requires a right-angled triangle".into(),
            });
        }
        let others = [(right + 1) % 3, (right + 2) % 3];
        let hyp = self.side(right);
        let base = self.side(others[0]);
        let height = self.side(others[1]);

        let midp = height.midpoint();
        let rect_side = base.to_line().parallel(midp);
        let other_point = crate::kernel::line_intersects_segment(&rect_side, &hyp).ok_or_else(
            || SquaringError::Degenerate {
                reason: "midline cut failed to cross the hypotenuse".into(),
            },
        )?;

        let corner = Triangle::new_unchecked(self.p[others[0]], midp, other_point);
        let t2 = Triangle::new_unchecked(self.p[right], self.p[others[1]], midp);
        let t3 = Triangle::new_unchecked(self.p[others[1]], midp, other_point);

        let pre = Shape::new(vec![corner, t2, t3]);
        let t1 = corner.rotate(other_point, std::f64::consts::PI);
        let post = Shape::new(vec![t1, t2, t3]);
        Ok(vec![pre, post])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Triangle {
        Triangle::new(DVec2::new(a.0, a.1), DVec2::new(b.0, b.1), DVec2::new(c.0, c.1)).unwrap()
    }

    #[test]
    fn collinear_points_are_rejected() {
        let r = Triangle::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn right_isoceles_angles() {
        let t = tri((0.0, 0.0), (100.0, 0.0), (0.0, 100.0));
        // vertex 0 is the right angle.
        assert!(approx_eq(t.angle(0), std::f64::consts::FRAC_PI_2));
        assert_eq!(t.largest_angle(), 0);
    }

    #[test]
    fn rotate_by_full_turn_is_identity() {
        let t = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let r = t.rotate(DVec2::new(0.0, 0.0), 2.0 * std::f64::consts::PI);
        for i in 0..3 {
            assert!(point_eq(r.p[i], t.p[i]));
        }
    }

    #[test]
    fn translate_moves_every_vertex() {
        let t = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let v = DVec2::new(2.0, 3.0);
        let moved = t.translate(v);
        for i in 0..3 {
            assert!(point_eq(moved.p[i], t.p[i] + v));
        }
    }

    #[test]
    fn split_all_on_one_side() {
        let t = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let line = LineSegment::new(DVec2::new(-5.0, 0.0), DVec2::new(-5.0, 1.0)).to_line();
        let outcome = t.split(&line).unwrap();
        match outcome {
            SplitOutcome::AllPositive(_) | SplitOutcome::AllNegative(_) => {}
            _ => panic!("expected the whole triangle on one side"),
        }
    }

    #[test]
    fn split_through_one_vertex_and_opposite_side() {
        let t = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));
        // Line through vertex (0,4) sloping down, crossing the base.
        let line = LineSegment::new(DVec2::new(0.0, 4.0), DVec2::new(2.0, 0.0)).to_line();
        let outcome = t.split(&line).unwrap();
        if let SplitOutcome::Split { positive, negative } = outcome {
            let (pos_shape, neg_shape) = (Shape::new(positive), Shape::new(negative));
            let total_area = pos_shape.area() + neg_shape.area();
            assert_approx_eq!(total_area, t.area(), 1e-6);
        } else {
            panic!("expected a two-vertex split");
        }
    }

    #[test]
    fn split_crossing_two_sides_preserves_area() {
        let t = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0));
        let line = LineSegment::new(DVec2::new(-1.0, 2.0), DVec2::new(5.0, 1.0)).to_line();
        let outcome = t.split(&line).unwrap();
        if let SplitOutcome::Split { positive, negative } = outcome {
            let (pos_shape, neg_shape) = (Shape::new(positive), Shape::new(negative));
            let total_area = pos_shape.area() + neg_shape.area();
            assert_approx_eq!(total_area, t.area(), 1e-6);
        } else {
            panic!("expected a two-side crossing split");
        }
    }

    #[test]
    fn to_right_angle_preserves_area() {
        let t = tri((0.0, 0.0), (4.0, 0.0), (1.0, 3.0));
        let (t1, t2) = t.to_right_angle().unwrap();
        assert_approx_eq!(t1.area() + t2.area(), t.area(), 1e-6);
        assert!(approx_eq(t1.angle(t1.largest_angle()), std::f64::consts::FRAC_PI_2));
        assert!(approx_eq(t2.angle(t2.largest_angle()), std::f64::consts::FRAC_PI_2));
    }

    #[test]
    fn to_rectangle_preserves_area() {
        let t = tri((0.0, 0.0), (100.0, 0.0), (0.0, 100.0));
        let shape = t.to_rectangle().unwrap();
        assert_approx_eq!(shape.area(), t.area(), 1e-3);
    }
}
