//! The 2D geometric kernel: points, segments, infinite lines, half-plane
//! tests, intersections.
//!
//! Points are plain `glm::DVec2`s (see `common.rs`); there is no dedicated
//! `Point` type beyond that alias. Every test that branches on zero routes
//! through [`Eps`], never a strict float `==`.

use crate::common::*;

/// A finite straight line bounded by two distinct (ε) points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p: DVec2,
    pub q: DVec2,
}

impl LineSegment {
    pub fn new(p: DVec2, q: DVec2) -> LineSegment {
        LineSegment { p, q }
    }

    pub fn length(&self) -> f64 {
        (self.p - self.q).norm()
    }

    pub fn midpoint(&self) -> DVec2 {
        (self.p + self.q) * 0.5
    }

    /// The point on the ray `p -> q` at distance `length` from `p`.
    pub fn point_by_length(&self, length: f64) -> DVec2 {
        let r = self.length();
        let d = self.q - self.p;
        self.p + d * (length / r)
    }

    /// Extend this segment to the infinite line through both endpoints.
    ///
    /// `A = y1 - y2`, `B = x2 - x1`, `C = -A*x1 - B*y1`. No normalization is
    /// performed.
    pub fn to_line(&self) -> Line {
        let (x1, y1) = (self.p.x, self.p.y);
        let (x2, y2) = (self.q.x, self.q.y);
        let a = y1 - y2;
        let b = x2 - x1;
        let c = -a * x1 - b * y1;
        Line { a, b, c }
    }

    /// True iff `point` lies within this segment's bounding box, ε-inclusive
    /// on each axis. The point need not lie exactly on the segment's line;
    /// use `Line::side_of_line` for that.
    pub fn contains_projection(&self, point: DVec2, eps: Eps) -> bool {
        fn between(x: f64, a: f64, b: f64, eps: Eps) -> bool {
            let (s, t) = if a <= b { (a, b) } else { (b, a) };
            (s <= x || eps.approx_eq(s, x)) && (x <= t || eps.approx_eq(x, t))
        }
        between(point.x, self.p.x, self.q.x, eps) && between(point.y, self.p.y, self.q.y, eps)
    }
}

/// The classification of a point against a `Line`: strictly positive,
/// strictly negative, or on the line (within ε).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Positive,
    Zero,
    Negative,
}

impl Side {
    pub fn as_i32(&self) -> i32 {
        match self {
            Side::Positive => 1,
            Side::Zero => 0,
            Side::Negative => -1,
        }
    }
}

/// An infinite line represented as `A*x + B*y + C = 0`.
///
/// Invariant: `(A, B) != (0, 0)` (ε). Not normalized; callers must not rely
/// on a canonical form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub fn new(a: f64, b: f64, c: f64) -> Line {
        Line { a, b, c }
    }

    /// Sign of `A*x + B*y + C`, bucketed by ε into `{-1, 0, +1}`.
    pub fn side_of_line(&self, point: DVec2) -> Side {
        self.side_of_line_eps(point, Eps::default())
    }

    pub fn side_of_line_eps(&self, point: DVec2, eps: Eps) -> Side {
        let value = self.a * point.x + self.b * point.y + self.c;
        if eps.approx_eq(value, 0.0) {
            Side::Zero
        } else if value > 0.0 {
            Side::Positive
        } else {
            Side::Negative
        }
    }

    /// True iff this line is parallel to `other`, i.e. `A1*B2 ≈ A2*B1`.
    pub fn is_parallel_to(&self, other: &Line) -> bool {
        self.is_parallel_to_eps(other, Eps::default())
    }

    pub fn is_parallel_to_eps(&self, other: &Line, eps: Eps) -> bool {
        eps.approx_eq(self.a * other.b, other.a * self.b)
    }

    /// Intersect this line with `other` via Cramer's rule. Callers must
    /// check `is_parallel_to` first; an unchecked call on parallel lines
    /// fails with `Degenerate`.
    pub fn intersection(&self, other: &Line) -> Result<DVec2, SquaringError> {
        let denom = self.a * other.b - other.a * self.b;
        if approx_eq(denom, 0.0) {
            return Err(SquaringError::Degenerate {
                reason: "line_intersection called on parallel lines".into(),
            });
        }
        let x = (self.b * other.c - other.b * self.c) / denom;
        let y = (other.a * self.c - self.a * other.c) / denom;
        Ok(DVec2::new(x, y))
    }

    /// A line perpendicular to this one passing through `point`.
    pub fn perpendicular(&self, point: DVec2) -> Line {
        let a = -self.b;
        let b = self.a;
        let c = -a * point.x - b * point.y;
        Line { a, b, c }
    }

    /// A line parallel to this one passing through `point`.
    pub fn parallel(&self, point: DVec2) -> Line {
        let a = self.a;
        let b = self.b;
        let c = -a * point.x - b * point.y;
        Line { a, b, c }
    }
}

/// Intersect an infinite `line` with a bounded `segment`. Returns `None` if
/// the line is parallel to the segment's line, or if the intersection point
/// falls outside the segment's bounding box.
pub fn line_intersects_segment(line: &Line, segment: &LineSegment) -> Option<DVec2> {
    line_intersects_segment_eps(line, segment, Eps::default())
}

pub fn line_intersects_segment_eps(line: &Line, segment: &LineSegment, eps: Eps) -> Option<DVec2> {
    let seg_line = segment.to_line();
    if line.is_parallel_to_eps(&seg_line, eps) {
        return None;
    }
    let p = line.intersection(&seg_line).ok()?;
    if segment.contains_projection(p, eps) {
        Some(p)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn segment_to_line_passes_through_both_endpoints() {
        let seg = LineSegment::new(DVec2::new(0.0, 0.0), DVec2::new(4.0, 2.0));
        let line = seg.to_line();
        assert_eq!(line.side_of_line(seg.p), Side::Zero);
        assert_eq!(line.side_of_line(seg.q), Side::Zero);
    }

    #[test]
    fn side_of_line_signs() {
        let line = LineSegment::new(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)).to_line();
        // y = 0 line: A = 0 - 0 = 0? careful, compute by hand.
        // p=(0,0), q=(1,0) => A = y1-y2 = 0, B = x2-x1 = 1, C = -A*x1-B*y1 = 0
        // line: 0*x + 1*y + 0 = 0 => y = 0
        assert_eq!(line.side_of_line(DVec2::new(5.0, 1.0)), Side::Positive);
        assert_eq!(line.side_of_line(DVec2::new(5.0, -1.0)), Side::Negative);
        assert_eq!(line.side_of_line(DVec2::new(5.0, 0.0)), Side::Zero);
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let l1 = LineSegment::new(DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0)).to_line();
        let l2 = LineSegment::new(DVec2::new(0.0, 1.0), DVec2::new(1.0, 2.0)).to_line();
        assert!(l1.is_parallel_to(&l2));
        assert!(l1.intersection(&l2).is_err());
    }

    #[test]
    fn crossing_lines_intersect_at_expected_point() {
        let l1 = LineSegment::new(DVec2::new(-1.0, -1.0), DVec2::new(1.0, 1.0)).to_line();
        let l2 = LineSegment::new(DVec2::new(-1.0, 1.0), DVec2::new(1.0, -1.0)).to_line();
        let p = l1.intersection(&l2).unwrap();
        assert!(point_eq(p, DVec2::new(0.0, 0.0)));
    }

    #[test]
    fn line_intersects_segment_respects_bounding_box() {
        let line = LineSegment::new(DVec2::new(-1.0, 0.0), DVec2::new(1.0, 0.0)).to_line();
        let seg_through = LineSegment::new(DVec2::new(0.0, -1.0), DVec2::new(0.0, 1.0));
        assert!(line_intersects_segment(&line, &seg_through).is_some());

        let seg_away = LineSegment::new(DVec2::new(5.0, -1.0), DVec2::new(5.0, 1.0));
        // parallel? no, same slope orientation but different line -> check bbox rejection
        let far_line = LineSegment::new(DVec2::new(-1.0, 10.0), DVec2::new(1.0, 10.0)).to_line();
        assert!(line_intersects_segment(&far_line, &seg_away).is_none());
    }

    #[test]
    fn perpendicular_and_parallel_through_point() {
        let line = LineSegment::new(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)).to_line();
        let p = DVec2::new(3.0, 4.0);
        let perp = line.perpendicular(p);
        assert_eq!(perp.side_of_line(p), Side::Zero);
        assert!(!perp.is_parallel_to(&line));

        let par = line.parallel(p);
        assert_eq!(par.side_of_line(p), Side::Zero);
        assert!(par.is_parallel_to(&line));
    }
}
