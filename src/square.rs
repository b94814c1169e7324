//! Rectangle/square transforms: `squish_rectangle` (reduce an elongated
//! rectangle's aspect ratio below 2 via repeated cut-and-180°-rotate),
//! `rectangle_to_square` (turn an aspect-≤2 rectangle into a square via a
//! two-cut, two-translate construction), and `merge_squares` (combine two
//! squares into one of equal total area).

use crate::common::*;
use crate::kernel::LineSegment;
use crate::shape::Shape;

/// Reduce `shape` (a rectangle, as a convex-hull-of-4 `Shape`) to an
/// equal-area rectangle whose height is at most twice its width, by
/// repeatedly cutting the long side at its midpoint and rotating one half by
/// 180° about the hull vertex the two halves share.
///
/// Returns only the final rectangle; see [`squish_rectangle_steps`] for the
/// per-iteration frames.
pub fn squish_rectangle(shape: &Shape) -> Result<Shape, SquaringError> {
    Ok(squish_rectangle_steps(shape)?.pop().unwrap_or_else(|| shape.clone()))
}

/// As [`squish_rectangle`], but returns one `Shape` per recombination step
/// (empty if `shape` already has aspect ≤ 2). The last entry is the final
/// result.
pub fn squish_rectangle_steps(shape: &Shape) -> Result<Vec<Shape>, SquaringError> {
    let mut steps = vec![];
    let mut current = shape.clone();
    loop {
        let width = current.width()?;
        let height = current.height()?;
        if height.length() <= 2.0 * width.length() {
            break;
        }
        log::debug!(
            "squishing rectangle: height {} > 2 * width {}",
            height.length(),
            width.length()
        );
        let midp = height.midpoint();
        let cut = height.to_line().perpendicular(midp);
        let (rec1, rec2) = current.split(&cut)?;
        let h1 = rec1.convex_hull();
        let h2 = rec2.convex_hull();
        let common = h1
            .iter()
            .find_map(|p| h2.iter().find(|q| point_eq(*p, **q)).copied())
            .ok_or_else(|| SquaringError::Degenerate {
                reason: "squish_rectangle cut produced halves with no shared hull vertex".into(),
            })?;
        let rec1 = rec1.rotate(common, std::f64::consts::PI);
        current = Shape::new(
            rec1.triangles
                .into_iter()
                .chain(rec2.triangles.into_iter())
                .collect(),
        );
        steps.push(current.clone());
    }
    Ok(steps)
}

/// Turn a rectangle into a square of equal area.
///
/// Returns only the final square; see [`rectangle_to_square_steps`] for the
/// per-translation frames.
pub fn rectangle_to_square(shape: &Shape) -> Result<Shape, SquaringError> {
    Ok(rectangle_to_square_steps(shape)?.pop().unwrap())
}

/// As [`rectangle_to_square`]: squish first, then two cuts (one through the
/// rectangle's diagonal-ish corner, one perpendicular to the long side) peel
/// off two right triangles that slide into place. Returns the shape after
/// translating the first triangle, then after translating the second.
pub fn rectangle_to_square_steps(shape: &Shape) -> Result<Vec<Shape>, SquaringError> {
    let squished = squish_rectangle(shape)?;
    let hull = squished.convex_hull();
    if hull.len() != 4 {
        return Err(SquaringError::Degenerate {
            reason: format!(
                "rectangle_to_square requires a 4-point hull, found {}",
                hull.len()
            ),
        });
    }
    let (mut a, mut b, mut c, mut d) = (hull[0], hull[1], hull[2], hull[3]);
    let s1_len = LineSegment::new(a, b).length();
    let s2_len = LineSegment::new(b, c).length();
    if approx_eq(s1_len, s2_len) {
        return Ok(vec![squished]);
    }
    if s1_len < s2_len {
        // Relabel so that a-b (s1) is the long side.
        let (na, nb, nc, nd) = (b, c, d, a);
        a = na;
        b = nb;
        c = nc;
        d = nd;
    }
    let s1 = LineSegment::new(a, b);
    let s2 = LineSegment::new(b, c);
    let revs4 = LineSegment::new(a, d);
    debug_assert!(s1.length() > s2.length());

    let square_side = (s1.length() * s2.length()).sqrt();
    let corner1 = s1.point_by_length(square_side);
    let corner2 = revs4.point_by_length(square_side);

    let cut1 = LineSegment::new(b, corner2).to_line();
    let (r1, r2) = squished.split(&cut1)?;
    let (triangle, rest) = match (r1.convex_hull().len(), r2.convex_hull().len()) {
        (3, _) => (r1, r2),
        (_, 3) => (r2, r1),
        _ => {
            return Err(SquaringError::BadCut {
                reason: "rectangle_to_square's first cut left neither half a triangle".into(),
            })
        }
    };

    let cut2 = s1.to_line().perpendicular(corner1);
    let (r1, r2) = rest.split(&cut2)?;
    let (other_triangle, rest) = match (r1.convex_hull().len(), r2.convex_hull().len()) {
        (3, _) => (r1, r2),
        (_, 3) => (r2, r1),
        _ => {
            return Err(SquaringError::BadCut {
                reason: "rectangle_to_square's second cut left neither half a triangle".into(),
            })
        }
    };

    let anchor = *triangle
        .convex_hull()
        .iter()
        .find(|p| !point_eq(**p, b) && !point_eq(**p, c))
        .ok_or_else(|| SquaringError::Degenerate {
            reason: "the cut-off corner triangle has no vertex distinct from b and c".into(),
        })?;

    let triangle = triangle.translate(corner2 - anchor);
    let after_first = Shape::new(
        rest.triangles
            .iter()
            .cloned()
            .chain(triangle.triangles.iter().cloned())
            .chain(other_triangle.triangles.iter().cloned())
            .collect(),
    );

    let other_triangle = other_triangle.translate(anchor - b);
    let after_second = Shape::new(
        rest.triangles
            .into_iter()
            .chain(triangle.triangles.into_iter())
            .chain(other_triangle.triangles.into_iter())
            .collect(),
    );

    Ok(vec![after_first, after_second])
}

/// Combine two squares into a single square of equal total area.
///
/// Orientates both squares, places the smaller beside the larger sharing a
/// baseline corner, then runs two cuts that each peel off a corner triangle
/// and rotate it into place. Returns one frame per cut-and-rotate step.
/// Assumes `orientate` lands both hulls in bottom-left-first order.
pub fn merge_squares(s1: &Shape, s2: &Shape) -> Result<Vec<Shape>, SquaringError> {
    let o1 = s1.orientate()?;
    let o2 = s2.orientate()?;
    let side1 = o1.width()?.length();
    let side2 = o2.width()?.length();
    let (big, small) = if side1 >= side2 { (o1, o2) } else { (o2, o1) };
    let big_side = big.width()?.length();
    let small_side = small.width()?.length();

    let corner = |shape: &Shape, pick_x: fn(f64, f64) -> bool, pick_y: fn(f64, f64) -> bool| -> DVec2 {
        let hull = shape.convex_hull();
        let x = hull.iter().fold(hull[0].x, |acc, p| if pick_x(p.x, acc) { p.x } else { acc });
        *hull
            .iter()
            .filter(|p| approx_eq(p.x, x))
            .fold(&hull[0], |acc, p| if pick_y(p.y, acc.y) { p } else { acc })
    };
    fn lt(a: f64, b: f64) -> bool {
        a < b
    }
    fn gt(a: f64, b: f64) -> bool {
        a > b
    }

    let a1 = corner(&big, lt, lt); // big's bottom-left.
    let small_bottom_left = corner(&small, lt, lt);
    let target = corner(&big, gt, lt); // big's bottom-right: where small attaches.
    let small = small.translate(target - small_bottom_left);

    let c2 = corner(&small, gt, gt); // small's top-right, after translation.

    log::debug!("merging squares: big side {big_side}, small side {small_side}");

    let combined = Shape::new(
        big.triangles
            .iter()
            .cloned()
            .chain(small.triangles.iter().cloned())
            .collect(),
    );

    let p1 = a1 + DVec2::new(small_side, 0.0);
    let cut1 = LineSegment::new(p1, c2).to_line();
    let (r1, r2) = combined.split(&cut1)?;
    let (triangle1, rest1) = match (r1.convex_hull().len(), r2.convex_hull().len()) {
        (3, _) => (r1, r2),
        (_, 3) => (r2, r1),
        _ => {
            return Err(SquaringError::BadCut {
                reason: "merge_squares' first cut left neither half a triangle".into(),
            })
        }
    };
    let triangle1 = triangle1.rotate(a1, std::f64::consts::FRAC_PI_2);
    let after_first = Shape::new(
        rest1
            .triangles
            .iter()
            .cloned()
            .chain(triangle1.triangles.iter().cloned())
            .collect(),
    );

    let c1 = corner(&big, gt, gt); // big's top-right.
    let p2 = c1 - DVec2::new(small_side, 0.0);
    let cut2 = LineSegment::new(p2, a1).to_line();
    let (r1, r2) = after_first.split(&cut2)?;
    let (triangle2, rest2) = match (r1.convex_hull().len(), r2.convex_hull().len()) {
        (3, _) => (r1, r2),
        (_, 3) => (r2, r1),
        _ => {
            return Err(SquaringError::BadCut {
                reason: "merge_squares' second cut left neither half a triangle".into(),
            })
        }
    };
    let triangle2 = triangle2.rotate(c2, 3.0 * std::f64::consts::FRAC_PI_2);
    let after_second = Shape::new(
        rest2
            .triangles
            .into_iter()
            .chain(triangle2.triangles.into_iter())
            .collect(),
    );

    Ok(vec![after_first, after_second])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::triangle::Triangle;
    use assert_approx_eq::assert_approx_eq;

    fn rect(w: f64, h: f64) -> Shape {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(w, 0.0);
        let c = DVec2::new(w, h);
        let d = DVec2::new(0.0, h);
        Shape::new(vec![
            Triangle::new(a, b, c).unwrap(),
            Triangle::new(a, c, d).unwrap(),
        ])
    }

    #[test]
    fn squish_rectangle_reduces_aspect_below_two() {
        let r = rect(2.0, 32.0);
        let squished = squish_rectangle(&r).unwrap();
        let w = squished.width().unwrap().length();
        let h = squished.height().unwrap().length();
        assert!(h <= 2.0 * w + 1e-6);
    }

    #[test]
    fn squish_rectangle_preserves_area() {
        let r = rect(2.0, 32.0);
        let squished = squish_rectangle(&r).unwrap();
        assert_approx_eq!(squished.area(), r.area(), 1e-3);
    }

    #[test]
    fn squish_rectangle_is_noop_under_aspect_two() {
        let r = rect(10.0, 15.0);
        assert!(squish_rectangle_steps(&r).unwrap().is_empty());
    }

    #[test]
    fn rectangle_to_square_preserves_area_and_produces_a_square() {
        let r = rect(4.0, 16.0);
        let squared = rectangle_to_square(&r).unwrap();
        assert_approx_eq!(squared.area(), r.area(), 1e-3);
        let hull = squared.convex_hull();
        assert_eq!(hull.len(), 4);
        let s1 = LineSegment::new(hull[0], hull[1]).length();
        let s2 = LineSegment::new(hull[1], hull[2]).length();
        assert_approx_eq!(s1, s2, 1e-3);
    }

    #[test]
    fn rectangle_to_square_is_noop_on_an_already_square_rectangle() {
        let r = rect(10.0, 10.0);
        let squared = rectangle_to_square(&r).unwrap();
        assert_approx_eq!(squared.area(), r.area());
    }

    #[test]
    fn merge_squares_preserves_total_area() {
        let big = rect(10.0, 10.0);
        let small = rect(4.0, 4.0);
        let frames = merge_squares(&big, &small).unwrap();
        let last = frames.last().unwrap();
        assert_approx_eq!(last.area(), big.area() + small.area(), 1e-3);
    }

    #[test]
    fn merge_squares_of_equal_squares_preserves_area() {
        let a = rect(6.0, 6.0);
        let b = rect(6.0, 6.0);
        let frames = merge_squares(&a, &b).unwrap();
        let last = frames.last().unwrap();
        assert_approx_eq!(last.area(), a.area() + b.area(), 1e-3);
    }
}
