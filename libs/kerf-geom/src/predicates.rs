//! # Planar Predicates
//!
//! Point/polygon and segment/segment queries used by contour validation
//! and by the clipping layer. Orientation tests go through the adaptive
//! exact predicates in the `robust` crate, so sign decisions never flip
//! from floating point noise; distance style tolerances use
//! [`EPSILON_TOLERANCE`](config::constants::EPSILON_TOLERANCE).

use config::constants::EPSILON_TOLERANCE;
use glam::DVec2;
use robust::{orient2d, Coord};

/// How boundary points are classified by [`point_in_polygon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// A point on the boundary counts as inside.
    Inside,
    /// A point on the boundary counts as outside.
    Outside,
}

#[inline]
fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Exact sign of the triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of the directed line `a -> b`,
/// negative to the right, zero when collinear.
#[inline]
pub fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(coord(a), coord(b), coord(c))
}

/// Signed area of a closed polygon by the shoelace formula.
///
/// Positive for counter-clockwise rings, negative for clockwise ones.
/// Rings with fewer than three vertices have zero area.
///
/// ```
/// use glam::DVec2;
/// use kerf_geom::predicates::signed_area;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// assert_eq!(signed_area(&square), 1.0);
///
/// let reversed: Vec<_> = square.iter().rev().copied().collect();
/// assert_eq!(signed_area(&reversed), -1.0);
/// ```
pub fn signed_area(points: &[DVec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        doubled += a.x * b.y - b.x * a.y;
    }
    doubled * 0.5
}

/// Whether `point` lies on the segment `a -> b`, within tolerance.
pub fn point_on_segment(point: DVec2, a: DVec2, b: DVec2) -> bool {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared < EPSILON_TOLERANCE * EPSILON_TOLERANCE {
        return point.distance(a) <= EPSILON_TOLERANCE;
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(a + ab * t) <= EPSILON_TOLERANCE
}

/// Even-odd point containment test against a closed polygon.
///
/// `boundary` selects whether points sitting exactly on an edge count as
/// inside or outside.
///
/// ```
/// use glam::DVec2;
/// use kerf_geom::predicates::{point_in_polygon, Boundary};
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(2.0, 0.0),
///     DVec2::new(2.0, 2.0),
///     DVec2::new(0.0, 2.0),
/// ];
/// assert!(point_in_polygon(DVec2::new(1.0, 1.0), &square, Boundary::Outside));
/// assert!(!point_in_polygon(DVec2::new(3.0, 1.0), &square, Boundary::Inside));
///
/// let on_edge = DVec2::new(2.0, 1.0);
/// assert!(point_in_polygon(on_edge, &square, Boundary::Inside));
/// assert!(!point_in_polygon(on_edge, &square, Boundary::Outside));
/// ```
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2], boundary: Boundary) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        if point_on_segment(point, *a, b) {
            return boundary == Boundary::Inside;
        }
    }

    // Even-odd ray cast towards +x with a half-open edge rule.
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x = b.x + (point.y - b.y) / (a.y - b.y) * (a.x - b.x);
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether the closed segments `a1 -> a2` and `b1 -> b2` intersect.
///
/// Touching endpoints and collinear overlap both count as intersection.
pub fn segments_intersect(a1: DVec2, a2: DVec2, b1: DVec2, b2: DVec2) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_bounds(a1, b1, b2))
        || (d2 == 0.0 && within_bounds(a2, b1, b2))
        || (d3 == 0.0 && within_bounds(b1, a1, a2))
        || (d4 == 0.0 && within_bounds(b2, a1, a2))
}

/// Whether `p`, known collinear with `a -> b`, lies within its bounding box.
fn within_bounds(p: DVec2, a: DVec2, b: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Whether any edge of ring `a` crosses or touches any edge of ring `b`.
pub fn edges_intersect(a: &[DVec2], b: &[DVec2]) -> bool {
    for (i, a1) in a.iter().enumerate() {
        let a2 = a[(i + 1) % a.len()];
        for (j, b1) in b.iter().enumerate() {
            let b2 = b[(j + 1) % b.len()];
            if segments_intersect(*a1, a2, *b1, b2) {
                return true;
            }
        }
    }
    false
}

/// Whether the closed regions bounded by two polygons intersect at all.
///
/// True when any edges cross or touch, or when either polygon contains
/// the other outright.
pub fn polygons_intersect(a: &[DVec2], b: &[DVec2]) -> bool {
    if edges_intersect(a, b) {
        return true;
    }
    // No edge contact: containment is all or nothing, so one probe
    // point per polygon decides it.
    a.first()
        .is_some_and(|p| point_in_polygon(*p, b, Boundary::Outside))
        || b.first()
            .is_some_and(|p| point_in_polygon(*p, a, Boundary::Outside))
}

/// Whether every pair of polygons is disjoint.
///
/// Quadratic in the number of polygons. Validation of user input runs
/// through here; hot paths that already know their rings are disjoint
/// use the `_unchecked` constructors instead.
pub fn polygons_distinct(polygons: &[&[DVec2]]) -> bool {
    for (i, a) in polygons.iter().enumerate() {
        for b in polygons.iter().skip(i + 1) {
            if polygons_intersect(a, b) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn shoelace_matches_known_areas() {
        assert_relative_eq!(signed_area(&unit_square()), 1.0);

        let triangle = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(0.0, 3.0),
        ];
        assert_relative_eq!(signed_area(&triangle), 6.0);
        assert_eq!(signed_area(&triangle[..2]), 0.0);
    }

    #[test]
    fn containment_respects_the_boundary_flag() {
        let square = unit_square();
        let centre = DVec2::new(0.5, 0.5);
        assert!(point_in_polygon(centre, &square, Boundary::Outside));

        let corner = DVec2::new(1.0, 1.0);
        assert!(point_in_polygon(corner, &square, Boundary::Inside));
        assert!(!point_in_polygon(corner, &square, Boundary::Outside));

        let outside = DVec2::new(1.5, 0.5);
        assert!(!point_in_polygon(outside, &square, Boundary::Inside));
    }

    #[test]
    fn crossing_and_touching_segments_intersect() {
        let a1 = DVec2::new(0.0, 0.0);
        let a2 = DVec2::new(2.0, 2.0);
        let b1 = DVec2::new(0.0, 2.0);
        let b2 = DVec2::new(2.0, 0.0);
        assert!(segments_intersect(a1, a2, b1, b2));

        // Shared endpoint only.
        assert!(segments_intersect(
            a1,
            a2,
            DVec2::new(2.0, 2.0),
            DVec2::new(3.0, 0.0),
        ));

        // Parallel and apart.
        assert!(!segments_intersect(
            a1,
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(2.0, 1.0),
        ));
    }

    #[test]
    fn nested_polygons_count_as_intersecting() {
        let outer = unit_square();
        let inner = [
            DVec2::new(0.25, 0.25),
            DVec2::new(0.75, 0.25),
            DVec2::new(0.75, 0.75),
            DVec2::new(0.25, 0.75),
        ];
        assert!(polygons_intersect(&outer, &inner));
        assert!(polygons_intersect(&inner, &outer));
    }

    #[test]
    fn distinct_polygons_have_no_contact() {
        let a = unit_square();
        let b: Vec<_> = a.iter().map(|p| *p + DVec2::new(2.0, 0.0)).collect();
        let c: Vec<_> = a.iter().map(|p| *p + DVec2::new(0.5, 0.0)).collect();

        assert!(polygons_distinct(&[&a, &b]));
        assert!(!polygons_distinct(&[&a, &b, &c]));
        assert!(polygons_distinct(&[]));
    }
}
