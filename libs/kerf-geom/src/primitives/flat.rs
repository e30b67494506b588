//! Flat primitives: circles, squares, regular polygons, annuli.

use std::f64::consts::TAU;

use config::Grain;
use glam::DVec2;

use crate::contour::{Contour, Polygon, Shape};
use crate::error::GeomError;

/// Counter-clockwise ring of `segments` points on a circle.
pub(crate) fn circle_ring(centre: DVec2, radius: f64, segments: u32) -> Polygon {
    let points = (0..segments)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(segments);
            centre + DVec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    Polygon::new_unchecked(points)
}

/// A circle of `radius` about the origin, tessellated per the grain.
pub fn circle(radius: f64, grain: Grain) -> Result<Contour, GeomError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeomError::degenerate("circle radius must be positive"));
    }
    let ring = circle_ring(DVec2::ZERO, radius, grain.segments(radius));
    Ok(Contour::from_shape(Shape::new_unchecked(ring, Vec::new())))
}

/// An axis-aligned rectangle of extent `size`, centred on the origin.
pub fn square(size: DVec2) -> Result<Contour, GeomError> {
    if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
        return Err(GeomError::degenerate("square extents must be positive"));
    }
    let half = size * 0.5;
    Contour::from_points(vec![
        DVec2::new(-half.x, -half.y),
        DVec2::new(half.x, -half.y),
        DVec2::new(half.x, half.y),
        DVec2::new(-half.x, half.y),
    ])
}

/// A regular polygon with `sides` vertices on a circle of `radius`.
pub fn ngon(sides: u32, radius: f64) -> Result<Contour, GeomError> {
    if sides < 3 {
        return Err(GeomError::TooFewVertices {
            count: sides as usize,
        });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeomError::degenerate("polygon radius must be positive"));
    }
    let ring = circle_ring(DVec2::ZERO, radius, sides);
    Ok(Contour::from_shape(Shape::new_unchecked(ring, Vec::new())))
}

/// A circular ring: a circle of `outer` radius with a concentric hole
/// of `inner` radius.
pub fn annulus(outer: f64, inner: f64, grain: Grain) -> Result<Contour, GeomError> {
    if !outer.is_finite() || !inner.is_finite() || inner <= 0.0 || outer <= inner {
        return Err(GeomError::degenerate(
            "annulus needs 0 < inner radius < outer radius",
        ));
    }
    let shape = Shape::new_unchecked(
        circle_ring(DVec2::ZERO, outer, grain.segments(outer)),
        vec![circle_ring(DVec2::ZERO, inner, grain.segments(inner))],
    );
    Ok(Contour::from_shape(shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn circle_area_approaches_pi_r_squared() {
        let grain = Grain::new(0.05).unwrap();
        let contour = circle(2.0, grain).unwrap();
        let exact = PI * 4.0;

        assert!(contour.area() < exact);
        assert!(contour.area() > exact * 0.99);
        assert!(circle(0.0, grain).is_err());
    }

    #[test]
    fn coarse_grain_still_gets_a_triangle() {
        let grain = Grain::new(100.0).unwrap();
        let contour = circle(1.0, grain).unwrap();
        assert_eq!(contour.shapes()[0].outer().points().len(), 3);
    }

    #[test]
    fn square_is_centred() {
        let contour = square(DVec2::new(2.0, 4.0)).unwrap();
        let (min, max) = contour.bounds().unwrap();
        assert_eq!(min, DVec2::new(-1.0, -2.0));
        assert_eq!(max, DVec2::new(1.0, 2.0));
        assert_relative_eq!(contour.area(), 8.0);
    }

    #[test]
    fn ngon_has_exactly_the_requested_sides() {
        let contour = ngon(6, 1.0).unwrap();
        assert_eq!(contour.shapes()[0].outer().points().len(), 6);
        assert!(ngon(2, 1.0).is_err());
    }

    #[test]
    fn annulus_subtracts_its_hole() {
        let grain = Grain::new(0.01).unwrap();
        let contour = annulus(1.0, 0.5, grain).unwrap();
        let exact = PI * (1.0 - 0.25);

        assert_eq!(contour.shapes()[0].holes().len(), 1);
        assert_relative_eq!(contour.area(), exact, epsilon = exact * 0.01);
        assert!(contour.contains(DVec2::new(0.75, 0.0)));
        assert!(!contour.contains(DVec2::ZERO));

        assert!(annulus(1.0, 1.5, grain).is_err());
    }
}
