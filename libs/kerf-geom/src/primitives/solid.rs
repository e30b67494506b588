//! Solid primitives, all expressed through the sweep engine.

use std::f64::consts::{FRAC_PI_2, PI};

use config::Grain;
use glam::{DVec2, DVec3};

use super::flat::{circle, circle_ring, square};
use crate::contour::{Contour, Polygon, Shape};
use crate::error::GeomError;
use crate::mesh::Mesh;
use crate::sweep::{linear_extrude, rotate_extrude, LinearExtrude, RotateExtrude};

/// An axis-aligned box of extent `size`, centred on the origin.
pub fn cube(size: DVec3) -> Result<Mesh, GeomError> {
    if !size.is_finite() || size.min_element() <= 0.0 {
        return Err(GeomError::degenerate("cube extents must be positive"));
    }
    let footprint = square(DVec2::new(size.x, size.y))?;
    let solid = linear_extrude(&footprint, &LinearExtrude::to_height(size.z))?;
    Ok(solid.translated(DVec3::new(0.0, 0.0, -size.z * 0.5)))
}

/// A sphere of `radius` centred on the origin.
///
/// Built by revolving a half-disc profile; the pole vertices land on
/// the rotation axis and weld into single points.
pub fn sphere(radius: f64, grain: Grain) -> Result<Mesh, GeomError> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeomError::degenerate("sphere radius must be positive"));
    }
    let segments = grain.segments(radius);
    let steps = (segments / 2).max(2);

    // South pole to north pole; the implicit closing edge runs back
    // down the axis and sweeps to nothing.
    let arc = (0..=steps)
        .map(|i| {
            let angle = -FRAC_PI_2 + PI * f64::from(i) / f64::from(steps);
            DVec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    let profile = Contour::from_shape(Shape::new_unchecked(
        Polygon::new_unchecked(arc),
        Vec::new(),
    ));

    let params = RotateExtrude {
        segments: Some(segments),
        ..RotateExtrude::full_turn()
    };
    rotate_extrude(&profile, &params, grain)
}

/// A cylinder of `radius` from z = 0 to z = `height`.
pub fn cylinder(radius: f64, height: f64, grain: Grain) -> Result<Mesh, GeomError> {
    linear_extrude(&circle(radius, grain)?, &LinearExtrude::to_height(height))
}

/// A truncated cone from `base_radius` at z = 0 to `top_radius` at
/// z = `height`. Either radius may be zero for a sharp apex.
pub fn cone(
    base_radius: f64,
    top_radius: f64,
    height: f64,
    grain: Grain,
) -> Result<Mesh, GeomError> {
    if !height.is_finite() || height <= 0.0 {
        return Err(GeomError::degenerate("cone height must be positive"));
    }
    if base_radius < 0.0 || top_radius < 0.0 || base_radius + top_radius <= 0.0 {
        return Err(GeomError::degenerate(
            "cone needs non-negative radii with at least one positive",
        ));
    }

    let mut points = vec![DVec2::ZERO];
    if base_radius > 0.0 {
        points.push(DVec2::new(base_radius, 0.0));
    }
    if top_radius > 0.0 {
        points.push(DVec2::new(top_radius, height));
    }
    points.push(DVec2::new(0.0, height));
    let profile = Contour::from_shape(Shape::new_unchecked(
        Polygon::new_unchecked(points),
        Vec::new(),
    ));

    let params = RotateExtrude {
        segments: Some(grain.segments(base_radius.max(top_radius))),
        ..RotateExtrude::full_turn()
    };
    rotate_extrude(&profile, &params, grain)
}

/// A torus around the z axis: tube of `minor_radius` at distance
/// `major_radius` from the axis, centred on the origin.
pub fn torus(major_radius: f64, minor_radius: f64, grain: Grain) -> Result<Mesh, GeomError> {
    if !minor_radius.is_finite() || minor_radius <= 0.0 || major_radius <= minor_radius {
        return Err(GeomError::degenerate(
            "torus needs 0 < minor radius < major radius",
        ));
    }
    let tube = circle_ring(
        DVec2::new(major_radius, 0.0),
        minor_radius,
        grain.segments(minor_radius),
    );
    let profile = Contour::from_shape(Shape::new_unchecked(tube, Vec::new()));

    let params = RotateExtrude {
        segments: Some(grain.segments(major_radius + minor_radius)),
        ..RotateExtrude::full_turn()
    };
    rotate_extrude(&profile, &params, grain)
}
