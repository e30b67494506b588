//! # Sweep Engine
//!
//! Extrudes a 2D contour along a parametric path of [`Frame`]s into a
//! welded mesh. One engine serves every extrusion in the crate: linear
//! extrusion, rotational sweeps, and free-form paths with a profile
//! that may itself vary along the way.
//!
//! ## How walls are built
//!
//! Each path sample projects every profile ring into 3D through its
//! frame and welds the result, giving one index ring per polygon.
//! Consecutive samples are stitched with two triangles per ring edge,
//! wound so that counter-clockwise outer rings swept along the frame
//! normal face outward. Caps triangulate the first section clockwise
//! and the last counter-clockwise, through the same weld map, so cap
//! corners fuse with wall corners. A full-turn rotational sweep needs
//! no special seam handling: the final ring quantizes onto the first
//! ring's grid cells and welds automatically.

use std::borrow::Cow;
use std::f64::consts::TAU;

use config::constants::{EPSILON_TOLERANCE, PATH_LENGTH_PROBES};
use config::Grain;
use glam::DVec3;
use tracing::debug;

use crate::contour::{Contour, Winding};
use crate::error::GeomError;
use crate::frame::Frame;
use crate::mesh::{Mesh, MeshBuilder};

/// The cross-section swept along the path.
pub enum Profile<'a> {
    /// One contour reused at every sample.
    Constant(&'a Contour),
    /// A contour recomputed per path parameter. Ring topology must not
    /// change between samples.
    Varying(&'a dyn Fn(f64) -> Contour),
}

impl Profile<'_> {
    fn at(&self, t: f64) -> Cow<'_, Contour> {
        match self {
            Profile::Constant(contour) => Cow::Borrowed(*contour),
            Profile::Varying(section) => Cow::Owned(section(t)),
        }
    }
}

/// How many path samples a sweep takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sampling {
    /// Exactly this many samples.
    Fixed(u32),
    /// Derived from the path length of the frame origins and the given
    /// grain.
    Adaptive(Grain),
}

/// Knobs for [`sweep`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions {
    /// Sample count strategy.
    pub sampling: Sampling,
    /// Path parameter range, start to end.
    pub range: (f64, f64),
    /// Whether to close the ends with triangulated caps.
    pub caps: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            sampling: Sampling::Adaptive(Grain::default()),
            range: (0.0, 1.0),
            caps: true,
        }
    }
}

/// Sweeps `profile` along `path` into a welded mesh.
///
/// Fails with [`GeomError::TooFewSamples`] when sampling resolves to
/// fewer than two samples and with [`GeomError::RingMismatch`] when a
/// varying profile changes its ring count or a ring's vertex count
/// between samples.
pub fn sweep<P>(path: P, profile: Profile<'_>, options: &SweepOptions) -> Result<Mesh, GeomError>
where
    P: Fn(f64) -> Frame,
{
    let samples = match options.sampling {
        Sampling::Fixed(count) => count,
        Sampling::Adaptive(grain) => grain.samples(probe_path_length(&path, options.range)),
    };
    if samples < 2 {
        return Err(GeomError::TooFewSamples {
            count: samples as usize,
        });
    }

    let (start, end) = options.range;
    let step = (end - start) / f64::from(samples - 1);
    debug!(samples, caps = options.caps, "sweeping profile");

    let mut builder = MeshBuilder::new();
    let mut previous: Option<Vec<Vec<u32>>> = None;
    for index in 0..samples {
        // Land exactly on the range end so closed paths close.
        let t = if index + 1 == samples {
            end
        } else {
            start + step * f64::from(index)
        };
        let frame = path(t);
        let section = profile.at(t);
        let rings = project_rings(&mut builder, &frame, &section);
        if let Some(previous) = &previous {
            check_topology(previous, &rings, index)?;
            emit_walls(&mut builder, previous, &rings);
        }
        previous = Some(rings);
    }

    if options.caps {
        emit_cap(&mut builder, &path(start), &profile.at(start), Winding::Cw)?;
        emit_cap(&mut builder, &path(end), &profile.at(end), Winding::Ccw)?;
    }
    Ok(builder.build())
}

/// Chord-length estimate of the path's origin trajectory.
fn probe_path_length<P>(path: &P, (start, end): (f64, f64)) -> f64
where
    P: Fn(f64) -> Frame,
{
    let mut length = 0.0;
    let mut previous = path(start).origin;
    for probe in 1..=PATH_LENGTH_PROBES {
        let t = start + (end - start) * probe as f64 / PATH_LENGTH_PROBES as f64;
        let origin = path(t).origin;
        length += previous.distance(origin);
        previous = origin;
    }
    length
}

/// Projects every ring of `section` through `frame`, welding vertices.
///
/// Rings come out in a stable order, outer then holes per shape, which
/// is what makes cross-sample topology comparable by position.
fn project_rings(builder: &mut MeshBuilder, frame: &Frame, section: &Contour) -> Vec<Vec<u32>> {
    let mut rings = Vec::new();
    for shape in section.shapes() {
        for polygon in std::iter::once(shape.outer()).chain(shape.holes().iter()) {
            rings.push(
                polygon
                    .points()
                    .iter()
                    .map(|point| builder.add_vertex(frame.project(*point)))
                    .collect(),
            );
        }
    }
    rings
}

fn check_topology(
    previous: &[Vec<u32>],
    current: &[Vec<u32>],
    sample: u32,
) -> Result<(), GeomError> {
    if previous.len() != current.len() {
        return Err(GeomError::ring_mismatch(format!(
            "sample {sample} has {} rings, previous sample had {}",
            current.len(),
            previous.len(),
        )));
    }
    for (ring, (before, after)) in previous.iter().zip(current).enumerate() {
        if before.len() != after.len() {
            return Err(GeomError::ring_mismatch(format!(
                "ring {ring} has {} vertices at sample {sample}, {} before",
                after.len(),
                before.len(),
            )));
        }
    }
    Ok(())
}

/// Two wall triangles per ring edge between consecutive samples.
fn emit_walls(builder: &mut MeshBuilder, previous: &[Vec<u32>], current: &[Vec<u32>]) {
    for (previous_ring, current_ring) in previous.iter().zip(current) {
        let len = previous_ring.len();
        for i in 0..len {
            let j = (i + 1) % len;
            let (prev_left, prev_right) = (previous_ring[i], previous_ring[j]);
            let (next_left, next_right) = (current_ring[i], current_ring[j]);
            builder.add_triangle(next_left, prev_right, next_right);
            builder.add_triangle(prev_left, prev_right, next_left);
        }
    }
}

fn emit_cap(
    builder: &mut MeshBuilder,
    frame: &Frame,
    section: &Contour,
    winding: Winding,
) -> Result<(), GeomError> {
    for triangle in section.triangulate(winding)? {
        builder.add_triangle_points([
            frame.project(triangle[0]),
            frame.project(triangle[1]),
            frame.project(triangle[2]),
        ]);
    }
    Ok(())
}

/// Parameters for [`linear_extrude`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearExtrude {
    /// Extrusion height along z. Negative extrudes downward.
    pub height: f64,
    /// Number of sections along the height, at least two.
    pub samples: u32,
    /// Whether to close top and bottom.
    pub caps: bool,
}

impl LinearExtrude {
    /// A plain capped extrusion to `height` with two sections.
    #[must_use]
    pub fn to_height(height: f64) -> Self {
        Self {
            height,
            samples: 2,
            caps: true,
        }
    }
}

/// Extrudes a contour straight along the z axis.
pub fn linear_extrude(profile: &Contour, params: &LinearExtrude) -> Result<Mesh, GeomError> {
    if !params.height.is_finite() || params.height == 0.0 {
        return Err(GeomError::degenerate("extrusion height must be nonzero"));
    }
    let height = params.height.abs();
    let options = SweepOptions {
        sampling: Sampling::Fixed(params.samples),
        range: (0.0, 1.0),
        caps: params.caps,
    };
    let mesh = sweep(
        |t| Frame::at_height(t * height),
        Profile::Constant(profile),
        &options,
    )?;
    if params.height < 0.0 {
        Ok(mesh.translated(DVec3::new(0.0, 0.0, params.height)))
    } else {
        Ok(mesh)
    }
}

/// Parameters for [`rotate_extrude`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateExtrude {
    /// Swept angle in radians, clamped to one full turn either way.
    pub angle: f64,
    /// Explicit segment count; `None` derives it from the grain and the
    /// profile's outermost radius.
    pub segments: Option<u32>,
}

impl RotateExtrude {
    /// A full revolution.
    #[must_use]
    pub fn full_turn() -> Self {
        Self {
            angle: TAU,
            segments: None,
        }
    }

    /// A partial revolution of `angle` radians.
    #[must_use]
    pub fn sector(angle: f64) -> Self {
        Self {
            angle,
            segments: None,
        }
    }
}

/// Revolves a contour around the z axis.
///
/// The profile's x coordinates become radii and must not be negative;
/// y becomes height. A full turn closes on itself through the weld map
/// and gets no caps; a partial sector is capped on both swept ends.
pub fn rotate_extrude(
    profile: &Contour,
    params: &RotateExtrude,
    grain: Grain,
) -> Result<Mesh, GeomError> {
    let angle = params.angle.clamp(-TAU, TAU);
    if angle.abs() <= EPSILON_TOLERANCE {
        return Err(GeomError::degenerate("rotation angle must be nonzero"));
    }
    for shape in profile.shapes() {
        for polygon in std::iter::once(shape.outer()).chain(shape.holes().iter()) {
            if polygon.points().iter().any(|p| p.x < -EPSILON_TOLERANCE) {
                return Err(GeomError::degenerate(
                    "rotational sweep profile must stay on x >= 0",
                ));
            }
        }
    }

    let radius = profile.bounds().map_or(0.0, |(_, max)| max.x);
    let full = (angle.abs() - TAU).abs() <= EPSILON_TOLERANCE;
    let segments = params.segments.unwrap_or_else(|| {
        let whole_turn = grain.segments(radius);
        ((f64::from(whole_turn) * angle.abs() / TAU).ceil() as u32).max(1)
    });

    // Walking the sector from its far end back to zero keeps the frame
    // normal aligned with the direction of travel, which is what the
    // wall winding assumes.
    let turn = move |t: f64| {
        if angle >= 0.0 {
            angle * (1.0 - t)
        } else {
            angle * t
        }
    };
    let path = move |t: f64| {
        let swept = turn(t);
        Frame::new(
            DVec3::ZERO,
            DVec3::new(swept.cos(), swept.sin(), 0.0),
            DVec3::Z,
        )
    };
    let options = SweepOptions {
        sampling: Sampling::Fixed(segments + 1),
        range: (0.0, 1.0),
        caps: !full,
    };
    sweep(path, Profile::Constant(profile), &options)
}
