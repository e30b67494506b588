//! # Clip Backend
//!
//! 2D booleans by exact polygon clipping through `i_overlay` with the
//! even-odd fill rule. Results come back as raw ring soup; shape
//! structure is rebuilt from ring winding via
//! [`Contour::from_raw_polygons`]. Hull is Andrew's monotone chain
//! over every outer-ring vertex. The clipper is an in-process crate,
//! so calls never wait on any initialization.

use config::constants::EPSILON_TOLERANCE;
use glam::DVec2;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use kerf_geom::predicates;
use kerf_geom::{Contour, Shape};
use tracing::debug;

use crate::error::CsgError;
use crate::hull;
use crate::traits::{require_operands, ProfileBoolean};

/// The stock 2D backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipBackend;

impl ClipBackend {
    /// Creates the backend. Stateless.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProfileBoolean for ClipBackend {
    fn name(&self) -> &'static str {
        "clip"
    }

    fn union(&self, operands: &[Contour]) -> Result<Contour, CsgError> {
        debug!(operands = operands.len(), "clip union");
        fold("union", OverlayRule::Union, operands)
    }

    fn intersect(&self, operands: &[Contour]) -> Result<Contour, CsgError> {
        debug!(operands = operands.len(), "clip intersect");
        fold("intersect", OverlayRule::Intersect, operands)
    }

    fn subtract(&self, base: &Contour, tool: &Contour) -> Result<Contour, CsgError> {
        debug!("clip subtract");
        overlay(base, tool, OverlayRule::Difference)
    }

    fn hull(&self, operands: &[Contour]) -> Result<Contour, CsgError> {
        debug!(operands = operands.len(), "clip hull");
        if operands.is_empty() {
            return Err(CsgError::EmptyOperands { operation: "hull" });
        }
        let points: Vec<DVec2> = operands
            .iter()
            .flat_map(Contour::shapes)
            .flat_map(|shape| shape.outer().points())
            .copied()
            .collect();
        let outline = hull::convex_outline(&points)?;
        Ok(Contour::from_shape(Shape::new_unchecked(outline, Vec::new())))
    }
}

/// Left fold of one overlay rule across the operand list.
fn fold(
    operation: &'static str,
    rule: OverlayRule,
    operands: &[Contour],
) -> Result<Contour, CsgError> {
    let (first, rest) = require_operands(operation, operands)?;
    let mut merged = first.clone();
    for operand in rest {
        merged = overlay(&merged, operand, rule)?;
    }
    Ok(merged)
}

/// One pairwise clip. The clipper itself never sees an empty side.
fn overlay(subject: &Contour, clip: &Contour, rule: OverlayRule) -> Result<Contour, CsgError> {
    match rule {
        OverlayRule::Union if subject.is_empty() => return Ok(clip.clone()),
        OverlayRule::Union if clip.is_empty() => return Ok(subject.clone()),
        OverlayRule::Intersect if subject.is_empty() || clip.is_empty() => {
            return Ok(Contour::new_unchecked(Vec::new()));
        }
        OverlayRule::Difference if subject.is_empty() || clip.is_empty() => {
            return Ok(subject.clone());
        }
        _ => {}
    }

    let shapes = rings_of(subject).overlay(&rings_of(clip), rule, FillRule::EvenOdd);
    rebuild(shapes)
}

/// Every ring of the contour as a clipper path.
///
/// The even-odd rule makes ring direction irrelevant on input, so
/// outers and holes are passed as they are stored.
fn rings_of(contour: &Contour) -> Vec<Vec<[f64; 2]>> {
    contour
        .shapes()
        .iter()
        .flat_map(|shape| std::iter::once(shape.outer()).chain(shape.holes().iter()))
        .map(|ring| ring.points().iter().map(|p| [p.x, p.y]).collect())
        .collect()
}

/// Rebuilds a contour from clipper output.
///
/// Output groups rings per shape with the outer ring first. Each ring
/// is re-wound for its role, zero-area slivers are dropped, and the
/// flat soup goes back through the winding-based regrouping.
fn rebuild(shapes: Vec<Vec<Vec<[f64; 2]>>>) -> Result<Contour, CsgError> {
    let mut rings: Vec<Vec<DVec2>> = Vec::new();
    for shape in shapes {
        for (ring_index, ring) in shape.into_iter().enumerate() {
            let mut points: Vec<DVec2> =
                ring.into_iter().map(|[x, y]| DVec2::new(x, y)).collect();
            let area = predicates::signed_area(&points);
            if area.abs() <= EPSILON_TOLERANCE {
                continue;
            }
            let wants_ccw = ring_index == 0;
            if (area > 0.0) != wants_ccw {
                points.reverse();
            }
            rings.push(points);
        }
    }
    Ok(Contour::from_raw_polygons(rings)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64, centre: DVec2) -> Contour {
        let half = size * 0.5;
        Contour::from_points(vec![
            centre + DVec2::new(-half, -half),
            centre + DVec2::new(half, -half),
            centre + DVec2::new(half, half),
            centre + DVec2::new(-half, half),
        ])
        .unwrap()
    }

    #[test]
    fn union_merges_overlapping_squares() {
        let backend = ClipBackend::new();
        let a = square(2.0, DVec2::ZERO);
        let b = square(2.0, DVec2::new(1.0, 1.0));

        let merged = backend.union(&[a, b]).unwrap();
        assert_eq!(merged.shapes().len(), 1);
        assert_relative_eq!(merged.area(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn union_keeps_disjoint_squares_apart() {
        let backend = ClipBackend::new();
        let a = square(2.0, DVec2::ZERO);
        let b = square(2.0, DVec2::new(5.0, 0.0));

        let merged = backend.union(&[a, b]).unwrap();
        assert_eq!(merged.shapes().len(), 2);
        assert_relative_eq!(merged.area(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn subtract_cuts_a_hole() {
        let backend = ClipBackend::new();
        let plate = square(4.0, DVec2::ZERO);
        let punch = square(2.0, DVec2::ZERO);

        let washer = backend.subtract(&plate, &punch).unwrap();
        assert_eq!(washer.shapes().len(), 1);
        assert_eq!(washer.shapes()[0].holes().len(), 1);
        assert_relative_eq!(washer.area(), 12.0, epsilon = 1e-9);
        assert!(washer.contains(DVec2::new(1.5, 0.0)));
        assert!(!washer.contains(DVec2::ZERO));
    }

    #[test]
    fn subtract_can_split_the_subject() {
        let backend = ClipBackend::new();
        let bar = square(6.0, DVec2::ZERO);
        // A knife spanning the full height cuts the bar in two.
        let knife = Contour::from_points(vec![
            DVec2::new(-1.0, -4.0),
            DVec2::new(1.0, -4.0),
            DVec2::new(1.0, 4.0),
            DVec2::new(-1.0, 4.0),
        ])
        .unwrap();

        let halves = backend.subtract(&bar, &knife).unwrap();
        assert_eq!(halves.shapes().len(), 2);
        assert_relative_eq!(halves.area(), 36.0 - 12.0, epsilon = 1e-9);
    }

    #[test]
    fn intersect_keeps_only_the_overlap() {
        let backend = ClipBackend::new();
        let a = square(2.0, DVec2::ZERO);
        let b = square(2.0, DVec2::new(1.0, 1.0));

        let overlap = backend.intersect(&[a.clone(), b]).unwrap();
        assert_relative_eq!(overlap.area(), 1.0, epsilon = 1e-9);

        let apart = backend
            .intersect(&[a, square(2.0, DVec2::new(9.0, 0.0))])
            .unwrap();
        assert!(apart.is_empty());
    }

    #[test]
    fn empty_operands_short_circuit() {
        let backend = ClipBackend::new();
        let a = square(2.0, DVec2::ZERO);
        let nothing = Contour::new_unchecked(Vec::new());

        let merged = backend.union(&[a.clone(), nothing.clone()]).unwrap();
        assert_relative_eq!(merged.area(), 4.0);

        let cut = backend.subtract(&a, &nothing).unwrap();
        assert_relative_eq!(cut.area(), 4.0);

        assert_eq!(
            backend.union(&[]).map(|_| ()),
            Err(CsgError::EmptyOperands { operation: "union" })
        );
    }

    #[test]
    fn hull_spans_both_operands() {
        let backend = ClipBackend::new();
        let a = square(1.0, DVec2::new(0.5, 0.5));
        let b = square(1.0, DVec2::new(2.5, 2.5));

        let hull = backend.hull(&[a, b]).unwrap();
        assert_eq!(hull.shapes().len(), 1);
        assert_relative_eq!(hull.area(), 5.0, epsilon = 1e-9);
    }
}
