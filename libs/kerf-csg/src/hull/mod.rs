//! Convex hulls for the stock backends.
//!
//! Planar hulls for the clip backend use Andrew's monotone chain,
//! spatial hulls for the BSP backend use quickhull. Both take loose
//! point clouds; the backends decide which vertices to feed in.

mod quickhull;

#[cfg(test)]
mod tests;

pub(crate) use quickhull::convex_hull;

use glam::DVec2;
use kerf_geom::predicates;
use kerf_geom::{GeomError, Polygon};

/// Convex outline of a planar point cloud, counter-clockwise.
pub(crate) fn convex_outline(points: &[DVec2]) -> Result<Polygon, GeomError> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return Err(GeomError::degenerate(
            "hull needs at least three distinct points",
        ));
    }

    // Lower chain left to right, upper chain right to left. A
    // non-left turn means the middle point is inside the hull.
    let mut lower: Vec<DVec2> = Vec::new();
    for &point in &sorted {
        while lower.len() >= 2
            && predicates::orientation(lower[lower.len() - 2], lower[lower.len() - 1], point)
                <= 0.0
        {
            lower.pop();
        }
        lower.push(point);
    }

    let mut upper: Vec<DVec2> = Vec::new();
    for &point in sorted.iter().rev() {
        while upper.len() >= 2
            && predicates::orientation(upper[upper.len() - 2], upper[upper.len() - 1], point)
                <= 0.0
        {
            upper.pop();
        }
        upper.push(point);
    }

    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    if lower.len() < 3 {
        return Err(GeomError::degenerate("hull points are collinear"));
    }
    Ok(Polygon::new_unchecked(lower))
}
