//! Ear-clipping triangulation of shapes, backed by `earcutr`.

use crate::contour::{Shape, Winding};
use crate::error::GeomError;
use crate::predicates;
use glam::DVec2;

/// Triangulates one shape, holes included, into a 2D triangle soup.
///
/// The outer ring is flattened first, then each hole, with the hole
/// start offsets handed to the ear clipper. Output triangles are
/// flipped as needed to honor the requested winding.
pub(crate) fn earclip(shape: &Shape, winding: Winding) -> Result<Vec<[DVec2; 3]>, GeomError> {
    let vertex_count =
        shape.outer().points().len() + shape.holes().iter().map(|h| h.points().len()).sum::<usize>();

    let mut coords: Vec<f64> = Vec::with_capacity(vertex_count * 2);
    let mut flat: Vec<DVec2> = Vec::with_capacity(vertex_count);
    let mut hole_indices: Vec<usize> = Vec::with_capacity(shape.holes().len());

    for point in shape.outer().points() {
        coords.push(point.x);
        coords.push(point.y);
        flat.push(*point);
    }
    for hole in shape.holes() {
        hole_indices.push(flat.len());
        for point in hole.points() {
            coords.push(point.x);
            coords.push(point.y);
            flat.push(*point);
        }
    }

    let indices = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|error| GeomError::triangulation(format!("ear clipping failed: {error:?}")))?;

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for triple in indices.chunks_exact(3) {
        let mut triangle = [flat[triple[0]], flat[triple[1]], flat[triple[2]]];
        let ccw = predicates::orientation(triangle[0], triangle[1], triangle[2]) > 0.0;
        if ccw != (winding == Winding::Ccw) {
            triangle.swap(1, 2);
        }
        triangles.push(triangle);
    }
    Ok(triangles)
}
