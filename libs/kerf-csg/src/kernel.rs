//! # Csgrs Backend
//!
//! Adapter over the external `csgrs` solid kernel. Meshes convert to
//! the kernel's polygon soup on the way in and fan-triangulate back
//! into welded meshes on the way out; kernel values never escape this
//! module. The enabled kernel feature set carries no hull, so `hull`
//! reports [`CsgError::Unsupported`].

use csgrs::mesh::{
    polygon::Polygon as NativePolygon, vertex::Vertex as NativeVertex, Mesh as NativeMesh,
};
use csgrs::traits::CSG;
use glam::DVec3;
use kerf_geom::{Mesh, MeshBuilder};
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::CsgError;
use crate::traits::{require_operands, SolidBoolean};

/// 3D backend delegating to the `csgrs` kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgrsBackend;

impl CsgrsBackend {
    /// Creates the backend. Stateless.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SolidBoolean for CsgrsBackend {
    fn name(&self) -> &'static str {
        "csgrs"
    }

    fn union(&self, operands: &[Mesh]) -> Result<Mesh, CsgError> {
        debug!(operands = operands.len(), "csgrs union");
        let (first, rest) = require_operands("union", operands)?;
        let mut merged = to_native(first);
        for operand in rest {
            merged = merged.union(&to_native(operand));
        }
        Ok(from_native(&merged))
    }

    fn intersect(&self, operands: &[Mesh]) -> Result<Mesh, CsgError> {
        debug!(operands = operands.len(), "csgrs intersect");
        let (first, rest) = require_operands("intersect", operands)?;
        let mut merged = to_native(first);
        for operand in rest {
            merged = merged.intersection(&to_native(operand));
        }
        Ok(from_native(&merged))
    }

    fn subtract(&self, base: &Mesh, tool: &Mesh) -> Result<Mesh, CsgError> {
        debug!("csgrs subtract");
        if tool.is_empty() {
            return Ok(base.clone());
        }
        Ok(from_native(&to_native(base).difference(&to_native(tool))))
    }

    fn hull(&self, _operands: &[Mesh]) -> Result<Mesh, CsgError> {
        Err(CsgError::Unsupported {
            backend: "csgrs",
            operation: "hull",
        })
    }
}

/// Converts to the kernel's polygon soup, one polygon per triangle
/// with a flat face normal. Degenerate triangles are skipped.
fn to_native(mesh: &Mesh) -> NativeMesh<()> {
    let vertices = mesh.vertices();
    let polygons: Vec<NativePolygon<()>> = mesh
        .faces()
        .iter()
        .filter_map(|&[a, b, c]| {
            let a = vertices[a as usize];
            let b = vertices[b as usize];
            let c = vertices[c as usize];
            let normal = (b - a).cross(c - a).try_normalize()?;
            let corner = |p: DVec3| {
                NativeVertex::new(
                    Point3::new(p.x, p.y, p.z),
                    Vector3::new(normal.x, normal.y, normal.z),
                )
            };
            Some(NativePolygon::new(
                vec![corner(a), corner(b), corner(c)],
                None,
            ))
        })
        .collect();
    NativeMesh::from_polygons(&polygons, None)
}

/// Fan-triangulates the kernel's polygons back into a welded mesh.
fn from_native(native: &NativeMesh<()>) -> Mesh {
    let mut builder = MeshBuilder::new();
    for polygon in &native.polygons {
        let ring = &polygon.vertices;
        for index in 1..ring.len().saturating_sub(1) {
            builder.add_triangle_points([
                point_of(&ring[0]),
                point_of(&ring[index]),
                point_of(&ring[index + 1]),
            ]);
        }
    }
    builder.build()
}

fn point_of(vertex: &NativeVertex) -> DVec3 {
    DVec3::new(vertex.pos.x, vertex.pos.y, vertex.pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kerf_geom::primitives;

    fn cube_at(x: f64) -> Mesh {
        primitives::cube(DVec3::splat(2.0))
            .unwrap()
            .translated(DVec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn union_merges_overlapping_cubes() {
        let backend = CsgrsBackend::new();
        let merged = backend.union(&[cube_at(0.0), cube_at(1.0)]).unwrap();
        assert_relative_eq!(merged.signed_volume(), 12.0, epsilon = 1e-6);
    }

    #[test]
    fn subtract_carves_the_overlap() {
        let backend = CsgrsBackend::new();
        let cut = backend.subtract(&cube_at(0.0), &cube_at(1.0)).unwrap();
        assert_relative_eq!(cut.signed_volume(), 4.0, epsilon = 1e-6);

        let untouched = backend.subtract(&cube_at(0.0), &Mesh::empty()).unwrap();
        assert_relative_eq!(untouched.signed_volume(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn hull_is_not_in_the_kernel_feature_set() {
        let backend = CsgrsBackend::new();
        assert_eq!(
            backend.hull(&[cube_at(0.0)]).map(|_| ()),
            Err(CsgError::Unsupported {
                backend: "csgrs",
                operation: "hull",
            })
        );
    }

    #[test]
    fn empty_operand_lists_are_rejected() {
        let backend = CsgrsBackend::new();
        assert_eq!(
            backend.intersect(&[]).map(|_| ()),
            Err(CsgError::EmptyOperands {
                operation: "intersect"
            })
        );
    }
}
