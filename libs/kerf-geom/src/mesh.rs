//! # Meshes
//!
//! Deduplicated indexed triangle meshes. Construction always runs
//! through a [`MeshBuilder`], whose weld map merges vertices that land
//! on the same epsilon grid cell and drops faces that collapse onto a
//! repeated vertex. Transforms return new meshes and flip face order
//! under mirroring so outward normals survive.

use crate::error::GeomError;
use crate::weld::WeldMap;
use glam::{DMat4, DQuat, DVec3};

/// An indexed triangle mesh with welded vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// A mesh with no vertices and no faces.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a mesh from a triangle soup, welding shared corners.
    #[must_use]
    pub fn from_triangles(triangles: &[[DVec3; 3]]) -> Self {
        let mut builder = MeshBuilder::new();
        for triangle in triangles {
            builder.add_triangle_points(*triangle);
        }
        builder.build()
    }

    /// Builds a mesh from an index list over a vertex list.
    ///
    /// Face indices are bounds-checked, then the vertices are re-welded
    /// so duplicate entries in `vertices` collapse to one index.
    pub fn from_indexed(vertices: &[DVec3], faces: &[[u32; 3]]) -> Result<Self, GeomError> {
        let count = vertices.len();
        let mut builder = MeshBuilder::new();
        for face in faces {
            for index in face {
                if *index as usize >= count {
                    return Err(GeomError::IndexOutOfBounds {
                        index: *index,
                        count,
                    });
                }
            }
            builder.add_triangle_points([
                vertices[face[0] as usize],
                vertices[face[1] as usize],
                vertices[face[2] as usize],
            ]);
        }
        Ok(builder.build())
    }

    /// The welded vertex list.
    #[must_use]
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// The triangular faces as vertex index triples.
    #[must_use]
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Number of welded vertices.
    #[must_use]
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangular faces.
    #[must_use]
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no faces.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The mesh moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: DVec3) -> Self {
        self.transformed(&DMat4::from_translation(offset))
    }

    /// The mesh scaled per axis about the origin.
    ///
    /// Mirroring scales (an odd number of negative factors) reverse
    /// every face so normals keep pointing outward.
    #[must_use]
    pub fn scaled(&self, factor: DVec3) -> Self {
        self.transformed(&DMat4::from_scale(factor))
    }

    /// The mesh rotated about the origin.
    #[must_use]
    pub fn rotated(&self, rotation: DQuat) -> Self {
        self.transformed(&DMat4::from_quat(rotation))
    }

    /// The mesh mapped through an affine transform.
    #[must_use]
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|vertex| matrix.transform_point3(*vertex))
            .collect();
        let faces = if matrix.determinant() < 0.0 {
            self.faces.iter().map(|[a, b, c]| [*a, *c, *b]).collect()
        } else {
            self.faces.clone()
        };
        Self { vertices, faces }
    }

    /// Axis-aligned bounding box as `(min, max)`, `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for vertex in &self.vertices {
            min = min.min(*vertex);
            max = max.max(*vertex);
        }
        Some((min, max))
    }

    /// Signed enclosed volume by the divergence theorem.
    ///
    /// Positive for closed meshes with outward-facing normals. Open
    /// meshes give a meaningless value.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut sum = 0.0;
        for [a, b, c] in &self.faces {
            let a = self.vertices[*a as usize];
            let b = self.vertices[*b as usize];
            let c = self.vertices[*c as usize];
            sum += a.dot(b.cross(c));
        }
        sum / 6.0
    }

    /// Checks index bounds and face degeneracy.
    ///
    /// Meshes built by [`MeshBuilder`] always pass; this is for data
    /// arriving from interchange records or external backends.
    pub fn validate(&self) -> Result<(), GeomError> {
        let count = self.vertices.len();
        for (face_index, [a, b, c]) in self.faces.iter().enumerate() {
            for index in [a, b, c] {
                if *index as usize >= count {
                    return Err(GeomError::IndexOutOfBounds {
                        index: *index,
                        count,
                    });
                }
            }
            if a == b || b == c || a == c {
                return Err(GeomError::degenerate(format!(
                    "face {face_index} repeats a vertex"
                )));
            }
        }
        Ok(())
    }
}

/// Accumulates welded vertices and faces into a [`Mesh`].
///
/// One builder per construction; the weld map dies with it.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
    weld: WeldMap,
}

impl MeshBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Welds `point` and returns its vertex index.
    pub fn add_vertex(&mut self, point: DVec3) -> u32 {
        self.weld.index_for(point, &mut self.vertices)
    }

    /// Adds a face by vertex indices.
    ///
    /// Faces with a repeated index enclose no area and are dropped.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        if a == b || b == c || a == c {
            return;
        }
        self.faces.push([a, b, c]);
    }

    /// Welds three corners and adds the face they span.
    pub fn add_triangle_points(&mut self, points: [DVec3; 3]) {
        let a = self.add_vertex(points[0]);
        let b = self.add_vertex(points[1]);
        let c = self.add_vertex(points[2]);
        self.add_triangle(a, b, c);
    }

    /// Finishes construction.
    #[must_use]
    pub fn build(self) -> Mesh {
        Mesh {
            vertices: self.vertices,
            faces: self.faces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_3;

    /// Unit cube spanning `[0, 1]^3` as an outward-wound triangle soup.
    fn cube_soup() -> Vec<[DVec3; 3]> {
        let p = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
        let (p000, p100, p010, p110) = (
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 1.0, 0.0),
        );
        let (p001, p101, p011, p111) = (
            p(0.0, 0.0, 1.0),
            p(1.0, 0.0, 1.0),
            p(0.0, 1.0, 1.0),
            p(1.0, 1.0, 1.0),
        );
        vec![
            [p000, p010, p110],
            [p000, p110, p100],
            [p001, p101, p111],
            [p001, p111, p011],
            [p000, p100, p101],
            [p000, p101, p001],
            [p010, p011, p111],
            [p010, p111, p110],
            [p000, p001, p011],
            [p000, p011, p010],
            [p100, p110, p111],
            [p100, p111, p101],
        ]
    }

    #[test]
    fn soup_with_shared_corners_welds() {
        let a = DVec3::ZERO;
        let b = DVec3::X;
        let c = DVec3::Y;
        let d = DVec3::new(1.0, 1.0, 0.0);
        let mesh = Mesh::from_triangles(&[[a, b, c], [b, d, c]]);

        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert!(mesh.vertex_count() < 3 * mesh.face_count());
    }

    #[test]
    fn degenerate_faces_are_dropped() {
        let a = DVec3::ZERO;
        let b = DVec3::X;
        let mesh = Mesh::from_triangles(&[[a, b, b], [a, b, a + DVec3::Y]]);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn indexed_construction_checks_bounds() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let result = Mesh::from_indexed(&vertices, &[[0, 1, 7]]);
        assert_eq!(result, Err(GeomError::IndexOutOfBounds { index: 7, count: 3 }));
    }

    #[test]
    fn indexed_construction_re_welds_duplicates() {
        // The same corner appears twice in the vertex list.
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::X];
        let mesh = Mesh::from_indexed(&vertices, &[[0, 1, 2], [2, 3, 0]]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn cube_volume_is_exact() {
        let cube = Mesh::from_triangles(&cube_soup());
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 12);
        assert_relative_eq!(cube.signed_volume(), 1.0);
        cube.validate().unwrap();
    }

    #[test]
    fn translation_moves_every_vertex_exactly() {
        let cube = Mesh::from_triangles(&cube_soup());
        let offset = DVec3::new(3.0, -2.0, 0.5);
        let moved = cube.translated(offset);

        for (before, after) in cube.vertices().iter().zip(moved.vertices()) {
            assert_eq!(*after, *before + offset);
        }
        assert_eq!(moved.faces(), cube.faces());
    }

    #[test]
    fn mirror_scale_keeps_normals_outward() {
        let cube = Mesh::from_triangles(&cube_soup());
        let mirrored = cube.scaled(DVec3::new(-1.0, 1.0, 1.0));

        // Face order flips under mirroring, so volume stays positive.
        assert_relative_eq!(mirrored.signed_volume(), 1.0);

        let doubled = cube.scaled(DVec3::new(2.0, 1.0, 1.0));
        assert_relative_eq!(doubled.signed_volume(), 2.0);
        assert_eq!(doubled.faces(), cube.faces());
    }

    #[test]
    fn rotation_preserves_volume() {
        let cube = Mesh::from_triangles(&cube_soup());
        let rotation = DQuat::from_axis_angle(DVec3::new(1.0, 1.0, 0.0).normalize(), FRAC_PI_3);
        assert_relative_eq!(cube.rotated(rotation).signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bounds_track_the_extremes() {
        let cube = Mesh::from_triangles(&cube_soup());
        let (min, max) = cube.bounds().unwrap();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::ONE);

        assert_eq!(Mesh::empty().bounds(), None);
    }
}
