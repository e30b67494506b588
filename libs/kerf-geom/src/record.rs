//! # Mesh Interchange Record
//!
//! The raw-data boundary between the kernel and external file adapters
//! (STL, OBJ and friends live outside this crate). A record carries
//! faces either as inline corner triples or as index triples over a
//! vertex list; both forms weld on the way in, so adapters never have
//! to deduplicate themselves.

use crate::error::GeomError;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Face payload of a [`MeshRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FaceData {
    /// Inline triangle corners; no vertex list required.
    Triples(Vec<[[f64; 3]; 3]>),
    /// Index triples into the record's vertex list.
    Indexed(Vec<[u32; 3]>),
}

/// Raw mesh data as produced and consumed by file adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRecord {
    /// Triangles, inline or indexed.
    pub faces: FaceData,
    /// Vertex list backing indexed faces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<[f64; 3]>>,
}

impl MeshRecord {
    /// Snapshots a mesh into indexed form.
    #[must_use]
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            faces: FaceData::Indexed(mesh.faces().to_vec()),
            vertices: Some(mesh.vertices().iter().map(|v| v.to_array()).collect()),
        }
    }

    /// Builds a welded mesh from the record.
    ///
    /// Indexed faces without a vertex list are rejected; inline triples
    /// ignore any vertex list that happens to be present.
    pub fn to_mesh(&self) -> Result<Mesh, GeomError> {
        match &self.faces {
            FaceData::Triples(triples) => {
                let triangles: Vec<[glam::DVec3; 3]> = triples
                    .iter()
                    .map(|[a, b, c]| {
                        [
                            glam::DVec3::from_array(*a),
                            glam::DVec3::from_array(*b),
                            glam::DVec3::from_array(*c),
                        ]
                    })
                    .collect();
                Ok(Mesh::from_triangles(&triangles))
            }
            FaceData::Indexed(faces) => {
                let vertices = self.vertices.as_ref().ok_or_else(|| {
                    GeomError::invalid_record("indexed faces need a vertex list")
                })?;
                let vertices: Vec<glam::DVec3> =
                    vertices.iter().map(|v| glam::DVec3::from_array(*v)).collect();
                Mesh::from_indexed(&vertices, faces)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;

    /// Unit tetrahedron with outward winding, volume 1/6.
    fn tetrahedron() -> Mesh {
        let o = DVec3::ZERO;
        let a = DVec3::X;
        let b = DVec3::Y;
        let c = DVec3::Z;
        Mesh::from_triangles(&[[o, b, a], [o, a, c], [o, c, b], [a, b, c]])
    }

    #[test]
    fn mesh_round_trips_through_indexed_form() {
        let solid = tetrahedron();
        let record = MeshRecord::from_mesh(&solid);
        let back = record.to_mesh().unwrap();

        assert_eq!(back.vertex_count(), solid.vertex_count());
        assert_eq!(back.face_count(), solid.face_count());
        assert_relative_eq!(back.signed_volume(), 1.0 / 6.0);
    }

    #[test]
    fn inline_triples_weld_on_the_way_in() {
        let record = MeshRecord {
            faces: FaceData::Triples(vec![
                [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            ]),
            vertices: None,
        };
        let mesh = record.to_mesh().unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn indexed_faces_require_vertices() {
        let record = MeshRecord {
            faces: FaceData::Indexed(vec![[0, 1, 2]]),
            vertices: None,
        };
        assert!(matches!(
            record.to_mesh(),
            Err(GeomError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn both_face_forms_deserialize() {
        let indexed: MeshRecord = serde_json::from_str(
            r#"{ "faces": [[0, 1, 2]], "vertices": [[0,0,0], [1,0,0], [0,1,0]] }"#,
        )
        .unwrap();
        assert!(matches!(indexed.faces, FaceData::Indexed(_)));
        assert_eq!(indexed.to_mesh().unwrap().face_count(), 1);

        let inline: MeshRecord =
            serde_json::from_str(r#"{ "faces": [[[0,0,0], [1,0,0], [0,1,0]]] }"#).unwrap();
        assert!(matches!(inline.faces, FaceData::Triples(_)));
        assert_eq!(inline.vertices, None);

        let text = serde_json::to_string(&inline).unwrap();
        assert!(!text.contains("vertices"));
    }
}
