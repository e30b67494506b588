//! # Kerf Geometry
//!
//! The geometry data model of the kerf pipeline: 2D polygons, shapes and
//! contours with hole-aware triangulation; welded indexed triangle meshes;
//! frames and the parametric sweep engine; and the grain-driven primitive
//! generators.
//!
//! ## Design
//!
//! - All geometric values are immutable from the caller's perspective:
//!   every transform returns a new instance.
//! - Vertex deduplication goes through one weld map per mesh construction,
//!   so sweep walls, caps, and seams share vertices automatically.
//! - Linear algebra is `glam`'s f64 types, re-exported here so downstream
//!   crates share one vocabulary.
//!
//! ## Example
//!
//! ```
//! use config::Grain;
//! use kerf_geom::primitives::{annulus, cylinder};
//! use kerf_geom::sweep::{linear_extrude, LinearExtrude};
//!
//! let grain = Grain::default();
//! let washer = linear_extrude(
//!     &annulus(1.0, 0.5, grain)?,
//!     &LinearExtrude::to_height(0.4),
//! )?;
//! assert!(washer.face_count() > 0);
//!
//! let post = cylinder(0.25, 2.0, grain)?;
//! assert!(post.bounds().is_some());
//! # Ok::<(), kerf_geom::GeomError>(())
//! ```

pub mod contour;
pub mod error;
pub mod frame;
pub mod mesh;
pub mod predicates;
pub mod primitives;
pub mod record;
pub mod sweep;
mod triangulate;
mod weld;

pub use contour::{Contour, Polygon, Shape, Winding};
pub use error::GeomError;
pub use frame::Frame;
pub use mesh::{Mesh, MeshBuilder};
pub use record::{FaceData, MeshRecord};

pub use glam::{DMat2, DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
