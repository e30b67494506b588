//! # Kerf DSL
//!
//! The expression surface of the kerf kernel: an infix language for
//! composing meshes and contours, built on the generic parser in
//! `kerf-expr`.
//!
//! ## Architecture
//!
//! ```text
//! kerf-expr (grammar builder, parser, template cache)
//!      |
//! kerf-dsl (vector algebra + composition grammars)   <-- this crate
//!      |
//! kerf-geom (transforms) + kerf-csg (boolean backends)
//! ```
//!
//! Two grammars share the parser core. The vector algebra grammar is a
//! process-wide singleton behind [`vecexpr!`]; the composition grammar is
//! owned by a [`ModelDsl`], which binds the boolean operators `|`, `&`
//! and `-` to an injected [`kerf_csg::Backends`] registry. The
//! [`Generator`] contract wraps a build function and a parameter schema
//! for external tooling.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use glam::DVec3;
//! use kerf_csg::Backends;
//! use kerf_dsl::{model, ModelDsl, ModelValue};
//! use kerf_geom::primitives::cube;
//!
//! let dsl = ModelDsl::new(Arc::new(Backends::standard()));
//! let block = cube(DVec3::new(2.0, 2.0, 1.0))?;
//! let hole = cube(DVec3::ONE)?;
//!
//! let plate = model!(dsl, "({0} + (0, 0, 0.5)) - {1}", block, hole)?;
//! let ModelValue::Mesh(plate) = plate else {
//!     panic!("subtraction of meshes builds a mesh");
//! };
//! let (min, _) = plate.bounds().ok_or("empty plate")?;
//! assert_eq!(min.z, 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod algebra;
pub mod error;
pub mod generator;
pub mod model;
pub mod value;

pub use error::{DslError, SemanticError};
pub use generator::{
    Generated, Generator, ParamError, ParamKind, ParamRecord, ParamSet, ParamSpec, ParamValue,
};
pub use model::ModelDsl;
pub use value::{ModelValue, VecValue};
