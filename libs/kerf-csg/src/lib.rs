//! # Kerf CSG
//!
//! Boolean-operation backends behind one capability interface.
//!
//! ## Architecture
//!
//! ```text
//! kerf-geom (contours, meshes, predicates)
//!      |
//! kerf-csg (capability traits + backend registry)   <-- this crate
//!      |
//! kerf-dsl (composition operators)
//! ```
//!
//! Callers never name a backend directly. They resolve one through
//! [`Backends`], which holds at most one solid and one profile slot;
//! an empty slot reports [`CsgError::Unregistered`] and a resolved
//! backend missing an operation reports [`CsgError::Unsupported`].
//! Point predicates stay in `kerf_geom::predicates` and need no
//! backend at all.
//!
//! ## Backends
//!
//! - [`ClipBackend`]: 2D clipping through `i_overlay`, the stock
//!   profile slot.
//! - [`BspBackend`]: csg.js-style BSP clipping with a quickhull, the
//!   stock solid slot.
//! - [`CsgrsBackend`]: adapter over the external `csgrs` kernel.
//! - [`CountingBackend`]: test double that counts calls and returns
//!   empty geometry.

pub mod bsp;
pub mod clip;
pub mod counting;
pub mod error;
mod hull;
pub mod kernel;
pub mod registry;
mod traits;

pub use bsp::BspBackend;
pub use clip::ClipBackend;
pub use counting::CountingBackend;
pub use error::CsgError;
pub use kernel::CsgrsBackend;
pub use registry::{BackendKind, Backends};
pub use traits::{ProfileBoolean, SolidBoolean};
