//! # Primitive Generators
//!
//! Flat and solid starting shapes, all tessellated against an explicit
//! [`Grain`](config::Grain). Curved primitives are built on the sweep
//! engine rather than hand-placed vertex tables, so their seams, poles
//! and caps share the exact weld behavior of every other sweep.

mod flat;
mod solid;

pub use flat::{annulus, circle, ngon, square};
pub use solid::{cone, cube, cylinder, sphere, torus};
