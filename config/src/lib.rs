//! # Config Crate
//!
//! Centralized configuration for the kerf geometry pipeline. All magic
//! numbers and tunable parameters live here so the kernel crates stay
//! declarative and consistent with each other.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::EPSILON_TOLERANCE;
//! use config::grain::Grain;
//!
//! // Use EPSILON_TOLERANCE for floating-point comparisons
//! let value: f64 = 1.0e-11;
//! assert!(value.abs() < EPSILON_TOLERANCE * 100.0);
//!
//! // Grain controls how finely curved geometry is tessellated
//! let grain = Grain::default();
//! assert!(grain.segments(1.0) >= 3);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Explicit Over Ambient**: Kernel code takes `Grain` as an argument;
//!   only the generator boundary reads the process-wide value
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
pub mod grain;

pub use grain::{Grain, GrainScope};
