//! Centralized configuration values shared across the kerf pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

/// Numerical tolerance used by geometry kernels.
///
/// # Examples
/// ```
/// use config::constants::EPSILON_TOLERANCE;
/// assert!(EPSILON_TOLERANCE < 1.0e-6);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Cell size of the vertex-weld grid. Coordinates quantized to the same cell
/// merge into one mesh vertex.
///
/// # Examples
/// ```
/// use config::constants::WELD_EPSILON;
/// assert!(WELD_EPSILON > 0.0 && WELD_EPSILON < 1.0e-3);
/// ```
pub const WELD_EPSILON: f64 = 1.0e-6;

/// Default grain: the maximum chord length used when approximating curves.
///
/// A unit circle tessellated at this grain yields roughly 32 segments.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_GRAIN_SIZE;
/// assert!(DEFAULT_GRAIN_SIZE > 0.0);
/// ```
pub const DEFAULT_GRAIN_SIZE: f64 = 0.2;

/// Minimum number of segments for any tessellated curve.
///
/// # Examples
/// ```
/// use config::constants::MIN_SEGMENTS;
/// assert_eq!(MIN_SEGMENTS, 3);
/// ```
pub const MIN_SEGMENTS: u32 = 3;

/// Maximum number of segments for any tessellated curve, bounding mesh size
/// for very large radii or very fine grains.
///
/// # Examples
/// ```
/// use config::constants::{MAX_SEGMENTS, MIN_SEGMENTS};
/// assert!(MAX_SEGMENTS > MIN_SEGMENTS);
/// ```
pub const MAX_SEGMENTS: u32 = 360;

/// Number of probe points used to estimate the length of a sweep path when
/// deriving an adaptive sample count.
///
/// # Examples
/// ```
/// use config::constants::PATH_LENGTH_PROBES;
/// assert!(PATH_LENGTH_PROBES >= 8);
/// ```
pub const PATH_LENGTH_PROBES: usize = 32;

#[cfg(test)]
mod tests;
