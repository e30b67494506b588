//! Tessellation density ("grain") configuration.
//!
//! The grain is the maximum chord length tolerated when a curve is
//! approximated by straight segments: smaller grain, finer meshes. Kernel
//! code receives a [`Grain`] explicitly; the process-wide ambient value
//! exists only for the generator boundary, where a parameters record is
//! applied for the duration of a single generation call via [`scoped`].

use std::f64::consts::TAU;
use std::fmt;
use std::mem;
use std::sync::{Mutex, MutexGuard, RwLock};

use crate::constants::{DEFAULT_GRAIN_SIZE, MAX_SEGMENTS, MIN_SEGMENTS};

/// Maximum chord length used when tessellating curved geometry.
///
/// # Examples
/// ```
/// use config::grain::Grain;
/// let grain = Grain::new(0.1).expect("positive grain");
/// assert!(grain.segments(1.0) > Grain::default().segments(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grain {
    /// Chord-length bound in model units. Always positive and finite.
    pub size: f64,
}

impl Grain {
    /// Builds a grain, rejecting non-positive or non-finite chord sizes.
    ///
    /// # Examples
    /// ```
    /// use config::grain::Grain;
    /// assert!(Grain::new(0.25).is_ok());
    /// assert!(Grain::new(0.0).is_err());
    /// assert!(Grain::new(f64::NAN).is_err());
    /// ```
    pub fn new(size: f64) -> Result<Self, ConfigError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ConfigError::InvalidGrain(size));
        }
        Ok(Self { size })
    }

    /// Reads the current process-wide ambient grain.
    ///
    /// # Examples
    /// ```
    /// use config::grain::Grain;
    /// assert!(Grain::ambient().size > 0.0);
    /// ```
    pub fn ambient() -> Self {
        ambient()
    }

    /// Number of segments needed so that a full circle of `radius` is
    /// approximated with chords no longer than the grain, clamped to
    /// [`MIN_SEGMENTS`]..=[`MAX_SEGMENTS`].
    ///
    /// # Examples
    /// ```
    /// use config::grain::Grain;
    /// let grain = Grain::new(0.2).expect("positive grain");
    /// assert_eq!(grain.segments(0.0), 3);
    /// assert!(grain.segments(1.0) >= 31);
    /// ```
    pub fn segments(&self, radius: f64) -> u32 {
        if !(radius > 0.0) {
            return MIN_SEGMENTS;
        }
        let ideal = (TAU * radius / self.size).ceil() as u32;
        ideal.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
    }

    /// Number of path samples needed so that consecutive sweep frames along a
    /// path of `length` are no farther apart than the grain. Always at least
    /// two (a sweep needs a start and an end ring).
    ///
    /// # Examples
    /// ```
    /// use config::grain::Grain;
    /// let grain = Grain::new(0.5).expect("positive grain");
    /// assert_eq!(grain.samples(0.0), 2);
    /// assert_eq!(grain.samples(2.0), 5);
    /// ```
    pub fn samples(&self, length: f64) -> u32 {
        if !(length > 0.0) {
            return 2;
        }
        let spans = (length / self.size).ceil() as u32;
        spans.saturating_add(1).max(2)
    }
}

impl Default for Grain {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRAIN_SIZE,
        }
    }
}

/// Error returned when an invalid grain value is provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the chord size is zero, negative, or not finite.
    InvalidGrain(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGrain(value) => {
                write!(f, "grain size must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

static AMBIENT: RwLock<Grain> = RwLock::new(Grain {
    size: DEFAULT_GRAIN_SIZE,
});

// One scope at a time. Holding the guard inside GrainScope serializes
// overlapping overrides instead of letting them interleave.
static SCOPE: Mutex<()> = Mutex::new(());

/// Reads the current process-wide ambient grain.
pub fn ambient() -> Grain {
    match AMBIENT.read() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn swap_ambient(next: Grain) -> Grain {
    match AMBIENT.write() {
        Ok(mut guard) => mem::replace(&mut *guard, next),
        Err(poisoned) => mem::replace(&mut *poisoned.into_inner(), next),
    }
}

/// Installs `grain` as the ambient value until the returned guard drops.
///
/// The previous value is restored on every exit path, including unwinding.
/// A second call blocks until the first scope ends, so overlapping overrides
/// never interleave.
///
/// # Examples
/// ```
/// use config::grain::{self, Grain};
/// let fine = Grain::new(0.05).expect("positive grain");
/// {
///     let _scope = grain::scoped(fine);
///     assert_eq!(grain::ambient(), fine);
/// }
/// // previous ambient value is back here
/// ```
pub fn scoped(grain: Grain) -> GrainScope {
    let exclusive = match SCOPE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let previous = swap_ambient(grain);
    GrainScope {
        previous,
        _exclusive: exclusive,
    }
}

/// Guard returned by [`scoped`]; restores the previous ambient grain on drop.
#[must_use = "dropping the scope immediately restores the previous grain"]
pub struct GrainScope {
    previous: Grain,
    _exclusive: MutexGuard<'static, ()>,
}

impl Drop for GrainScope {
    fn drop(&mut self) {
        swap_ambient(self.previous);
    }
}

impl fmt::Debug for GrainScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrainScope")
            .field("previous", &self.previous)
            .finish()
    }
}

#[cfg(test)]
mod tests;
