//! # Backend Registry
//!
//! Explicit dependency injection for boolean capability. A [`Backends`]
//! value is assembled once at startup and injected wherever geometry
//! composition happens; it holds at most one solid and one profile
//! backend. Asking for an empty slot is the configuration error
//! [`CsgError::Unregistered`], never a silent no-op.

use std::fmt;
use std::sync::Arc;

use crate::bsp::BspBackend;
use crate::clip::ClipBackend;
use crate::error::CsgError;
use crate::traits::{ProfileBoolean, SolidBoolean};

/// The two capability slots a [`Backends`] registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// 3D mesh booleans.
    Solid,
    /// 2D contour booleans.
    Profile,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Solid => "solid",
            Self::Profile => "profile",
        })
    }
}

/// The boolean backends in use, resolved once.
#[derive(Clone)]
pub struct Backends {
    solid: Option<Arc<dyn SolidBoolean>>,
    profile: Option<Arc<dyn ProfileBoolean>>,
}

impl Backends {
    /// A registry with both slots empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            solid: None,
            profile: None,
        }
    }

    /// The stock in-process pair: BSP solids and clipper profiles.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_solid(Arc::new(BspBackend::new()))
            .with_profile(Arc::new(ClipBackend::new()))
    }

    /// This registry with its solid slot replaced.
    #[must_use]
    pub fn with_solid(mut self, backend: Arc<dyn SolidBoolean>) -> Self {
        self.solid = Some(backend);
        self
    }

    /// This registry with its profile slot replaced.
    #[must_use]
    pub fn with_profile(mut self, backend: Arc<dyn ProfileBoolean>) -> Self {
        self.profile = Some(backend);
        self
    }

    /// The solid backend, if one is registered.
    pub fn solid(&self) -> Result<&dyn SolidBoolean, CsgError> {
        self.solid.as_deref().ok_or(CsgError::Unregistered {
            kind: BackendKind::Solid,
        })
    }

    /// The profile backend, if one is registered.
    pub fn profile(&self) -> Result<&dyn ProfileBoolean, CsgError> {
        self.profile.as_deref().ok_or(CsgError::Unregistered {
            kind: BackendKind::Profile,
        })
    }
}

impl fmt::Debug for Backends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backends")
            .field("solid", &self.solid.as_deref().map(|backend| backend.name()))
            .field(
                "profile",
                &self.profile.as_deref().map(|backend| backend.name()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::CountingBackend;

    #[test]
    fn empty_slots_report_the_configuration_error() {
        let backends = Backends::empty();
        assert!(matches!(
            backends.solid().map(|_| ()),
            Err(CsgError::Unregistered {
                kind: BackendKind::Solid
            })
        ));
        assert!(matches!(
            backends.profile().map(|_| ()),
            Err(CsgError::Unregistered {
                kind: BackendKind::Profile
            })
        ));
    }

    #[test]
    fn standard_pair_is_fully_armed() {
        let backends = Backends::standard();
        assert_eq!(backends.solid().unwrap().name(), "bsp");
        assert_eq!(backends.profile().unwrap().name(), "clip");
    }

    #[test]
    fn slots_can_be_swapped_independently() {
        let counter = Arc::new(CountingBackend::new());
        let backends = Backends::standard().with_solid(counter);
        assert_eq!(backends.solid().unwrap().name(), "counting");
        assert_eq!(backends.profile().unwrap().name(), "clip");
    }

    #[test]
    fn debug_shows_slot_names() {
        let rendered = format!("{:?}", Backends::standard());
        assert!(rendered.contains("bsp"));
        assert!(rendered.contains("clip"));

        let rendered = format!("{:?}", Backends::empty());
        assert!(rendered.contains("None"));
    }
}
