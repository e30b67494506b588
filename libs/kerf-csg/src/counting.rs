//! # Counting Backend
//!
//! Test double implementing both capability traits. Every call bumps a
//! per-operation counter and returns empty geometry; operands are
//! never inspected. Compositions run against it to observe how often
//! they invoke each boolean without paying for real clipping.

use std::sync::atomic::{AtomicUsize, Ordering};

use kerf_geom::{Contour, Mesh};

use crate::error::CsgError;
use crate::traits::{ProfileBoolean, SolidBoolean};

/// Backend that counts calls instead of computing geometry.
#[derive(Debug, Default)]
pub struct CountingBackend {
    union: AtomicUsize,
    intersect: AtomicUsize,
    subtract: AtomicUsize,
    hull: AtomicUsize,
}

impl CountingBackend {
    /// Creates a backend with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Union calls recorded so far, 2D and 3D combined.
    pub fn union_calls(&self) -> usize {
        self.union.load(Ordering::Relaxed)
    }

    /// Intersect calls recorded so far, 2D and 3D combined.
    pub fn intersect_calls(&self) -> usize {
        self.intersect.load(Ordering::Relaxed)
    }

    /// Subtract calls recorded so far, 2D and 3D combined.
    pub fn subtract_calls(&self) -> usize {
        self.subtract.load(Ordering::Relaxed)
    }

    /// Hull calls recorded so far, 2D and 3D combined.
    pub fn hull_calls(&self) -> usize {
        self.hull.load(Ordering::Relaxed)
    }
}

impl SolidBoolean for CountingBackend {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn union(&self, _operands: &[Mesh]) -> Result<Mesh, CsgError> {
        self.union.fetch_add(1, Ordering::Relaxed);
        Ok(Mesh::empty())
    }

    fn intersect(&self, _operands: &[Mesh]) -> Result<Mesh, CsgError> {
        self.intersect.fetch_add(1, Ordering::Relaxed);
        Ok(Mesh::empty())
    }

    fn subtract(&self, _base: &Mesh, _tool: &Mesh) -> Result<Mesh, CsgError> {
        self.subtract.fetch_add(1, Ordering::Relaxed);
        Ok(Mesh::empty())
    }

    fn hull(&self, _operands: &[Mesh]) -> Result<Mesh, CsgError> {
        self.hull.fetch_add(1, Ordering::Relaxed);
        Ok(Mesh::empty())
    }
}

impl ProfileBoolean for CountingBackend {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn union(&self, _operands: &[Contour]) -> Result<Contour, CsgError> {
        self.union.fetch_add(1, Ordering::Relaxed);
        Ok(Contour::new_unchecked(Vec::new()))
    }

    fn intersect(&self, _operands: &[Contour]) -> Result<Contour, CsgError> {
        self.intersect.fetch_add(1, Ordering::Relaxed);
        Ok(Contour::new_unchecked(Vec::new()))
    }

    fn subtract(&self, _base: &Contour, _tool: &Contour) -> Result<Contour, CsgError> {
        self.subtract.fetch_add(1, Ordering::Relaxed);
        Ok(Contour::new_unchecked(Vec::new()))
    }

    fn hull(&self, _operands: &[Contour]) -> Result<Contour, CsgError> {
        self.hull.fetch_add(1, Ordering::Relaxed);
        Ok(Contour::new_unchecked(Vec::new()))
    }
}
