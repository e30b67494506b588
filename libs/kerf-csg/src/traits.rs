//! The boolean capability interface.

use kerf_geom::{Contour, Mesh};

use crate::error::CsgError;

/// Boolean operations over 3D meshes.
///
/// `union` and `intersect` fold across every operand; `subtract` is
/// binary. An empty operand list reports
/// [`CsgError::EmptyOperands`]; an operation the backend cannot
/// perform reports [`CsgError::Unsupported`] rather than silently
/// returning an input.
pub trait SolidBoolean: Send + Sync {
    /// Short backend name used in errors and logs.
    fn name(&self) -> &'static str;

    /// The union of every operand.
    fn union(&self, operands: &[Mesh]) -> Result<Mesh, CsgError>;

    /// The intersection of every operand.
    fn intersect(&self, operands: &[Mesh]) -> Result<Mesh, CsgError>;

    /// `base` with `tool` carved away.
    fn subtract(&self, base: &Mesh, tool: &Mesh) -> Result<Mesh, CsgError>;

    /// The convex hull over every operand's vertices.
    fn hull(&self, operands: &[Mesh]) -> Result<Mesh, CsgError>;
}

/// Boolean operations over 2D contours.
///
/// The same contract as [`SolidBoolean`], one dimension down. Point
/// and segment queries live in [`kerf_geom::predicates`], not on this
/// trait.
pub trait ProfileBoolean: Send + Sync {
    /// Short backend name used in errors and logs.
    fn name(&self) -> &'static str;

    /// The union of every operand.
    fn union(&self, operands: &[Contour]) -> Result<Contour, CsgError>;

    /// The intersection of every operand.
    fn intersect(&self, operands: &[Contour]) -> Result<Contour, CsgError>;

    /// `base` with `tool` clipped away.
    fn subtract(&self, base: &Contour, tool: &Contour) -> Result<Contour, CsgError>;

    /// The convex hull over every operand's outer rings.
    fn hull(&self, operands: &[Contour]) -> Result<Contour, CsgError>;
}

/// Splits an operand list into head and tail, rejecting empty lists.
pub(crate) fn require_operands<'a, T>(
    operation: &'static str,
    operands: &'a [T],
) -> Result<(&'a T, &'a [T]), CsgError> {
    operands
        .split_first()
        .ok_or(CsgError::EmptyOperands { operation })
}
