//! # CSG Errors
//!
//! Configuration problems (nothing registered, capability missing) are
//! distinct variants, and both are distinct from engine failures and
//! from geometry integrity errors arriving out of `kerf-geom`.

use kerf_geom::GeomError;
use thiserror::Error;

use crate::registry::BackendKind;

/// Errors raised by the boolean abstraction and its backends.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsgError {
    /// A capability was requested from a registry slot with nothing in
    /// it.
    #[error("no {kind} boolean backend registered")]
    Unregistered {
        /// The empty registry slot.
        kind: BackendKind,
    },

    /// The registered backend does not implement the requested
    /// operation.
    #[error("backend `{backend}` does not support `{operation}`")]
    Unsupported {
        /// Name of the backend that was asked.
        backend: &'static str,
        /// The operation it cannot perform.
        operation: &'static str,
    },

    /// An n-ary operation was invoked with no operands at all.
    #[error("`{operation}` needs at least one operand")]
    EmptyOperands {
        /// The operation handed the empty list.
        operation: &'static str,
    },

    /// The backend engine failed while computing an operation.
    #[error("backend `{backend}` failed during `{operation}`: {message}")]
    Failed {
        /// Name of the failing backend.
        backend: &'static str,
        /// The operation that failed.
        operation: &'static str,
        /// Engine-level failure description.
        message: String,
    },

    /// A geometry integrity error surfaced while converting operands
    /// or rebuilding results.
    #[error(transparent)]
    Geom(#[from] GeomError),
}
