//! Error type shared by every geometry operation.

use thiserror::Error;

/// Errors produced while building or transforming geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// A polygon needs at least three vertices to bound any area.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// A hole ring was not contained by the outer ring of its shape.
    #[error("hole {index} lies outside the outer ring")]
    HoleOutsideOuter {
        /// Index of the offending hole.
        index: usize,
    },

    /// Two hole rings of one shape touch or overlap.
    #[error("holes {first} and {second} overlap")]
    OverlappingHoles {
        /// Index of the first hole involved.
        first: usize,
        /// Index of the second hole involved.
        second: usize,
    },

    /// Two shapes of one contour touch or overlap.
    #[error("shapes {first} and {second} overlap")]
    OverlappingShapes {
        /// Index of the first shape involved.
        first: usize,
        /// Index of the second shape involved.
        second: usize,
    },

    /// A sweep needs at least two path samples to produce any walls.
    #[error("sweep needs at least 2 path samples, got {count}")]
    TooFewSamples {
        /// Number of samples requested.
        count: usize,
    },

    /// Profile rings changed topology between consecutive path samples.
    #[error("ring topology mismatch: {message}")]
    RingMismatch {
        /// Description of the mismatch.
        message: String,
    },

    /// The ear-clipping backend rejected a shape.
    #[error("triangulation failed: {message}")]
    Triangulation {
        /// Description from the triangulator.
        message: String,
    },

    /// A face referenced a vertex index past the end of the vertex list.
    #[error("face index {index} out of bounds for {count} vertices")]
    IndexOutOfBounds {
        /// The offending index.
        index: u32,
        /// Number of vertices available.
        count: usize,
    },

    /// Geometry collapsed below the representable minimum.
    #[error("degenerate geometry: {message}")]
    Degenerate {
        /// Description of the collapse.
        message: String,
    },

    /// An interchange record could not be interpreted as a mesh.
    #[error("invalid mesh record: {message}")]
    InvalidRecord {
        /// Description of the defect.
        message: String,
    },
}

impl GeomError {
    /// Creates a [`GeomError::RingMismatch`] from any displayable message.
    pub fn ring_mismatch(message: impl Into<String>) -> Self {
        Self::RingMismatch {
            message: message.into(),
        }
    }

    /// Creates a [`GeomError::Triangulation`] from any displayable message.
    pub fn triangulation(message: impl Into<String>) -> Self {
        Self::Triangulation {
            message: message.into(),
        }
    }

    /// Creates a [`GeomError::Degenerate`] from any displayable message.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }

    /// Creates a [`GeomError::InvalidRecord`] from any displayable message.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_their_context() {
        let error = GeomError::TooFewVertices { count: 2 };
        assert_eq!(error.to_string(), "polygon needs at least 3 vertices, got 2");

        let error = GeomError::IndexOutOfBounds { index: 9, count: 4 };
        assert_eq!(
            error.to_string(),
            "face index 9 out of bounds for 4 vertices"
        );
    }

    #[test]
    fn helpers_accept_any_displayable_message() {
        let error = GeomError::ring_mismatch(format!("sample {} dropped a ring", 3));
        assert!(error.to_string().contains("sample 3"));
    }
}
