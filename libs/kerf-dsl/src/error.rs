//! # DSL Errors
//!
//! [`SemanticError`] covers well-formed expressions that are type-invalid,
//! and doubles as the reduction error of both grammars; backend failures
//! ride through it in a transparent variant. [`DslError`] is the top-level
//! type every entry point returns. Converting an evaluation error into a
//! `DslError` re-sorts it by class, so callers match `Parse`, `Semantic`,
//! `Geom` or `Csg` directly instead of digging through the reduction
//! nesting.

use kerf_csg::CsgError;
use kerf_expr::{ExprError, ParseError};
use kerf_geom::GeomError;
use thiserror::Error;

use crate::generator::ParamError;

/// A well-formed expression applied operators to the wrong kinds of value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    /// An operator applied to operand kinds it has no meaning for.
    #[error("`{operator}` is not defined for {left} and {right}")]
    Undefined {
        /// The operator symbol.
        operator: &'static str,
        /// Kind of the left operand.
        left: &'static str,
        /// Kind of the right operand.
        right: &'static str,
    },

    /// A comma run with a component count no vector has.
    #[error("a vector needs 2 to 4 components, got {count}")]
    VectorArity {
        /// Number of components supplied.
        count: usize,
    },

    /// A comma run with a component that is not a number.
    #[error("vector components must be numbers, got {kind}")]
    VectorComponent {
        /// Kind of the offending component.
        kind: &'static str,
    },

    /// A product with more than one vector factor.
    #[error("a product can scale at most one vector, found {left} * {right}")]
    VectorProduct {
        /// Kind of the left factor.
        left: &'static str,
        /// Kind of the right factor.
        right: &'static str,
    },

    /// Unary minus on something that is not a number or vector.
    #[error("cannot negate {kind}")]
    Negate {
        /// Kind of the operand.
        kind: &'static str,
    },

    /// `^` with an operand pairing that names no rotation.
    #[error("cannot rotate {target} by {by}")]
    Rotation {
        /// Kind of the value being rotated.
        target: &'static str,
        /// Kind of the rotation operand.
        by: &'static str,
    },

    /// An axis-angle rotation around an axis with no direction.
    #[error("rotation axis must not be the zero vector")]
    ZeroAxis,

    /// Division by an exact zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A boolean operator over an operand that is not geometry.
    #[error("`{operator}` needs mesh or contour operands, got {kind}")]
    Boolean {
        /// The operator symbol.
        operator: &'static str,
        /// Kind of the offending operand.
        kind: &'static str,
    },

    /// A backend call failed mid-reduction.
    #[error(transparent)]
    Backend(#[from] CsgError),
}

/// Anything that can go wrong between a template string and its geometry.
#[derive(Debug, PartialEq, Error)]
pub enum DslError {
    /// The template failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An argument marker referenced an index the caller did not supply.
    #[error("argument {{{index}}} not supplied ({provided} arguments given)")]
    MissingArgument {
        /// Index the marker referenced.
        index: usize,
        /// Number of arguments the caller provided.
        provided: usize,
    },

    /// The expression parsed but applied operators to the wrong kinds.
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// A geometry integrity error.
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// A backend configuration error or engine failure.
    #[error(transparent)]
    Csg(#[from] CsgError),

    /// A generator parameter problem.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// The expression built a different kind of value than the entry
    /// point promised its caller.
    #[error("expected the expression to build a {expected}, got {found}")]
    WrongKind {
        /// Kind the entry point promised.
        expected: &'static str,
        /// Kind the expression actually built.
        found: &'static str,
    },
}

impl From<ExprError<SemanticError>> for DslError {
    fn from(error: ExprError<SemanticError>) -> Self {
        match error {
            ExprError::Parse(parse) => Self::Parse(parse),
            ExprError::MissingArgument { index, provided } => {
                Self::MissingArgument { index, provided }
            }
            // Backend failures keep their own class instead of hiding
            // inside the semantic one.
            ExprError::Apply {
                error: SemanticError::Backend(backend),
                ..
            } => Self::Csg(backend),
            ExprError::Apply { error, .. } => Self::Semantic(error),
        }
    }
}
