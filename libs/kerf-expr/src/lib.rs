//! # Kerf Expression Parser
//!
//! A generic operator-precedence parser whose grammar is supplied as data:
//! an ordered list of precedence levels (binary or n-ary operators with
//! their reduction functions), prefix/postfix operator maps, bracket pairs
//! with optional build transforms, atomic literal patterns tried in order,
//! and an optional "empty operator" inserted when two operands are adjacent
//! (so `2x` reads as `2 * x`).
//!
//! One parser core serves multiple DSLs because [`Grammar`] is generic over
//! the built value type and the reduction error type. Templates containing
//! `{}` / `{i}` argument markers are parsed once per call site and cached by
//! the identity of the `&'static str`, then re-evaluated cheaply with live
//! argument values.
//!
//! ## Example
//!
//! ```
//! use kerf_expr::GrammarBuilder;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("{0}")]
//! struct Overflow(String);
//!
//! let grammar = GrammarBuilder::<f64, Overflow>::new()
//!     .nary("+", |operands| Ok(operands.into_iter().sum()))
//!     .level()
//!     .nary("*", |operands| Ok(operands.into_iter().product()))
//!     .prefix("-", |operand| Ok(-operand))
//!     .bracket("(", ")")
//!     .literal("number", |src| kerf_expr::literal::number(src))
//!     .empty_operator("*")
//!     .build();
//!
//! let value = grammar.eval_template("2 ({0} + 1)", &[3.0])?;
//! assert_eq!(value, 8.0);
//! # Ok::<(), kerf_expr::ExprError<Overflow>>(())
//! ```

mod ast;
mod error;
mod grammar;
mod lexer;
pub mod literal;
mod parser;
mod template;

pub use ast::{Ast, RuleId};
pub use error::{ExprError, ParseError, ParseErrorKind};
pub use grammar::{Arity, Grammar, GrammarBuilder};
