//! Parse and evaluation errors.

use thiserror::Error;

/// Error produced while tokenizing or parsing an expression.
///
/// Carries the full source text and the byte offset of the failure so
/// callers can render a caret diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
    text: String,
}

/// The specific way parsing failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    /// A character matched no literal pattern and no operator symbol.
    #[error("unknown character {found:?}")]
    UnknownCharacter {
        /// The offending character.
        found: char,
    },
    /// An operator appeared where an operand was expected, or an operand
    /// position was empty.
    #[error("expected an operand, found '{found}'")]
    ExpectedOperand {
        /// What occupied the operand position ("end of input" at EOF).
        found: String,
    },
    /// An infix or unknown operator appeared where none was expected.
    #[error("unexpected '{symbol}'")]
    UnexpectedSymbol {
        /// The offending symbol.
        symbol: String,
    },
    /// An opening bracket was never closed.
    #[error("unmatched '{open}', expected '{close}'")]
    UnmatchedBracket {
        /// The opening delimiter.
        open: &'static str,
        /// The closing delimiter that never arrived.
        close: &'static str,
    },
    /// Input remained after a complete expression was parsed.
    #[error("trailing input")]
    TrailingInput,
    /// An argument marker was not of the form `{}` or `{index}`.
    #[error("malformed argument marker")]
    BadArgumentMarker,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, text: &str, offset: usize) -> Self {
        Self {
            kind,
            offset,
            text: text.to_owned(),
        }
    }

    /// The kind of failure.
    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Byte offset into the source where the failure occurred.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The source text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the source with a caret under the failure offset.
    ///
    /// ```text
    /// 1 + ~2
    ///     ^ unknown character '~'
    /// ```
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let column = self.text[..self.offset.min(self.text.len())]
            .chars()
            .count();
        format!("{}\n{}^ {}", self.text, " ".repeat(column), self.kind)
    }
}

/// Error produced while evaluating a parsed template.
#[derive(Debug, Error)]
pub enum ExprError<E>
where
    E: std::error::Error + 'static,
{
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
    /// A reduction function rejected its operands.
    #[error("cannot apply '{symbol}': {error}")]
    Apply {
        /// Symbol of the failing operation.
        symbol: &'static str,
        /// The grammar-level error.
        #[source]
        error: E,
    },
}
