//! Grammar-driven tokenizer.
//!
//! At each position the atomic literal patterns are tried in order, then
//! argument markers, then operator/delimiter symbols longest-first. Unknown
//! characters fail with the source text and offset attached.

use crate::error::{ParseError, ParseErrorKind};
use crate::grammar::Grammar;

#[derive(Debug)]
pub(crate) enum Lexeme<V> {
    /// A built literal value.
    Value { value: V, offset: usize },
    /// An argument marker `{}` / `{i}`.
    Arg { index: usize, offset: usize },
    /// An operator or bracket delimiter.
    Symbol { text: &'static str, offset: usize },
}

impl<V> Lexeme<V> {
    pub(crate) fn offset(&self) -> usize {
        match self {
            Lexeme::Value { offset, .. }
            | Lexeme::Arg { offset, .. }
            | Lexeme::Symbol { offset, .. } => *offset,
        }
    }
}

pub(crate) fn tokenize<V, E>(
    grammar: &Grammar<V, E>,
    source: &str,
) -> Result<Vec<Lexeme<V>>, ParseError> {
    let mut lexemes = Vec::new();
    let mut offset = 0;
    // Bare `{}` markers take sequential indices; explicit `{i}` markers do
    // not advance the counter.
    let mut next_auto = 0usize;

    'scan: while offset < source.len() {
        let rest = &source[offset..];
        let ch = match rest.chars().next() {
            Some(ch) => ch,
            None => break,
        };

        if ch.is_whitespace() {
            offset += ch.len_utf8();
            continue;
        }

        for literal in &grammar.literals {
            if let Some((len, value)) = (literal.matches)(rest) {
                if len == 0 {
                    continue;
                }
                lexemes.push(Lexeme::Value { value, offset });
                offset += len;
                continue 'scan;
            }
        }

        if ch == '{' {
            let (len, index) = scan_marker(rest, &mut next_auto)
                .ok_or_else(|| marker_error(source, offset))?;
            lexemes.push(Lexeme::Arg { index, offset });
            offset += len;
            continue;
        }

        if let Some(symbol) = grammar.symbols.iter().find(|s| rest.starts_with(**s)) {
            lexemes.push(Lexeme::Symbol {
                text: symbol,
                offset,
            });
            offset += symbol.len();
            continue;
        }

        return Err(ParseError::new(
            ParseErrorKind::UnknownCharacter { found: ch },
            source,
            offset,
        ));
    }

    Ok(insert_empty_operator(grammar, lexemes))
}

fn marker_error(source: &str, offset: usize) -> ParseError {
    ParseError::new(ParseErrorKind::BadArgumentMarker, source, offset)
}

/// Scans `{}` or `{index}` at the start of `rest`, returning consumed length
/// and the resolved argument index.
fn scan_marker(rest: &str, next_auto: &mut usize) -> Option<(usize, usize)> {
    let end = rest.find('}')?;
    let body = rest[1..end].trim();
    let index = if body.is_empty() {
        let index = *next_auto;
        *next_auto += 1;
        index
    } else {
        body.parse().ok()?
    };
    Some((end + 1, index))
}

/// Inserts the grammar's empty operator wherever an operand-ending lexeme is
/// directly followed by an operand-starting one (`2x`, `3(…)`, `(a)(b)`).
fn insert_empty_operator<V, E>(grammar: &Grammar<V, E>, lexemes: Vec<Lexeme<V>>) -> Vec<Lexeme<V>> {
    let Some(symbol) = grammar.empty_operator else {
        return lexemes;
    };
    let mut out: Vec<Lexeme<V>> = Vec::with_capacity(lexemes.len());
    for lexeme in lexemes {
        let ends_operand = match out.last() {
            Some(Lexeme::Value { .. }) | Some(Lexeme::Arg { .. }) => true,
            Some(Lexeme::Symbol { text, .. }) => grammar.is_close(text),
            None => false,
        };
        let starts_operand = match &lexeme {
            Lexeme::Value { .. } | Lexeme::Arg { .. } => true,
            Lexeme::Symbol { text, .. } => grammar.is_open(text),
        };
        if ends_operand && starts_operand {
            out.push(Lexeme::Symbol {
                text: symbol,
                offset: lexeme.offset(),
            });
        }
        out.push(lexeme);
    }
    out
}
