//! Precedence-climbing parser over the grammar's level tables.
//!
//! Each precedence level recurses into the next-tighter level for its
//! operands. Binary operators consume exactly one tighter subexpression;
//! n-ary operators greedily flatten runs of the same operator, merging an
//! already-built same-operator subtree on either side. Prefix operators bind
//! at the unit level and recurse through postfix parsing; postfix operators
//! apply repeatedly, innermost first. Brackets always override precedence.

use crate::ast::{Ast, RuleId};
use crate::error::{ParseError, ParseErrorKind};
use crate::grammar::{Arity, Grammar};
use crate::lexer::{tokenize, Lexeme};

pub(crate) fn parse<V: Clone, E>(
    grammar: &Grammar<V, E>,
    source: &str,
) -> Result<Ast<V>, ParseError> {
    let lexemes = tokenize(grammar, source)?;
    let mut parser = Parser {
        grammar,
        source,
        lexemes,
        position: 0,
    };
    let ast = parser.parse_level(0)?;
    match parser.current() {
        None => Ok(ast),
        Some(lexeme) => Err(ParseError::new(
            ParseErrorKind::TrailingInput,
            source,
            lexeme.offset(),
        )),
    }
}

struct Parser<'g, 's, V, E> {
    grammar: &'g Grammar<V, E>,
    source: &'s str,
    lexemes: Vec<Lexeme<V>>,
    position: usize,
}

impl<V: Clone, E> Parser<'_, '_, V, E> {
    fn current(&self) -> Option<&Lexeme<V>> {
        self.lexemes.get(self.position)
    }

    fn current_symbol(&self) -> Option<&'static str> {
        match self.current() {
            Some(Lexeme::Symbol { text, .. }) => Some(text),
            _ => None,
        }
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        let offset = self
            .current()
            .map_or(self.source.len(), |lexeme| lexeme.offset());
        ParseError::new(kind, self.source, offset)
    }

    fn parse_level(&mut self, level: usize) -> Result<Ast<V>, ParseError> {
        if level == self.grammar.level_count() {
            return self.parse_unit();
        }
        let mut left = self.parse_level(level + 1)?;
        while let Some(rule) = self
            .current_symbol()
            .and_then(|symbol| self.grammar.infix(level, symbol))
        {
            self.advance();
            let right = self.parse_level(level + 1)?;
            left = match self.grammar.rule(rule).arity {
                Arity::Nary => merge_nary(rule, left, right),
                _ => Ast::op(rule, vec![left, right]),
            };
        }
        Ok(left)
    }

    fn parse_unit(&mut self) -> Result<Ast<V>, ParseError> {
        if let Some(rule) = self
            .current_symbol()
            .and_then(|symbol| self.grammar.prefix.get(symbol).copied())
        {
            self.advance();
            let operand = self.parse_unit()?;
            return Ok(Ast::op(rule, vec![operand]));
        }
        let mut node = self.parse_atom()?;
        while let Some(rule) = self
            .current_symbol()
            .and_then(|symbol| self.grammar.postfix.get(symbol).copied())
        {
            self.advance();
            node = Ast::op(rule, vec![node]);
        }
        Ok(node)
    }

    fn parse_atom(&mut self) -> Result<Ast<V>, ParseError> {
        match self.current() {
            None => Err(self.error_here(ParseErrorKind::ExpectedOperand {
                found: "end of input".to_owned(),
            })),
            Some(Lexeme::Value { value, .. }) => {
                let node = Ast::Value(value.clone());
                self.advance();
                Ok(node)
            }
            Some(Lexeme::Arg { index, .. }) => {
                let node = Ast::Arg(*index);
                self.advance();
                Ok(node)
            }
            Some(Lexeme::Symbol { text, offset }) => {
                let text = *text;
                let open_offset = *offset;
                let Some(bracket) = self.grammar.bracket_open(text) else {
                    return Err(self.error_here(ParseErrorKind::ExpectedOperand {
                        found: text.to_owned(),
                    }));
                };
                let close = bracket.close;
                let transform = bracket.transform;
                self.advance();
                let inner = self.parse_level(0)?;
                if self.current_symbol() != Some(close) {
                    return Err(ParseError::new(
                        ParseErrorKind::UnmatchedBracket { open: text, close },
                        self.source,
                        open_offset,
                    ));
                }
                self.advance();
                Ok(match transform {
                    Some(rule) => Ast::op(rule, vec![inner]),
                    None => inner,
                })
            }
        }
    }
}

/// Joins two operands under an n-ary rule, splicing in either side if it is
/// already a node of the same rule. This gives left-associative flattening:
/// `a + b + c` and `a + (b + c)` both become one node with three operands.
fn merge_nary<V>(rule: RuleId, left: Ast<V>, right: Ast<V>) -> Ast<V> {
    let mut operands = match left {
        Ast::Op {
            rule: r, operands, ..
        } if r == rule => operands,
        other => vec![other],
    };
    match right {
        Ast::Op {
            rule: r,
            operands: mut rest,
        } if r == rule => operands.append(&mut rest),
        other => operands.push(other),
    }
    Ast::op(rule, operands)
}
