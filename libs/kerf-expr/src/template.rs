//! Template parsing, caching, and evaluation.
//!
//! A template is a `&'static str` containing literal text plus `{}` / `{i}`
//! argument markers. Because the reference is `'static`, its pointer and
//! length identify the call site, so the parsed AST is cached once per
//! grammar and reused on every subsequent evaluation with fresh arguments.

use std::sync::{Arc, MutexGuard};

use rustc_hash::FxHashMap;

use crate::ast::Ast;
use crate::error::{ExprError, ParseError};
use crate::grammar::Grammar;
use crate::parser;

impl<V, E> Grammar<V, E>
where
    V: Clone,
    E: std::error::Error + 'static,
{
    /// Parses `source` into an AST without touching the template cache.
    pub fn parse(&self, source: &str) -> Result<Ast<V>, ParseError> {
        parser::parse(self, source)
    }

    /// Returns the cached AST for `template`, parsing it on first use.
    pub fn template(&self, template: &'static str) -> Result<Arc<Ast<V>>, ParseError> {
        let key = (template.as_ptr() as usize, template.len());
        if let Some(ast) = self.lock_cache().get(&key) {
            return Ok(Arc::clone(ast));
        }
        tracing::trace!(template = %template, "template cache miss");
        let ast = Arc::new(self.parse(template)?);
        self.lock_cache().insert(key, Arc::clone(&ast));
        Ok(ast)
    }

    /// Parses `template` (cached per call site) and evaluates it with `args`
    /// substituted for the argument markers.
    pub fn eval_template(&self, template: &'static str, args: &[V]) -> Result<V, ExprError<E>> {
        let ast = self.template(template)?;
        self.eval(&ast, args)
    }

    /// Evaluates an AST bottom-up: literals clone their built value,
    /// argument markers index into `args`, and operation nodes reduce their
    /// evaluated operands through the grammar rule's function.
    pub fn eval(&self, ast: &Ast<V>, args: &[V]) -> Result<V, ExprError<E>> {
        match ast {
            Ast::Value(value) => Ok(value.clone()),
            Ast::Arg(index) => args.get(*index).cloned().ok_or(ExprError::MissingArgument {
                index: *index,
                provided: args.len(),
            }),
            Ast::Op { rule, operands } => {
                let mut values = Vec::with_capacity(operands.len());
                for operand in operands {
                    values.push(self.eval(operand, args)?);
                }
                let rule = self.rule(*rule);
                (rule.apply)(values).map_err(|error| ExprError::Apply {
                    symbol: rule.symbol,
                    error,
                })
            }
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, FxHashMap<(usize, usize), Arc<Ast<V>>>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::error::ExprError;
    use crate::grammar::{Grammar, GrammarBuilder};
    use crate::literal;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("{0}")]
    struct Arith(&'static str);

    fn arithmetic() -> Grammar<f64, Arith> {
        GrammarBuilder::new()
            .nary("+", |operands: Vec<f64>| Ok(operands.into_iter().sum()))
            .binary("-", |a, b| Ok(a - b))
            .level()
            .nary("*", |operands| Ok(operands.into_iter().product()))
            .binary("/", |a, b| {
                if b == 0.0 {
                    Err(Arith("division by zero"))
                } else {
                    Ok(a / b)
                }
            })
            .prefix("-", |v| Ok(-v))
            .bracket("(", ")")
            .literal("number", literal::number)
            .empty_operator("*")
            .build()
    }

    #[test]
    fn template_substitutes_arguments() {
        let grammar = arithmetic();
        let value = grammar.eval_template("{} + 2 {}", &[1.0, 3.0]).unwrap();
        assert_eq!(value, 7.0);
    }

    #[test]
    fn explicit_markers_can_repeat_and_reorder() {
        let grammar = arithmetic();
        let value = grammar
            .eval_template("{1} - {0} + {1}", &[1.0, 10.0])
            .unwrap();
        assert_eq!(value, 19.0);
    }

    #[test]
    fn same_call_site_reuses_the_cached_ast() {
        let grammar = arithmetic();
        let template = "{0} * 3";
        let first = grammar.template(template).unwrap();
        let second = grammar.template(template).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        // fresh arguments, fresh results, same tree
        assert_eq!(grammar.eval(&first, &[2.0]).unwrap(), 6.0);
        assert_eq!(grammar.eval(&second, &[5.0]).unwrap(), 15.0);
    }

    #[test]
    fn missing_argument_is_reported_with_counts() {
        let grammar = arithmetic();
        let err = grammar.eval_template("{0} + {3}", &[1.0]).unwrap_err();
        match err {
            ExprError::MissingArgument { index, provided } => {
                assert_eq!(index, 3);
                assert_eq!(provided, 1);
            }
            other => panic!("expected missing-argument error, got {other}"),
        }
    }

    #[test]
    fn reduction_failure_names_the_operator() {
        let grammar = arithmetic();
        let err = grammar.eval_template("1 / {}", &[0.0]).unwrap_err();
        match err {
            ExprError::Apply { symbol, error } => {
                assert_eq!(symbol, "/");
                assert_eq!(error, Arith("division by zero"));
            }
            other => panic!("expected apply error, got {other}"),
        }
    }

    #[test]
    fn bad_marker_fails_to_parse() {
        let grammar = arithmetic();
        assert!(grammar.parse("{nope}").is_err());
        assert!(grammar.parse("{0").is_err());
    }
}
