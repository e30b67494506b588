//! Grammar definition: the data that configures the parser core.

use std::fmt;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::ast::{Ast, RuleId};

/// How many operands an operator rule consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one operand (prefix/postfix operators, bracket transforms).
    Unary,
    /// Exactly two operands, left-associative.
    Binary,
    /// Two or more operands; runs of the same operator flatten into one node.
    Nary,
}

pub(crate) type ApplyFn<V, E> = Box<dyn Fn(Vec<V>) -> Result<V, E> + Send + Sync>;
pub(crate) type MatchFn<V> = Box<dyn Fn(&str) -> Option<(usize, V)> + Send + Sync>;

/// One reduction rule: an operator symbol plus the function that builds its
/// result from already-built operand values.
pub(crate) struct Rule<V, E> {
    pub symbol: &'static str,
    pub arity: Arity,
    pub apply: ApplyFn<V, E>,
}

/// A bracket-delimiter pair, optionally transforming the bracketed value.
pub(crate) struct Bracket {
    pub open: &'static str,
    pub close: &'static str,
    pub transform: Option<RuleId>,
}

/// A named atomic literal pattern.
pub(crate) struct Literal<V> {
    pub name: &'static str,
    pub matches: MatchFn<V>,
}

/// An expression grammar: precedence levels, prefix/postfix maps, brackets,
/// literal patterns, and the optional empty operator, together with the
/// template cache shared by every call site using this grammar.
///
/// Build one with [`GrammarBuilder`], then keep it alive for the life of the
/// DSL (typically in a `OnceLock` or inside the DSL's entry type).
pub struct Grammar<V, E> {
    pub(crate) rules: Vec<Rule<V, E>>,
    /// Infix symbol tables, loosest-binding level first.
    pub(crate) levels: Vec<FxHashMap<&'static str, RuleId>>,
    pub(crate) prefix: FxHashMap<&'static str, RuleId>,
    pub(crate) postfix: FxHashMap<&'static str, RuleId>,
    pub(crate) brackets: Vec<Bracket>,
    pub(crate) literals: Vec<Literal<V>>,
    pub(crate) empty_operator: Option<&'static str>,
    /// Every operator/delimiter symbol, longest first, so tokenizing never
    /// stops at a proper prefix of a longer symbol.
    pub(crate) symbols: Vec<&'static str>,
    pub(crate) cache: Mutex<FxHashMap<(usize, usize), Arc<Ast<V>>>>,
}

impl<V, E> Grammar<V, E> {
    pub(crate) fn rule(&self, id: RuleId) -> &Rule<V, E> {
        &self.rules[id]
    }

    pub(crate) fn infix(&self, level: usize, symbol: &str) -> Option<RuleId> {
        self.levels[level].get(symbol).copied()
    }

    pub(crate) fn bracket_open(&self, symbol: &str) -> Option<&Bracket> {
        self.brackets.iter().find(|b| b.open == symbol)
    }

    pub(crate) fn is_open(&self, symbol: &str) -> bool {
        self.brackets.iter().any(|b| b.open == symbol)
    }

    pub(crate) fn is_close(&self, symbol: &str) -> bool {
        self.brackets.iter().any(|b| b.close == symbol)
    }

    /// Number of infix precedence levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl<V, E> fmt::Debug for Grammar<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("levels", &self.levels.len())
            .field("rules", &self.rules.len())
            .field(
                "literals",
                &self.literals.iter().map(|l| l.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Assembles a [`Grammar`].
///
/// Operator methods add to the current precedence level; [`level`] opens a
/// new, tighter-binding one. The first operator method call opens level 0
/// implicitly.
///
/// [`level`]: GrammarBuilder::level
pub struct GrammarBuilder<V, E> {
    rules: Vec<Rule<V, E>>,
    levels: Vec<Vec<RuleId>>,
    prefix: Vec<RuleId>,
    postfix: Vec<RuleId>,
    brackets: Vec<Bracket>,
    literals: Vec<Literal<V>>,
    empty_operator: Option<&'static str>,
}

impl<V, E> GrammarBuilder<V, E> {
    /// Starts an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            levels: Vec::new(),
            prefix: Vec::new(),
            postfix: Vec::new(),
            brackets: Vec::new(),
            literals: Vec::new(),
            empty_operator: None,
        }
    }

    fn push_rule(&mut self, symbol: &'static str, arity: Arity, apply: ApplyFn<V, E>) -> RuleId {
        let id = self.rules.len();
        self.rules.push(Rule {
            symbol,
            arity,
            apply,
        });
        id
    }

    fn push_infix(&mut self, id: RuleId) {
        if self.levels.is_empty() {
            self.levels.push(Vec::new());
        }
        if let Some(level) = self.levels.last_mut() {
            level.push(id);
        }
    }

    /// Opens a new precedence level binding tighter than all previous ones.
    #[must_use]
    pub fn level(mut self) -> Self {
        self.levels.push(Vec::new());
        self
    }

    /// Adds an n-ary operator to the current level. Runs of the operator
    /// flatten into a single node whose operands arrive in source order.
    #[must_use]
    pub fn nary(
        mut self,
        symbol: &'static str,
        apply: impl Fn(Vec<V>) -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        let id = self.push_rule(symbol, Arity::Nary, Box::new(apply));
        self.push_infix(id);
        self
    }

    /// Adds a left-associative binary operator to the current level.
    #[must_use]
    pub fn binary(
        mut self,
        symbol: &'static str,
        apply: impl Fn(V, V) -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        let id = self.push_rule(
            symbol,
            Arity::Binary,
            Box::new(move |mut operands: Vec<V>| {
                // the parser emits exactly two operands for binary rules
                let right = operands.swap_remove(1);
                let left = operands.swap_remove(0);
                apply(left, right)
            }),
        );
        self.push_infix(id);
        self
    }

    /// Adds a prefix operator. Prefix operators bind at the unit level,
    /// inside every infix operator.
    #[must_use]
    pub fn prefix(
        mut self,
        symbol: &'static str,
        apply: impl Fn(V) -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        let id = self.push_rule(
            symbol,
            Arity::Unary,
            Box::new(move |mut operands: Vec<V>| {
                // the parser emits exactly one operand for unary rules
                apply(operands.swap_remove(0))
            }),
        );
        self.prefix.push(id);
        self
    }

    /// Adds a postfix operator. Postfix operators apply repeatedly,
    /// innermost first.
    #[must_use]
    pub fn postfix(
        mut self,
        symbol: &'static str,
        apply: impl Fn(V) -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        let id = self.push_rule(
            symbol,
            Arity::Unary,
            Box::new(move |mut operands: Vec<V>| {
                // the parser emits exactly one operand for unary rules
                apply(operands.swap_remove(0))
            }),
        );
        self.postfix.push(id);
        self
    }

    /// Adds a plain grouping bracket pair.
    #[must_use]
    pub fn bracket(mut self, open: &'static str, close: &'static str) -> Self {
        self.brackets.push(Bracket {
            open,
            close,
            transform: None,
        });
        self
    }

    /// Adds a bracket pair whose built content is passed through `apply`.
    #[must_use]
    pub fn bracket_with(
        mut self,
        open: &'static str,
        close: &'static str,
        apply: impl Fn(V) -> Result<V, E> + Send + Sync + 'static,
    ) -> Self {
        let id = self.push_rule(
            open,
            Arity::Unary,
            Box::new(move |mut operands: Vec<V>| {
                // the parser emits exactly one operand for unary rules
                apply(operands.swap_remove(0))
            }),
        );
        self.brackets.push(Bracket {
            open,
            close,
            transform: Some(id),
        });
        self
    }

    /// Adds an atomic literal pattern. Patterns are tried in registration
    /// order at each position, before operator matching. The matcher returns
    /// the consumed byte length and the built value.
    #[must_use]
    pub fn literal(
        mut self,
        name: &'static str,
        matches: impl Fn(&str) -> Option<(usize, V)> + Send + Sync + 'static,
    ) -> Self {
        self.literals.push(Literal {
            name,
            matches: Box::new(matches),
        });
        self
    }

    /// Designates the operator inserted between two adjacent operands
    /// (`2x`, `3(…)`). Must be the symbol of a registered infix operator.
    #[must_use]
    pub fn empty_operator(mut self, symbol: &'static str) -> Self {
        self.empty_operator = Some(symbol);
        self
    }

    /// Finalizes the grammar: builds the per-level symbol maps and the
    /// longest-first symbol table.
    #[must_use]
    pub fn build(self) -> Grammar<V, E> {
        let mut levels = Vec::with_capacity(self.levels.len());
        for ids in &self.levels {
            let mut map = FxHashMap::default();
            for &id in ids {
                map.insert(self.rules[id].symbol, id);
            }
            levels.push(map);
        }

        let mut prefix = FxHashMap::default();
        for &id in &self.prefix {
            prefix.insert(self.rules[id].symbol, id);
        }
        let mut postfix = FxHashMap::default();
        for &id in &self.postfix {
            postfix.insert(self.rules[id].symbol, id);
        }

        let mut symbols: Vec<&'static str> = Vec::new();
        let mut remember = |s: &'static str| {
            if !symbols.contains(&s) {
                symbols.push(s);
            }
        };
        for rule in &self.rules {
            remember(rule.symbol);
        }
        for bracket in &self.brackets {
            remember(bracket.open);
            remember(bracket.close);
        }
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

        Grammar {
            rules: self.rules,
            levels,
            prefix,
            postfix,
            brackets: self.brackets,
            literals: self.literals,
            empty_operator: self.empty_operator,
            symbols,
            cache: Mutex::new(FxHashMap::default()),
        }
    }
}

impl<V, E> Default for GrammarBuilder<V, E> {
    fn default() -> Self {
        Self::new()
    }
}
