//! Expression AST, generic over the grammar's built value type.

/// Index of a reduction rule in its grammar's rule table.
pub type RuleId = usize;

/// A parsed expression node.
///
/// Cached template ASTs are plain data: literal values are already built,
/// argument markers are recorded by index, and operations reference their
/// grammar rule by id so the same tree can be evaluated many times with
/// different argument values.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast<V> {
    /// A literal value produced by one of the grammar's atomic patterns.
    Value(V),
    /// An interpolated-argument marker (`{}` / `{i}`), substituted at
    /// evaluation time.
    Arg(usize),
    /// An operation applying one grammar rule to its operands.
    Op {
        /// Rule to apply, indexing into the grammar's rule table.
        rule: RuleId,
        /// Operands in source order; length matches the rule's arity
        /// (n-ary rules flatten runs into a single node).
        operands: Vec<Ast<V>>,
    },
}

impl<V> Ast<V> {
    pub(crate) fn op(rule: RuleId, operands: Vec<Ast<V>>) -> Self {
        Ast::Op { rule, operands }
    }

    /// Number of operands if this is an operation node.
    #[must_use]
    pub fn operand_count(&self) -> Option<usize> {
        match self {
            Ast::Op { operands, .. } => Some(operands.len()),
            _ => None,
        }
    }
}
