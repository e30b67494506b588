//! # Vector Algebra Grammar
//!
//! The pure-numeric DSL: sums, differences and scalings of numbers and
//! 2/3/4-component vectors, with `(x, y, z)` literals built by the comma
//! operator and `pi`/`π` as symbolic constants. The grammar captures no
//! services, so one process-wide instance serves every call site and the
//! template cache warms exactly once per template.
//!
//! Precedence, loosest to tightest: `,` then `+ -` then `*`, with unary
//! minus and `(`/`)` grouping. `*` doubles as the empty operator, so
//! `2(1, 0, 0)` scales the vector by two.

use std::f64::consts::PI;
use std::sync::OnceLock;

use kerf_expr::{literal, Grammar, GrammarBuilder};

use crate::error::{DslError, SemanticError};
use crate::value::VecValue;

/// The process-wide vector algebra grammar.
pub fn vector_grammar() -> &'static Grammar<VecValue, SemanticError> {
    static GRAMMAR: OnceLock<Grammar<VecValue, SemanticError>> = OnceLock::new();
    GRAMMAR.get_or_init(build_grammar)
}

/// Evaluates one vector-algebra template with `args` substituted for its
/// argument markers. The [`vecexpr!`](crate::vecexpr) macro is the usual
/// entry point.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use kerf_dsl::{vecexpr, VecValue};
///
/// let v = vecexpr!("{} + (0, 1, 0)", DVec3::new(1.0, 0.0, 0.0))?;
/// assert_eq!(v, VecValue::Vec3(DVec3::new(1.0, 1.0, 0.0)));
/// # Ok::<(), kerf_dsl::DslError>(())
/// ```
pub fn eval(template: &'static str, args: &[VecValue]) -> Result<VecValue, DslError> {
    Ok(vector_grammar().eval_template(template, args)?)
}

fn build_grammar() -> Grammar<VecValue, SemanticError> {
    GrammarBuilder::new()
        .nary(",", vector)
        .level()
        .nary("+", sum)
        .binary("-", |a: VecValue, b: VecValue| a.add(b.negated(), "-"))
        .level()
        .nary("*", product)
        .prefix("-", |v: VecValue| Ok(v.negated()))
        .bracket("(", ")")
        .literal("number", |src| {
            literal::number(src).map(|(len, n)| (len, VecValue::Number(n)))
        })
        .literal("pi", |src| {
            literal::keyword_ci(src, "pi")
                .or_else(|| literal::keyword_ci(src, "π"))
                .map(|len| (len, VecValue::Number(PI)))
        })
        .empty_operator("*")
        .build()
}

fn vector(operands: Vec<VecValue>) -> Result<VecValue, SemanticError> {
    let mut parts = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand {
            VecValue::Number(n) => parts.push(n),
            other => {
                return Err(SemanticError::VectorComponent {
                    kind: other.kind(),
                })
            }
        }
    }
    VecValue::from_components(&parts)
}

fn sum(operands: Vec<VecValue>) -> Result<VecValue, SemanticError> {
    let mut operands = operands.into_iter();
    match operands.next() {
        Some(first) => operands.try_fold(first, |total, next| total.add(next, "+")),
        None => Ok(VecValue::Number(0.0)),
    }
}

fn product(operands: Vec<VecValue>) -> Result<VecValue, SemanticError> {
    let mut operands = operands.into_iter();
    match operands.next() {
        Some(first) => operands.try_fold(first, VecValue::mul),
        None => Ok(VecValue::Number(1.0)),
    }
}

/// Evaluates a vector-algebra template.
///
/// Interpolated arguments convert through [`VecValue::from`], so `f64`
/// and glam vectors pass straight in.
///
/// ```
/// use glam::DVec3;
/// use kerf_dsl::{vecexpr, VecValue};
///
/// let doubled = vecexpr!("2 * {}", DVec3::ONE)?;
/// assert_eq!(doubled, VecValue::Vec3(DVec3::splat(2.0)));
/// # Ok::<(), kerf_dsl::DslError>(())
/// ```
#[macro_export]
macro_rules! vecexpr {
    ($template:literal $(, $arg:expr)* $(,)?) => {
        $crate::algebra::eval($template, &[$($crate::VecValue::from($arg)),*])
    };
}
