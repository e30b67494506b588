//! # Composition Grammar
//!
//! The mesh/contour DSL: `+` translates, `*` and `/` scale, `^` rotates,
//! and `-`, `|`, `&` are boolean subtract/union/intersect delegated to the
//! injected [`Backends`] registry. Transforms are pure and evaluate
//! eagerly; the boolean operators are the only reductions that leave the
//! expression evaluator.
//!
//! Precedence, loosest to tightest: `,` then `|` then `^` then `&` then
//! `+ -` then `* /`, with unary minus and `(`/`)` grouping. `*` is the
//! empty operator, so `2{s}` doubles an interpolated shape. The comma
//! builds vector literals and, for `(axis, angle)` pairs, an axis-angle
//! rotation operand for `^`.
//!
//! Each [`ModelDsl`] owns its grammar, so the boolean reductions hold the
//! registry they were built with and the template cache stays per-DSL.

use std::sync::Arc;

use glam::{DQuat, DVec2, DVec3};
use kerf_csg::Backends;
use kerf_expr::{literal, Grammar, GrammarBuilder};
use kerf_geom::{Contour, Mesh};
use tracing::debug;

use crate::error::{DslError, SemanticError};
use crate::value::{ModelValue, VecValue};

/// The composition DSL, bound to one backend registry.
#[derive(Debug)]
pub struct ModelDsl {
    backends: Arc<Backends>,
    grammar: Grammar<ModelValue, SemanticError>,
}

impl ModelDsl {
    /// Builds the DSL around an injected registry. The boolean operators
    /// of every expression this DSL evaluates resolve against it.
    #[must_use]
    pub fn new(backends: Arc<Backends>) -> Self {
        let grammar = build_grammar(&backends);
        debug!(?backends, "composition dsl ready");
        Self { backends, grammar }
    }

    /// The registry this DSL's boolean operators call into.
    #[must_use]
    pub fn backends(&self) -> &Backends {
        &self.backends
    }

    /// Evaluates a template to whatever value it builds.
    pub fn eval(&self, template: &'static str, args: &[ModelValue]) -> Result<ModelValue, DslError> {
        Ok(self.grammar.eval_template(template, args)?)
    }

    /// Evaluates a template that must build a mesh.
    pub fn mesh(&self, template: &'static str, args: &[ModelValue]) -> Result<Mesh, DslError> {
        match self.eval(template, args)? {
            ModelValue::Mesh(mesh) => Ok(mesh),
            other => Err(DslError::WrongKind {
                expected: "mesh",
                found: other.kind(),
            }),
        }
    }

    /// Evaluates a template that must build a contour.
    pub fn contour(&self, template: &'static str, args: &[ModelValue]) -> Result<Contour, DslError> {
        match self.eval(template, args)? {
            ModelValue::Contour(contour) => Ok(contour),
            other => Err(DslError::WrongKind {
                expected: "contour",
                found: other.kind(),
            }),
        }
    }
}

fn build_grammar(backends: &Arc<Backends>) -> Grammar<ModelValue, SemanticError> {
    let union_registry = Arc::clone(backends);
    let intersect_registry = Arc::clone(backends);
    let subtract_registry = Arc::clone(backends);
    GrammarBuilder::new()
        .nary(",", components)
        .level()
        .nary("|", move |operands| union(&union_registry, operands))
        .level()
        .binary("^", rotate_pair)
        .level()
        .nary("&", move |operands| intersect(&intersect_registry, operands))
        .level()
        .nary("+", translate)
        .binary("-", move |base, tool| {
            subtract(&subtract_registry, base, tool)
        })
        .level()
        .nary("*", scale)
        .binary("/", div_pair)
        .prefix("-", negate)
        .bracket("(", ")")
        .literal("number", |src| {
            literal::number(src).map(|(len, n)| (len, ModelValue::Number(n)))
        })
        .literal("pi", |src| {
            literal::keyword_ci(src, "pi")
                .or_else(|| literal::keyword_ci(src, "π"))
                .map(|len| (len, ModelValue::Number(std::f64::consts::PI)))
        })
        .empty_operator("*")
        .build()
}

/// Comma rule: numeric components make a vector, an `(axis, angle)` pair
/// makes the rotation operand for `^`.
fn components(operands: Vec<ModelValue>) -> Result<ModelValue, SemanticError> {
    if let [ModelValue::Vec3(axis), ModelValue::Number(angle)] = operands.as_slice() {
        return Ok(ModelValue::AxisAngle {
            axis: *axis,
            angle: *angle,
        });
    }
    let mut parts = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand {
            ModelValue::Number(n) => parts.push(n),
            other => {
                return Err(SemanticError::VectorComponent {
                    kind: other.kind(),
                })
            }
        }
    }
    VecValue::from_components(&parts).map(Into::into)
}

fn translate(operands: Vec<ModelValue>) -> Result<ModelValue, SemanticError> {
    let mut operands = operands.into_iter();
    match operands.next() {
        Some(first) => operands.try_fold(first, add_pair),
        None => Ok(ModelValue::Number(0.0)),
    }
}

fn add_pair(a: ModelValue, b: ModelValue) -> Result<ModelValue, SemanticError> {
    if let (Some(left), Some(right)) = (a.algebra(), b.algebra()) {
        return left.add(right, "+").map(Into::into);
    }
    let (left, right) = (a.kind(), b.kind());
    match (a, b) {
        (ModelValue::Mesh(mesh), ModelValue::Vec3(offset))
        | (ModelValue::Vec3(offset), ModelValue::Mesh(mesh)) => {
            Ok(ModelValue::Mesh(mesh.translated(offset)))
        }
        (ModelValue::Contour(contour), ModelValue::Vec2(offset))
        | (ModelValue::Vec2(offset), ModelValue::Contour(contour)) => {
            Ok(ModelValue::Contour(contour.translated(offset)))
        }
        _ => Err(SemanticError::Undefined {
            operator: "+",
            left,
            right,
        }),
    }
}

fn scale(operands: Vec<ModelValue>) -> Result<ModelValue, SemanticError> {
    let mut operands = operands.into_iter();
    match operands.next() {
        Some(first) => operands.try_fold(first, |a, b| mul_pair("*", a, b)),
        None => Ok(ModelValue::Number(1.0)),
    }
}

fn mul_pair(
    operator: &'static str,
    a: ModelValue,
    b: ModelValue,
) -> Result<ModelValue, SemanticError> {
    if let (Some(left), Some(right)) = (a.algebra(), b.algebra()) {
        return left.mul(right).map(Into::into);
    }
    let (left, right) = (a.kind(), b.kind());
    match (a, b) {
        (ModelValue::Mesh(mesh), ModelValue::Number(factor))
        | (ModelValue::Number(factor), ModelValue::Mesh(mesh)) => {
            Ok(scale_mesh(mesh, DVec3::splat(factor)))
        }
        (ModelValue::Mesh(mesh), ModelValue::Vec3(factor))
        | (ModelValue::Vec3(factor), ModelValue::Mesh(mesh)) => Ok(scale_mesh(mesh, factor)),
        (ModelValue::Contour(contour), ModelValue::Number(factor))
        | (ModelValue::Number(factor), ModelValue::Contour(contour)) => {
            Ok(scale_contour(contour, DVec2::splat(factor)))
        }
        (ModelValue::Contour(contour), ModelValue::Vec2(factor))
        | (ModelValue::Vec2(factor), ModelValue::Contour(contour)) => {
            Ok(scale_contour(contour, factor))
        }
        _ => Err(SemanticError::Undefined {
            operator,
            left,
            right,
        }),
    }
}

/// Unity scale elides the transform, so the operand passes through
/// untouched.
fn scale_mesh(mesh: Mesh, factor: DVec3) -> ModelValue {
    if factor == DVec3::ONE {
        ModelValue::Mesh(mesh)
    } else {
        ModelValue::Mesh(mesh.scaled(factor))
    }
}

fn scale_contour(contour: Contour, factor: DVec2) -> ModelValue {
    if factor == DVec2::ONE {
        ModelValue::Contour(contour)
    } else {
        ModelValue::Contour(contour.scaled(factor))
    }
}

fn div_pair(a: ModelValue, b: ModelValue) -> Result<ModelValue, SemanticError> {
    let (left, right) = (a.kind(), b.kind());
    let ModelValue::Number(divisor) = b else {
        return Err(SemanticError::Undefined {
            operator: "/",
            left,
            right,
        });
    };
    if divisor == 0.0 {
        return Err(SemanticError::DivisionByZero);
    }
    mul_pair("/", a, ModelValue::Number(divisor.recip()))
}

fn negate(operand: ModelValue) -> Result<ModelValue, SemanticError> {
    let kind = operand.kind();
    operand
        .algebra()
        .map(|value| value.negated().into())
        .ok_or(SemanticError::Negate { kind })
}

fn rotate_pair(a: ModelValue, b: ModelValue) -> Result<ModelValue, SemanticError> {
    let (target, by) = (a.kind(), b.kind());
    match (a, b) {
        // A bare axis carries its angle as its length.
        (ModelValue::Mesh(mesh), ModelValue::Vec3(axis)) => match axis.try_normalize() {
            Some(unit) => Ok(ModelValue::Mesh(
                mesh.rotated(DQuat::from_axis_angle(unit, axis.length())),
            )),
            None => Ok(ModelValue::Mesh(mesh)),
        },
        (ModelValue::Mesh(mesh), ModelValue::AxisAngle { axis, angle }) => {
            match axis.try_normalize() {
                Some(unit) => Ok(ModelValue::Mesh(
                    mesh.rotated(DQuat::from_axis_angle(unit, angle)),
                )),
                None => Err(SemanticError::ZeroAxis),
            }
        }
        (ModelValue::Contour(contour), ModelValue::Number(angle)) => {
            Ok(ModelValue::Contour(contour.rotated(angle)))
        }
        _ => Err(SemanticError::Rotation { target, by }),
    }
}

/// Same-kind geometry operands of an n-ary boolean run.
enum Operands {
    Meshes(Vec<Mesh>),
    Contours(Vec<Contour>),
}

fn geometry_operands(
    operator: &'static str,
    operands: Vec<ModelValue>,
) -> Result<Operands, SemanticError> {
    let mut meshes = Vec::new();
    let mut contours = Vec::new();
    for operand in operands {
        match operand {
            ModelValue::Mesh(mesh) => meshes.push(mesh),
            ModelValue::Contour(contour) => contours.push(contour),
            other => {
                return Err(SemanticError::Boolean {
                    operator,
                    kind: other.kind(),
                })
            }
        }
    }
    match (meshes.is_empty(), contours.is_empty()) {
        (false, true) => Ok(Operands::Meshes(meshes)),
        (true, false) => Ok(Operands::Contours(contours)),
        (false, false) => Err(SemanticError::Undefined {
            operator,
            left: "mesh",
            right: "contour",
        }),
        (true, true) => Err(kerf_csg::CsgError::EmptyOperands {
            operation: operator,
        }
        .into()),
    }
}

fn union(backends: &Backends, operands: Vec<ModelValue>) -> Result<ModelValue, SemanticError> {
    match geometry_operands("|", operands)? {
        Operands::Meshes(meshes) => Ok(ModelValue::Mesh(backends.solid()?.union(&meshes)?)),
        Operands::Contours(contours) => {
            Ok(ModelValue::Contour(backends.profile()?.union(&contours)?))
        }
    }
}

fn intersect(backends: &Backends, operands: Vec<ModelValue>) -> Result<ModelValue, SemanticError> {
    match geometry_operands("&", operands)? {
        Operands::Meshes(meshes) => Ok(ModelValue::Mesh(backends.solid()?.intersect(&meshes)?)),
        Operands::Contours(contours) => Ok(ModelValue::Contour(
            backends.profile()?.intersect(&contours)?,
        )),
    }
}

fn subtract(
    backends: &Backends,
    base: ModelValue,
    tool: ModelValue,
) -> Result<ModelValue, SemanticError> {
    match (base, tool) {
        (ModelValue::Mesh(base), ModelValue::Mesh(tool)) => {
            Ok(ModelValue::Mesh(backends.solid()?.subtract(&base, &tool)?))
        }
        (ModelValue::Contour(base), ModelValue::Contour(tool)) => Ok(ModelValue::Contour(
            backends.profile()?.subtract(&base, &tool)?,
        )),
        (base, tool) => {
            let (left, right) = (base.kind(), tool.kind());
            match (base.algebra(), tool.algebra()) {
                (Some(a), Some(b)) => a.add(b.negated(), "-").map(Into::into),
                _ => Err(SemanticError::Undefined {
                    operator: "-",
                    left,
                    right,
                }),
            }
        }
    }
}

/// Evaluates a composition template against a [`ModelDsl`].
///
/// Interpolated arguments convert through [`ModelValue::from`], so meshes,
/// contours, numbers and glam vectors pass straight in.
///
/// ```
/// use std::sync::Arc;
/// use glam::DVec3;
/// use kerf_csg::Backends;
/// use kerf_dsl::{model, ModelDsl, ModelValue};
/// use kerf_geom::primitives::cube;
///
/// let dsl = ModelDsl::new(Arc::new(Backends::standard()));
/// let die = cube(DVec3::splat(2.0))?;
/// let lifted = model!(dsl, "{} + (0, 0, 1)", die)?;
/// assert!(matches!(lifted, ModelValue::Mesh(_)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! model {
    ($dsl:expr, $template:literal $(, $arg:expr)* $(,)?) => {
        $dsl.eval($template, &[$($crate::ModelValue::from($arg)),*])
    };
}
