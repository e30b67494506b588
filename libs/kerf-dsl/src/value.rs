//! The value types the two grammars build.
//!
//! [`VecValue`] is the closed algebra of the vector grammar: numbers and
//! 2/3/4-component vectors. [`ModelValue`] is the composition grammar's
//! superset, adding axis-angle rotations and the two geometry kinds. The
//! checked arithmetic lives on `VecValue`; the composition grammar funnels
//! its numeric subexpressions through it so both grammars agree on what
//! `2 * (1, 0, 0)` means.

use glam::{DVec2, DVec3, DVec4};
use kerf_geom::{Contour, Mesh};

use crate::error::SemanticError;

/// A number or fixed-arity vector, as built by the vector algebra grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VecValue {
    /// A scalar.
    Number(f64),
    /// A two-component vector.
    Vec2(DVec2),
    /// A three-component vector.
    Vec3(DVec3),
    /// A four-component vector.
    Vec4(DVec4),
}

impl VecValue {
    /// The kind name used in semantic-error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
        }
    }

    /// The vector whose arity matches `parts.len()`.
    pub(crate) fn from_components(parts: &[f64]) -> Result<Self, SemanticError> {
        match *parts {
            [x, y] => Ok(Self::Vec2(DVec2::new(x, y))),
            [x, y, z] => Ok(Self::Vec3(DVec3::new(x, y, z))),
            [x, y, z, w] => Ok(Self::Vec4(DVec4::new(x, y, z, w))),
            _ => Err(SemanticError::VectorArity {
                count: parts.len(),
            }),
        }
    }

    /// Componentwise addition of same-kind operands. `operator` names the
    /// source operator in the mismatch error, so subtraction can reuse this
    /// through negation.
    pub(crate) fn add(self, other: Self, operator: &'static str) -> Result<Self, SemanticError> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Ok(Self::Number(a + b)),
            (Self::Vec2(a), Self::Vec2(b)) => Ok(Self::Vec2(a + b)),
            (Self::Vec3(a), Self::Vec3(b)) => Ok(Self::Vec3(a + b)),
            (Self::Vec4(a), Self::Vec4(b)) => Ok(Self::Vec4(a + b)),
            (a, b) => Err(SemanticError::Undefined {
                operator,
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }

    /// Number times number, or a vector scaled by a number. Two vector
    /// factors have no meaning here.
    pub(crate) fn mul(self, other: Self) -> Result<Self, SemanticError> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Ok(Self::Number(a * b)),
            (Self::Number(factor), vector) | (vector, Self::Number(factor)) => {
                Ok(vector.scaled(factor))
            }
            (a, b) => Err(SemanticError::VectorProduct {
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }

    pub(crate) fn negated(self) -> Self {
        match self {
            Self::Number(n) => Self::Number(-n),
            Self::Vec2(v) => Self::Vec2(-v),
            Self::Vec3(v) => Self::Vec3(-v),
            Self::Vec4(v) => Self::Vec4(-v),
        }
    }

    fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Number(n) => Self::Number(n * factor),
            Self::Vec2(v) => Self::Vec2(v * factor),
            Self::Vec3(v) => Self::Vec3(v * factor),
            Self::Vec4(v) => Self::Vec4(v * factor),
        }
    }
}

impl From<f64> for VecValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DVec2> for VecValue {
    fn from(value: DVec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<DVec3> for VecValue {
    fn from(value: DVec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<DVec4> for VecValue {
    fn from(value: DVec4) -> Self {
        Self::Vec4(value)
    }
}

/// Any value a composition expression can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValue {
    /// A scalar.
    Number(f64),
    /// A two-component vector.
    Vec2(DVec2),
    /// A three-component vector.
    Vec3(DVec3),
    /// A four-component vector.
    Vec4(DVec4),
    /// A rotation: an axis paired with an explicit angle in radians.
    AxisAngle {
        /// Rotation axis, not necessarily normalized.
        axis: DVec3,
        /// Rotation angle in radians.
        angle: f64,
    },
    /// A 2D profile.
    Contour(Contour),
    /// A 3D solid.
    Mesh(Mesh),
}

impl ModelValue {
    /// The kind name used in semantic-error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::AxisAngle { .. } => "axis-angle",
            Self::Contour(_) => "contour",
            Self::Mesh(_) => "mesh",
        }
    }

    /// The algebraic view of this value, when it has one.
    pub(crate) fn algebra(&self) -> Option<VecValue> {
        match self {
            Self::Number(n) => Some(VecValue::Number(*n)),
            Self::Vec2(v) => Some(VecValue::Vec2(*v)),
            Self::Vec3(v) => Some(VecValue::Vec3(*v)),
            Self::Vec4(v) => Some(VecValue::Vec4(*v)),
            _ => None,
        }
    }
}

impl From<VecValue> for ModelValue {
    fn from(value: VecValue) -> Self {
        match value {
            VecValue::Number(n) => Self::Number(n),
            VecValue::Vec2(v) => Self::Vec2(v),
            VecValue::Vec3(v) => Self::Vec3(v),
            VecValue::Vec4(v) => Self::Vec4(v),
        }
    }
}

impl From<f64> for ModelValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DVec2> for ModelValue {
    fn from(value: DVec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<DVec3> for ModelValue {
    fn from(value: DVec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<DVec4> for ModelValue {
    fn from(value: DVec4) -> Self {
        Self::Vec4(value)
    }
}

impl From<Contour> for ModelValue {
    fn from(value: Contour) -> Self {
        Self::Contour(value)
    }
}

impl From<Mesh> for ModelValue {
    fn from(value: Mesh) -> Self {
        Self::Mesh(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_build_the_matching_arity() {
        assert_eq!(
            VecValue::from_components(&[1.0, 2.0]),
            Ok(VecValue::Vec2(DVec2::new(1.0, 2.0)))
        );
        assert_eq!(
            VecValue::from_components(&[1.0, 2.0, 3.0, 4.0]),
            Ok(VecValue::Vec4(DVec4::new(1.0, 2.0, 3.0, 4.0)))
        );
        assert_eq!(
            VecValue::from_components(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            Err(SemanticError::VectorArity { count: 5 })
        );
    }

    #[test]
    fn addition_requires_matching_kinds() {
        let sum = VecValue::Vec2(DVec2::X).add(VecValue::Vec2(DVec2::Y), "+");
        assert_eq!(sum, Ok(VecValue::Vec2(DVec2::new(1.0, 1.0))));

        let mixed = VecValue::Vec2(DVec2::X).add(VecValue::Vec3(DVec3::Y), "+");
        assert_eq!(
            mixed,
            Err(SemanticError::Undefined {
                operator: "+",
                left: "vec2",
                right: "vec3",
            })
        );
    }

    #[test]
    fn products_scale_at_most_one_vector() {
        let scaled = VecValue::Number(2.0).mul(VecValue::Vec3(DVec3::ONE));
        assert_eq!(scaled, Ok(VecValue::Vec3(DVec3::splat(2.0))));

        let doubled = VecValue::Vec3(DVec3::X).mul(VecValue::Vec3(DVec3::Y));
        assert_eq!(
            doubled,
            Err(SemanticError::VectorProduct {
                left: "vec3",
                right: "vec3",
            })
        );
    }

    #[test]
    fn model_values_name_their_kind() {
        assert_eq!(ModelValue::Number(1.0).kind(), "number");
        assert_eq!(
            ModelValue::AxisAngle {
                axis: DVec3::Z,
                angle: 1.0,
            }
            .kind(),
            "axis-angle"
        );
        assert_eq!(ModelValue::Mesh(Mesh::empty()).kind(), "mesh");
        assert!(ModelValue::Mesh(Mesh::empty()).algebra().is_none());
    }
}
