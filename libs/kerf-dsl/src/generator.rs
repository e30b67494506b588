//! # Generator Contract
//!
//! The boundary external tooling calls through: a [`Generator`] couples a
//! parameter schema with a build function that returns a mesh or contour.
//! [`Generator::generate`] takes a plain [`ParamRecord`], checks every
//! supplied name and value kind against the schema, fills defaults, and
//! runs the build with the record's grain installed as the ambient value
//! for the duration of that one call.
//!
//! The schema is serde-serializable so UI tooling can render a form from
//! it; the record round-trips the same way.

use std::collections::BTreeMap;
use std::fmt;

use config::grain::{self, ConfigError};
use config::Grain;
use glam::{DVec2, DVec3};
use kerf_geom::{Contour, Mesh};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::DslError;

/// Type tag carried by every schema field, for UI form generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// A scalar number.
    Number,
    /// An on/off flag.
    Toggle,
    /// Free-form text.
    Text,
    /// A planar vector.
    Vec2,
    /// A spatial vector.
    Vec3,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Toggle => "toggle",
            Self::Text => "text",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
        };
        f.write_str(name)
    }
}

/// One parameter value, as carried by records and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A scalar number.
    Number(f64),
    /// An on/off flag.
    Toggle(bool),
    /// Free-form text.
    Text(String),
    /// A planar vector, serialized as `[x, y]`.
    Vec2(DVec2),
    /// A spatial vector, serialized as `[x, y, z]`.
    Vec3(DVec3),
}

impl ParamValue {
    /// The kind tag this value matches against.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Number(_) => ParamKind::Number,
            Self::Toggle(_) => ParamKind::Toggle,
            Self::Text(_) => ParamKind::Text,
            Self::Vec2(_) => ParamKind::Vec2,
            Self::Vec3(_) => ParamKind::Vec3,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Toggle(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DVec2> for ParamValue {
    fn from(value: DVec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<DVec3> for ParamValue {
    fn from(value: DVec3) -> Self {
        Self::Vec3(value)
    }
}

/// One schema field: a name, a kind tag, and the default used when a
/// record does not mention the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name, the key records address it by.
    pub name: String,
    /// Kind tag, always the kind of `default`.
    pub kind: ParamKind,
    /// Value used when a record omits this parameter.
    pub default: ParamValue,
}

impl ParamSpec {
    /// Builds a field, deriving the kind tag from the default.
    pub fn new(name: impl Into<String>, default: impl Into<ParamValue>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            kind: default.kind(),
            default,
        }
    }
}

/// The plain parameters record external callers hand to
/// [`Generator::generate`]. Names it does not mention fall back to their
/// schema defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Ambient grain override for the duration of this one call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grain: Option<f64>,
    /// Supplied values by parameter name.
    #[serde(default)]
    pub values: BTreeMap<String, ParamValue>,
}

impl ParamRecord {
    /// An empty record: every parameter at its default, ambient grain
    /// untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one parameter value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Sets the grain installed while the build runs.
    #[must_use]
    pub fn with_grain(mut self, size: f64) -> Self {
        self.grain = Some(size);
        self
    }
}

/// Fully resolved parameters as seen by a build function: every schema
/// name present, every value kind-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    /// Looks a parameter up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Looks a parameter up, failing if the schema never declared it.
    pub fn require(&self, name: &str) -> Result<&ParamValue, ParamError> {
        self.values.get(name).ok_or_else(|| ParamError::Missing {
            name: name.to_owned(),
        })
    }

    /// Reads a number parameter.
    pub fn number(&self, name: &str) -> Result<f64, ParamError> {
        match self.require(name)? {
            ParamValue::Number(value) => Ok(*value),
            other => Err(kind_error(name, ParamKind::Number, other)),
        }
    }

    /// Reads a toggle parameter.
    pub fn toggle(&self, name: &str) -> Result<bool, ParamError> {
        match self.require(name)? {
            ParamValue::Toggle(value) => Ok(*value),
            other => Err(kind_error(name, ParamKind::Toggle, other)),
        }
    }

    /// Reads a text parameter.
    pub fn text(&self, name: &str) -> Result<&str, ParamError> {
        match self.require(name)? {
            ParamValue::Text(value) => Ok(value),
            other => Err(kind_error(name, ParamKind::Text, other)),
        }
    }

    /// Reads a planar vector parameter.
    pub fn vec2(&self, name: &str) -> Result<DVec2, ParamError> {
        match self.require(name)? {
            ParamValue::Vec2(value) => Ok(*value),
            other => Err(kind_error(name, ParamKind::Vec2, other)),
        }
    }

    /// Reads a spatial vector parameter.
    pub fn vec3(&self, name: &str) -> Result<DVec3, ParamError> {
        match self.require(name)? {
            ParamValue::Vec3(value) => Ok(*value),
            other => Err(kind_error(name, ParamKind::Vec3, other)),
        }
    }
}

fn kind_error(name: &str, expected: ParamKind, found: &ParamValue) -> ParamError {
    ParamError::Kind {
        name: name.to_owned(),
        expected,
        found: found.kind(),
    }
}

/// Errors raised while resolving a parameters record against a schema.
#[derive(Debug, PartialEq, Error)]
pub enum ParamError {
    /// The record supplied a name the schema does not declare.
    #[error("unknown parameter `{name}`")]
    Unknown {
        /// The undeclared name.
        name: String,
    },
    /// A supplied value does not match its field's kind tag.
    #[error("parameter `{name}` takes a {expected}, got a {found}")]
    Kind {
        /// The offending parameter.
        name: String,
        /// Kind the schema declares.
        expected: ParamKind,
        /// Kind the record supplied.
        found: ParamKind,
    },
    /// The build asked for a name the schema never declared.
    #[error("parameter `{name}` was never declared")]
    Missing {
        /// The requested name.
        name: String,
    },
    /// The record's grain override is not a valid grain.
    #[error(transparent)]
    Grain(#[from] ConfigError),
}

/// What a build function returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// A solid result.
    Mesh(Mesh),
    /// A planar result.
    Contour(Contour),
}

impl From<Mesh> for Generated {
    fn from(mesh: Mesh) -> Self {
        Self::Mesh(mesh)
    }
}

impl From<Contour> for Generated {
    fn from(contour: Contour) -> Self {
        Self::Contour(contour)
    }
}

type BuildFn = Box<dyn Fn(&ParamSet) -> Result<Generated, DslError> + Send + Sync>;

/// A named, parameterized model builder.
///
/// ```
/// use glam::DVec3;
/// use kerf_dsl::{Generated, Generator, ParamRecord, ParamSpec};
/// use kerf_geom::primitives::cube;
///
/// let boxes = Generator::new("box", vec![ParamSpec::new("side", 2.0)], |params| {
///     let side = params.number("side")?;
///     Ok(Generated::Mesh(cube(DVec3::splat(side))?))
/// });
///
/// let record = ParamRecord::new().with("side", 3.0);
/// let Generated::Mesh(mesh) = boxes.generate(&record)? else {
///     panic!("the build returns a mesh");
/// };
/// assert_eq!(mesh.vertex_count(), 8);
/// # Ok::<(), kerf_dsl::DslError>(())
/// ```
pub struct Generator {
    name: String,
    schema: Vec<ParamSpec>,
    build: BuildFn,
}

impl Generator {
    /// Couples a schema with its build function.
    pub fn new(
        name: impl Into<String>,
        schema: Vec<ParamSpec>,
        build: impl Fn(&ParamSet) -> Result<Generated, DslError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            schema,
            build: Box::new(build),
        }
    }

    /// The generator's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter schema, in declaration order.
    #[must_use]
    pub fn schema(&self) -> &[ParamSpec] {
        &self.schema
    }

    /// Resolves `record` against the schema and runs the build.
    ///
    /// If the record carries a grain it becomes the ambient grain for
    /// exactly this call; the previous value is restored on every exit
    /// path, including unwinding out of the build.
    pub fn generate(&self, record: &ParamRecord) -> Result<Generated, DslError> {
        let params = self.resolve(record)?;
        let _scope = match record.grain {
            Some(size) => Some(grain::scoped(Grain::new(size).map_err(ParamError::from)?)),
            None => None,
        };
        debug!(generator = %self.name, grain = ?record.grain, "generating");
        (self.build)(&params)
    }

    fn resolve(&self, record: &ParamRecord) -> Result<ParamSet, ParamError> {
        for name in record.values.keys() {
            if !self.schema.iter().any(|spec| spec.name == *name) {
                return Err(ParamError::Unknown { name: name.clone() });
            }
        }
        let mut values = BTreeMap::new();
        for spec in &self.schema {
            let value = match record.values.get(&spec.name) {
                Some(value) if value.kind() == spec.kind => value.clone(),
                Some(value) => {
                    return Err(ParamError::Kind {
                        name: spec.name.clone(),
                        expected: spec.kind,
                        found: value.kind(),
                    })
                }
                None => spec.default.clone(),
            };
            values.insert(spec.name.clone(), value);
        }
        Ok(ParamSet { values })
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
