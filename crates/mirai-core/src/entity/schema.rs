//! Per-type schema descriptors and structural union resolution.
//!
//! Every entity type owns one `Schema`, built on first use: its type name,
//! whether it carries a `type` tag, and the ordered list of fields with their
//! wire names and declared kinds. Decoding walks the descriptor instead of
//! reflecting over the type.

use std::fmt;

use serde_json::{Map, Value};

use crate::entity::naming;
use crate::error::{MiraiError, Result};

/// Name of the discriminator field on tagged entities.
pub const TAG_FIELD: &str = "type";

static ABSENT: Value = Value::Null;

/// Runtime type of a scalar wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    String,
    Boolean,
    Absent,
}

impl ScalarKind {
    /// Scalar kind of `value`, `None` for floats, arrays, and objects.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(ScalarKind::Absent),
            Value::Bool(_) => Some(ScalarKind::Boolean),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(ScalarKind::Integer),
            Value::String(_) => Some(ScalarKind::String),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Integer => "integer",
            ScalarKind::String => "string",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Absent => "absent",
        }
    }
}

/// Declared kind of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Another entity, by type name.
    Entity(&'static str),
    /// Ordered sequence of the inner kind.
    Sequence(Box<FieldKind>),
    /// Closed set of alternatives, tried in declaration order.
    Union(Vec<FieldKind>),
}

impl FieldKind {
    /// Whether `value` is a structural candidate for this kind.
    ///
    /// Entities accept any object or array; scalars require an exact
    /// runtime type match.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Scalar(kind) => ScalarKind::of(value) == Some(*kind),
            FieldKind::Entity(_) => value.is_object() || value.is_array(),
            FieldKind::Sequence(_) => value.is_array(),
            FieldKind::Union(alternatives) => alternatives.iter().any(|alt| alt.accepts(value)),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => f.write_str(kind.as_str()),
            FieldKind::Entity(name) => f.write_str(name),
            FieldKind::Sequence(inner) => write!(f, "list[{inner}]"),
            FieldKind::Union(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
        }
    }
}

/// Index of the first alternative that structurally accepts `value`.
///
/// Two entity alternatives both accept any object, so the earlier one always
/// wins; nothing here tries to tell co-shaped entities apart.
pub fn first_candidate(alternatives: &[FieldKind], value: &Value) -> Option<usize> {
    alternatives.iter().position(|alt| alt.accepts(value))
}

/// Like `first_candidate`, but reports a decode fault when nothing matches.
pub fn resolve_union(alternatives: &[FieldKind], value: &Value) -> Result<usize> {
    first_candidate(alternatives, value).ok_or_else(|| MiraiError::NoUnionCandidate {
        union: FieldKind::Union(alternatives.to_vec()).to_string(),
        found: json_type_name(value),
    })
}

/// Human-readable JSON type of `value`, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read the `type` tag of a family member.
pub fn read_tag<'v>(value: &'v Value, family: &'static str) -> Result<&'v str> {
    let obj = value.as_object().ok_or_else(|| MiraiError::TypeMismatch {
        expected: family.to_owned(),
        found: json_type_name(value),
    })?;
    obj.get(TAG_FIELD)
        .and_then(Value::as_str)
        .ok_or(MiraiError::MissingTag(family))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tagging {
    /// `{type: <TypeName>, ...fields}`
    Tagged,
    /// `{...fields}`
    Untagged,
}

/// One field of a schema.
#[derive(Debug, Clone)]
pub struct FieldDesc {
    name: &'static str,
    wire_name: String,
    kind: FieldKind,
}

impl FieldDesc {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    type_name: &'static str,
    tagging: Tagging,
    fields: Vec<FieldDesc>,
}

impl Schema {
    pub fn new(
        type_name: &'static str,
        tagging: Tagging,
        fields: Vec<(&'static str, FieldKind)>,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, kind)| FieldDesc {
                name,
                wire_name: naming::to_wire(name),
                kind,
            })
            .collect();
        Self {
            type_name,
            tagging,
            fields,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Tag written to and expected on the wire, if any.
    pub fn tag(&self) -> Option<&'static str> {
        match self.tagging {
            Tagging::Tagged => Some(self.type_name),
            Tagging::Untagged => None,
        }
    }

    pub fn fields(&self) -> &[FieldDesc] {
        &self.fields
    }

    /// Fresh output object, pre-filled with the tag when tagged.
    pub fn start_object(&self) -> Map<String, Value> {
        let mut obj = Map::new();
        if let Some(tag) = self.tag() {
            obj.insert(TAG_FIELD.to_owned(), Value::String(tag.to_owned()));
        }
        obj
    }

    /// Check that `value` is an object of this type (tag included) and open it.
    pub fn open<'v>(&self, value: &'v Value) -> Result<&'v Map<String, Value>> {
        let obj = value.as_object().ok_or_else(|| MiraiError::TypeMismatch {
            expected: self.type_name.to_owned(),
            found: json_type_name(value),
        })?;
        if let Some(expected) = self.tag() {
            let found = obj
                .get(TAG_FIELD)
                .and_then(Value::as_str)
                .ok_or(MiraiError::MissingTag(self.type_name))?;
            if found != expected {
                return Err(MiraiError::TagMismatch {
                    expected,
                    found: found.to_owned(),
                });
            }
        }
        Ok(obj)
    }

    /// Wire value of `field`; a missing key reads as absent (`null`).
    pub fn value_of<'v>(&self, obj: &'v Map<String, Value>, field: &FieldDesc) -> &'v Value {
        obj.get(field.wire_name()).unwrap_or(&ABSENT)
    }

    /// Decode the field the generated code is currently positioned on.
    pub fn decode_next<T: super::Wire>(
        &self,
        obj: &Map<String, Value>,
        field: Option<&FieldDesc>,
    ) -> Result<T> {
        let field = field.ok_or_else(|| {
            MiraiError::MalformedFrame(format!("schema of {} is out of sync", self.type_name))
        })?;
        T::decode(self.value_of(obj, field))
    }
}
