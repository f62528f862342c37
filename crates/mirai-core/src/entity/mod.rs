//! Typed entities and the JSON codec that maps them to and from the wire.
//!
//! Concrete entity types are generated by the `entity!` macro, which emits
//! the struct, its `Schema`, and `Entity`/`Wire` impls that walk that schema.
//! Polymorphic families (`Message`, `Event`, `MessageElement`) are enums
//! generated by `family!`, dispatching on the `type` tag through a registry
//! built once per family.
//!
//! Field values follow their declared kind:
//! - entities encode via their own `to_json`
//! - `Vec<T>` encodes element-wise
//! - `Option<T>` is the union `T | absent`, resolved by structural match
//! - integers, strings, and booleans pass through

#[macro_use]
mod macros;

pub mod common;
pub mod element;
pub mod event;
pub mod message;
pub mod naming;
pub mod schema;

use serde_json::Value;

use crate::error::{MiraiError, Result};
use schema::{json_type_name, resolve_union, FieldKind, ScalarKind};

pub use common::{Client, Friend, Group, Member};
pub use element::*;
pub use event::*;
pub use message::*;

/// A value with a JSON object (or array) representation on the wire.
pub trait Entity: Sized {
    fn to_json(&self) -> Value;
    fn from_json(value: &Value) -> Result<Self>;
}

/// Anything that may appear as an entity field.
pub trait Wire: Sized {
    /// Declared kind, used by schemas and union resolution.
    fn kind() -> FieldKind;
    fn encode(&self) -> Value;
    fn decode(value: &Value) -> Result<Self>;
}

fn mismatch(expected: ScalarKind, value: &Value) -> MiraiError {
    MiraiError::TypeMismatch {
        expected: expected.as_str().to_owned(),
        found: json_type_name(value),
    }
}

impl Wire for i64 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Integer)
    }

    fn encode(&self) -> Value {
        Value::from(*self)
    }

    fn decode(value: &Value) -> Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| mismatch(ScalarKind::Integer, value))
    }
}

impl Wire for String {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::String)
    }

    fn encode(&self) -> Value {
        Value::String(self.clone())
    }

    fn decode(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch(ScalarKind::String, value))
    }
}

impl Wire for bool {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Boolean)
    }

    fn encode(&self) -> Value {
        Value::Bool(*self)
    }

    fn decode(value: &Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| mismatch(ScalarKind::Boolean, value))
    }
}

impl<T: Wire> Wire for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Sequence(Box::new(T::kind()))
    }

    fn encode(&self) -> Value {
        Value::Array(self.iter().map(Wire::encode).collect())
    }

    fn decode(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| MiraiError::TypeMismatch {
            expected: Self::kind().to_string(),
            found: json_type_name(value),
        })?;
        items.iter().map(T::decode).collect()
    }
}

/// `T | absent`, in that declaration order.
impl<T: Wire> Wire for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Union(vec![T::kind(), FieldKind::Scalar(ScalarKind::Absent)])
    }

    fn encode(&self) -> Value {
        match self {
            Some(inner) => inner.encode(),
            None => Value::Null,
        }
    }

    fn decode(value: &Value) -> Result<Self> {
        let alternatives = [T::kind(), FieldKind::Scalar(ScalarKind::Absent)];
        match resolve_union(&alternatives, value)? {
            0 => T::decode(value).map(Some),
            _ => Ok(None),
        }
    }
}
