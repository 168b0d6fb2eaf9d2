//! The masked projection handed to the JSON encoder.

use std::collections::BTreeMap;

use serde::{ser::Error as _, Serialize, Serializer};

/// A generic JSON-shaped tree produced by the builder.
///
/// Records become [`MaskedTree::Object`] keyed by output field name. Object
/// keys are kept in sorted order.
///
/// Serialization refuses non-finite floats; that is the only way encoding a
/// tree can fail.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MaskedTree {
    /// `null`
    #[default]
    Null,
    /// `true` / `false`
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A float; must be finite to encode.
    Float(f64),
    /// A string, masked or not.
    String(String),
    /// An array.
    Array(Vec<MaskedTree>),
    /// An object.
    Object(BTreeMap<String, MaskedTree>),
}

impl MaskedTree {
    /// Looks up a key when this is an object.
    pub fn get(&self, key: &str) -> Option<&MaskedTree> {
        match self {
            MaskedTree::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MaskedTree::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for `null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, MaskedTree::Null)
    }
}

impl Serialize for MaskedTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MaskedTree::Null => serializer.serialize_unit(),
            MaskedTree::Bool(value) => serializer.serialize_bool(*value),
            MaskedTree::Int(value) => serializer.serialize_i64(*value),
            MaskedTree::Uint(value) => serializer.serialize_u64(*value),
            MaskedTree::Float(value) if value.is_finite() => serializer.serialize_f64(*value),
            MaskedTree::Float(value) => Err(S::Error::custom(format_args!(
                "unsupported value: {value} is not a finite number"
            ))),
            MaskedTree::String(value) => serializer.serialize_str(value),
            MaskedTree::Array(items) => serializer.collect_seq(items),
            MaskedTree::Object(map) => serializer.collect_map(map),
        }
    }
}
