//! Core type definitions for hierarchical options.

use crate::options::Options;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Key of an entry in an [`Options`] node.
///
/// Keys are either integer indices (list-like entries, appended with
/// [`Options::push`]) or names. A string that spells a canonical decimal
/// integer (`"0"`, `"17"`, `"-3"`) is normalized to an index, so `"1"` and
/// `1` address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    /// Integer key
    Index(i64),
    /// String key
    Name(String),
}

impl OptionKey {
    /// Build a key from a string, normalizing canonical integers to indices.
    pub fn parse(key: &str) -> Self {
        if is_canonical_integer(key) {
            if let Ok(index) = key.parse::<i64>() {
                return OptionKey::Index(index);
            }
        }
        OptionKey::Name(key.to_string())
    }

    /// Turn a `Name` spelling a canonical integer into the matching `Index`.
    ///
    /// Keys built through `From` are already normalized; this catches
    /// `OptionKey::Name` values constructed directly.
    pub fn normalize(self) -> Self {
        match self {
            OptionKey::Name(name) if is_canonical_integer(&name) => OptionKey::parse(&name),
            key => key,
        }
    }

    /// True for non-negative integer keys, the ones merged with append semantics.
    pub fn is_index(&self) -> bool {
        matches!(self, OptionKey::Index(i) if *i >= 0)
    }

    /// Get the key as a string slice if it is a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            OptionKey::Name(name) => Some(name),
            OptionKey::Index(_) => None,
        }
    }

    /// Get the key as an integer if it is an index.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            OptionKey::Index(i) => Some(*i),
            OptionKey::Name(_) => None,
        }
    }
}

/// `"0"`, `"12"`, `"-4"` but not `"-0"`, `"007"`, `"+1"` or `""`.
fn is_canonical_integer(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits.starts_with('0') {
        return digits == "0" && !key.starts_with('-');
    }
    true
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Index(i) => write!(f, "{}", i),
            OptionKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for OptionKey {
    fn from(key: &str) -> Self {
        OptionKey::parse(key)
    }
}

impl From<String> for OptionKey {
    fn from(key: String) -> Self {
        OptionKey::Name(key).normalize()
    }
}

impl From<&String> for OptionKey {
    fn from(key: &String) -> Self {
        OptionKey::parse(key)
    }
}

impl From<&OptionKey> for OptionKey {
    fn from(key: &OptionKey) -> Self {
        key.clone()
    }
}

impl From<i64> for OptionKey {
    fn from(index: i64) -> Self {
        OptionKey::Index(index)
    }
}

impl From<i32> for OptionKey {
    fn from(index: i32) -> Self {
        OptionKey::Index(i64::from(index))
    }
}

impl TryFrom<usize> for OptionKey {
    type Error = OptionsError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        i64::try_from(index)
            .map(OptionKey::Index)
            .map_err(|_| OptionsError::invalid(format!("index {} does not fit in an option key", index)))
    }
}

impl Serialize for OptionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionKey::Index(i) => serializer.serialize_i64(*i),
            OptionKey::Name(name) => serializer.serialize_str(name),
        }
    }
}

/// Atomic option values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Null and the empty string may be overwritten by [`Options::defaults`].
    pub fn is_replaceable(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            Scalar::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

/// A plain nested mapping: the input of [`Options::new`] and the output of
/// [`Options::to_map`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Map(IndexMap<OptionKey, Value>),
}

impl Value {
    /// Shorthand for `Value::Scalar(Scalar::Null)`.
    pub const NULL: Value = Value::Scalar(Scalar::Null);

    /// Create an empty map value.
    pub fn empty_map() -> Self {
        Value::Map(IndexMap::new())
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            Value::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<OptionKey, Value>> {
        match self {
            Value::Map(map) => Some(map),
            Value::Scalar(_) => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::NULL
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(scalar) => scalar.serialize(serializer),
            Value::Map(map) => serializer.collect_map(map),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<IndexMap<OptionKey, Value>> for Value {
    fn from(map: IndexMap<OptionKey, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Options> for Value {
    fn from(options: Options) -> Self {
        Value::Map(options.into_map())
    }
}

impl From<&Options> for Value {
    fn from(options: &Options) -> Self {
        Value::Map(options.to_map())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::NULL, Into::into)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value.into())
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    u32 => Int,
    f64 => Float,
    &str => String,
    String => String,
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::NULL
    }
}

/// A value stored inside an [`Options`] node.
///
/// Nested mappings are always wrapped into a child node; there is no variant
/// holding a raw map.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Scalar(Scalar),
    Node(Options),
}

impl OptionValue {
    /// Wrap a plain value, building child nodes for nested maps.
    pub(crate) fn wrap(value: Value, allow_modifications: bool) -> Self {
        match value {
            Value::Scalar(scalar) => OptionValue::Scalar(scalar),
            Value::Map(map) => OptionValue::Node(Options::new(map, allow_modifications)),
        }
    }

    /// Deep copy back into a plain value.
    pub fn to_value(&self) -> Value {
        match self {
            OptionValue::Scalar(scalar) => Value::Scalar(scalar.clone()),
            OptionValue::Node(node) => Value::Map(node.to_map()),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            OptionValue::Scalar(scalar) => Value::Scalar(scalar),
            OptionValue::Node(node) => Value::Map(node.into_map()),
        }
    }

    /// Null and the empty string; nodes are never replaceable.
    pub fn is_replaceable(&self) -> bool {
        match self {
            OptionValue::Scalar(scalar) => scalar.is_replaceable(),
            OptionValue::Node(_) => false,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, OptionValue::Node(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            OptionValue::Scalar(scalar) => Some(scalar),
            OptionValue::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Options> {
        match self {
            OptionValue::Node(node) => Some(node),
            OptionValue::Scalar(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Scalar(Scalar::Null))
    }
}

impl From<Scalar> for OptionValue {
    fn from(scalar: Scalar) -> Self {
        OptionValue::Scalar(scalar)
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Scalar(scalar) => scalar.serialize(serializer),
            OptionValue::Node(node) => node.serialize(serializer),
        }
    }
}

/// The mutating operation rejected by a locked node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Set,
    Push,
    Unset,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mutation::Set => "set",
            Mutation::Push => "push",
            Mutation::Unset => "unset",
        })
    }
}

/// Errors that can occur during options operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    /// A mutation was attempted on a locked node.
    #[error("Option is read only: cannot {operation} `{key}`")]
    ReadOnly {
        /// The rejected operation
        operation: Mutation,
        /// Key the operation targeted (the appended index for pushes)
        key: OptionKey,
    },

    /// Input could not be turned into options.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl OptionsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        OptionsError::InvalidArgument {
            message: message.into(),
        }
    }

    /// True when the error is a permission violation on a locked node.
    pub fn is_read_only(&self) -> bool {
        matches!(self, OptionsError::ReadOnly { .. })
    }
}
