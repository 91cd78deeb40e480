//! Conversion between document formats and option values.
//!
//! JSON, YAML and TOML documents are turned into plain [`Value`] trees, which
//! [`Options`] then wraps. Lists become maps keyed `0..n`, so the usual merge
//! rules (integer keys append) apply to them.

use crate::options::Options;
use crate::types::{OptionKey, OptionsError, Scalar, Value};
use indexmap::IndexMap;
use yaml_rust2::Yaml;

/// Convert a JSON value.
///
/// Integers must fit in an `i64`; larger ones are rejected rather than
/// rounded to a float.
pub fn value_from_json(json: serde_json::Value) -> Result<Value, OptionsError> {
    let value = match json {
        serde_json::Value::Null => Value::NULL,
        serde_json::Value::Bool(b) => Value::from(b),
        serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Value::from(i),
            (None, Some(f)) if n.is_f64() => Value::from(f),
            _ => {
                return Err(OptionsError::invalid(format!(
                    "JSON number {} does not fit in a 64-bit signed integer",
                    n
                )));
            }
        },
        serde_json::Value::String(s) => Value::from(s),
        serde_json::Value::Array(items) => Value::Map(
            (0..)
                .zip(items)
                .map(|(index, item)| value_from_json(item).map(|value| (OptionKey::Index(index), value)))
                .collect::<Result<_, OptionsError>>()?,
        ),
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, item)| value_from_json(item).map(|value| (OptionKey::from(key), value)))
                .collect::<Result<_, OptionsError>>()?,
        ),
    };
    Ok(value)
}

/// Build options from a JSON object or array.
pub fn from_json(json: serde_json::Value) -> Result<Options, OptionsError> {
    root_options(value_from_json(json)?, "JSON")
}

/// Convert a YAML node.
///
/// Aliases and unparseable values are rejected, as are map keys that are
/// neither strings nor integers.
pub fn value_from_yaml(yaml: &Yaml) -> Result<Value, OptionsError> {
    let value = match yaml {
        Yaml::Null => Value::NULL,
        Yaml::Boolean(b) => Value::from(*b),
        Yaml::Integer(i) => Value::from(*i),
        Yaml::Real(text) => match yaml.as_f64() {
            Some(f) => Value::from(f),
            None => return Err(OptionsError::invalid(format!("invalid YAML real `{}`", text))),
        },
        Yaml::String(s) => Value::from(s.as_str()),
        Yaml::Array(items) => {
            let mut map = IndexMap::with_capacity(items.len());
            for (index, item) in (0..).zip(items) {
                map.insert(OptionKey::Index(index), value_from_yaml(item)?);
            }
            Value::Map(map)
        }
        Yaml::Hash(hash) => {
            let mut map = IndexMap::with_capacity(hash.len());
            for (key, item) in hash {
                map.insert(yaml_key(key)?, value_from_yaml(item)?);
            }
            Value::Map(map)
        }
        Yaml::Alias(_) => return Err(OptionsError::invalid("YAML aliases are not supported")),
        Yaml::BadValue => return Err(OptionsError::invalid("invalid YAML value")),
    };
    Ok(value)
}

fn yaml_key(key: &Yaml) -> Result<OptionKey, OptionsError> {
    match key {
        Yaml::String(s) => Ok(OptionKey::from(s.as_str())),
        Yaml::Integer(i) => Ok(OptionKey::Index(*i)),
        other => Err(OptionsError::invalid(format!(
            "unsupported YAML key {:?}, expected a string or an integer",
            other
        ))),
    }
}

/// Build options from a YAML mapping or sequence. A null document is empty.
pub fn from_yaml(yaml: &Yaml) -> Result<Options, OptionsError> {
    if yaml.is_null() {
        return Ok(Options::default());
    }
    root_options(value_from_yaml(yaml)?, "YAML")
}

/// Convert a TOML value. Datetimes are kept in their TOML spelling.
pub fn value_from_toml(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::from(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::from(b),
        toml::Value::Datetime(datetime) => Value::from(datetime.to_string()),
        toml::Value::Array(items) => Value::Map(
            (0..)
                .zip(items)
                .map(|(index, item)| (OptionKey::Index(index), value_from_toml(item)))
                .collect(),
        ),
        toml::Value::Table(table) => Value::Map(table_entries(table)),
    }
}

fn table_entries(table: toml::Table) -> IndexMap<OptionKey, Value> {
    table
        .into_iter()
        .map(|(key, item)| (OptionKey::from(key), value_from_toml(item)))
        .collect()
}

/// Build options from a TOML table.
pub fn from_toml(table: toml::Table) -> Options {
    Options::from(table_entries(table))
}

/// Serialize options into a JSON value. Integer keys become strings.
pub fn to_json(options: &Options) -> Result<serde_json::Value, OptionsError> {
    serde_json::to_value(options).map_err(|e| OptionsError::invalid(e.to_string()))
}

fn root_options(value: Value, format: &str) -> Result<Options, OptionsError> {
    match value {
        Value::Map(map) => Ok(Options::from(map)),
        Value::Scalar(scalar) => Err(OptionsError::invalid(format!(
            "{} root must be a mapping or a list, found {}",
            format,
            describe(&scalar)
        ))),
    }
}

fn describe(scalar: &Scalar) -> &'static str {
    match scalar {
        Scalar::Null => "null",
        Scalar::Bool(_) => "a boolean",
        Scalar::Int(_) => "an integer",
        Scalar::Float(_) => "a float",
        Scalar::String(_) => "a string",
    }
}
