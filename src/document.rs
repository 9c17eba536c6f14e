//! Decoding YAML text into a JSON value tree and encoding it back out.
//!
//! The tree goes through `serde_yaml::Value` first instead of deserializing
//! straight into `serde_json::Value`, so that merge keys are resolved and
//! scalar mapping keys (`1: one`) are accepted the way YAML loaders usually
//! present them to JSON.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use tracing::trace;

use crate::Error;

/// Parses a single YAML document. An empty document decodes to `null`.
pub fn decode(text: &str) -> Result<Value, Error> {
    let mut yaml: YamlValue = serde_yaml::from_str(text)?;
    yaml.apply_merge()?;
    to_json(&yaml)
}

/// Pretty-prints with two-space indentation and no trailing newline.
pub fn encode(value: &Value) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn to_json(yaml: &YamlValue) -> Result<Value, Error> {
    Ok(match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => number(n),
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(seq) => {
            Value::Array(seq.iter().map(to_json).collect::<Result<_, _>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(key_string(key)?, to_json(value)?);
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => {
            trace!(tag = %tagged.tag, "dropping tag");
            to_json(&tagged.value)?
        }
    })
}

// JSON has no NaN or infinity.
fn number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

// Float keys read the way JavaScript prints numbers: `1.0` is "1",
// `.inf` is "Infinity".
fn number_key(n: &serde_yaml::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_nan() => "NaN".to_string(),
        Some(f) if n.is_f64() && f.is_infinite() && f > 0.0 => "Infinity".to_string(),
        Some(f) if n.is_f64() && f.is_infinite() => "-Infinity".to_string(),
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

fn key_string(key: &YamlValue) -> Result<String, Error> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(number_key(n)),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => key_string(&tagged.value),
        YamlValue::Sequence(_) => Err(Error::UnsupportedKey("sequence".to_string())),
        YamlValue::Mapping(_) => Err(Error::UnsupportedKey("mapping".to_string())),
    }
}
