use serde_json::{Map, Value};

use crate::error::{AppError, Result};

/// Decoded, untyped feed object. Absent keys are normal, not corruption.
pub type Document = Map<String, Value>;

/// Nested object stored at `key`. `MissingField` if the key is absent or its
/// value is not an object.
pub fn extract<'a>(doc: &'a Document, key: &str) -> Result<&'a Document> {
    doc.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::MissingField(key.to_string()))
}

/// Walk a chain of nested objects. The error names the full path up to the failing key.
pub fn extract_path<'a>(doc: &'a Document, path: &[&str]) -> Result<&'a Document> {
    let mut current = doc;
    for (depth, key) in path.iter().enumerate() {
        current = extract(current, key)
            .map_err(|_| AppError::MissingField(path[..=depth].join(".")))?;
    }
    Ok(current)
}

/// Presence test only; the value itself is ignored.
pub fn has_key(doc: &Document, key: &str) -> bool {
    doc.contains_key(key)
}

pub fn required_str<'a>(doc: &'a Document, key: &str) -> Result<&'a str> {
    doc.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MissingField(key.to_string()))
}

pub fn required_u32(doc: &Document, key: &str) -> Result<u32> {
    doc.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| AppError::MissingField(key.to_string()))
}

pub fn required_i64(doc: &Document, key: &str) -> Result<i64> {
    doc.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| AppError::MissingField(key.to_string()))
}

pub fn required_bool(doc: &Document, key: &str) -> Result<bool> {
    doc.get(key)
        .and_then(Value::as_bool)
        .ok_or_else(|| AppError::MissingField(key.to_string()))
}

/// The two top-level sections every live feed payload carries.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub game_data: Document,
    pub live_data: Document,
}

impl FeedDocument {
    pub fn from_root(mut root: Document) -> Result<Self> {
        let game_data = take_section(&mut root, "gameData")?;
        let live_data = take_section(&mut root, "liveData")?;
        Ok(Self { game_data, live_data })
    }

    pub fn from_slice(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(root) => Self::from_root(root),
            other => Err(AppError::Decode(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }
}

fn take_section(root: &mut Document, key: &str) -> Result<Document> {
    match root.remove(key) {
        Some(Value::Object(section)) => Ok(section),
        _ => Err(AppError::MissingField(key.to_string())),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
