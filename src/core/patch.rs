//! JSON Patch (RFC 6902) documents applied to update DTOs
//!
//! Partial updates load the current state of an entity into its update DTO,
//! apply the patch to the DTO's JSON form, deserialize it back and validate
//! the result before anything is persisted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{ApiError, ApiResult, ValidationError};

/// One operation of a JSON Patch document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered list of patch operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    /// Apply every operation in order; the target is left untouched on error
    pub fn apply(&self, target: &Value) -> Result<Value, String> {
        let mut doc = target.clone();
        for op in &self.0 {
            apply_operation(&mut doc, op)?;
        }
        Ok(doc)
    }

    /// Patch a DTO through its JSON representation
    pub fn apply_to<T>(&self, dto: &T) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let current = serde_json::to_value(dto)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize patch target: {}", e)))?;
        let patched = self
            .apply(&current)
            .map_err(|message| ValidationError::InvalidPatch { message })?;
        serde_json::from_value(patched).map_err(|e| {
            ValidationError::InvalidPatch {
                message: e.to_string(),
            }
            .into()
        })
    }
}

fn apply_operation(doc: &mut Value, op: &PatchOperation) -> Result<(), String> {
    match op {
        PatchOperation::Add { path, value } => add(doc, path, value.clone()),
        PatchOperation::Remove { path } => remove(doc, path).map(|_| ()),
        PatchOperation::Replace { path, value } => {
            let slot = doc
                .pointer_mut(path)
                .ok_or_else(|| format!("path '{}' does not exist", path))?;
            *slot = value.clone();
            Ok(())
        }
        PatchOperation::Move { from, path } => {
            if path.starts_with(&format!("{}/", from)) {
                return Err(format!("cannot move '{}' into its own child '{}'", from, path));
            }
            let value = remove(doc, from)?;
            add(doc, path, value)
        }
        PatchOperation::Copy { from, path } => {
            let value = doc
                .pointer(from)
                .cloned()
                .ok_or_else(|| format!("path '{}' does not exist", from))?;
            add(doc, path, value)
        }
        PatchOperation::Test { path, value } => match doc.pointer(path) {
            Some(current) if json_eq(current, value) => Ok(()),
            Some(_) => Err(format!("test failed at '{}'", path)),
            None => Err(format!("path '{}' does not exist", path)),
        },
    }
}

/// Structural equality where numbers compare by value (`1` equals `1.0`)
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| json_eq(v, other)))
        }
        _ => a == b,
    }
}

/// Split a pointer into its parent pointer and unescaped last token
fn split_pointer(path: &str) -> Result<(&str, String), String> {
    if !path.starts_with('/') {
        return Err(format!("invalid pointer '{}'", path));
    }
    let idx = path.rfind('/').unwrap_or(0);
    let token = path[idx + 1..].replace("~1", "/").replace("~0", "~");
    Ok((&path[..idx], token))
}

fn add(doc: &mut Value, path: &str, value: Value) -> Result<(), String> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent, token) = split_pointer(path)?;
    match doc.pointer_mut(parent) {
        Some(Value::Object(map)) => {
            map.insert(token, value);
            Ok(())
        }
        Some(Value::Array(items)) => {
            if token == "-" {
                items.push(value);
                return Ok(());
            }
            let index: usize = token
                .parse()
                .map_err(|_| format!("invalid array index '{}'", token))?;
            if index > items.len() {
                return Err(format!("array index {} out of bounds", index));
            }
            items.insert(index, value);
            Ok(())
        }
        Some(_) => Err(format!("parent of '{}' is not a container", path)),
        None => Err(format!("path '{}' does not exist", parent)),
    }
}

fn remove(doc: &mut Value, path: &str) -> Result<Value, String> {
    let (parent, token) = split_pointer(path)?;
    match doc.pointer_mut(parent) {
        Some(Value::Object(map)) => map
            .remove(&token)
            .ok_or_else(|| format!("path '{}' does not exist", path)),
        Some(Value::Array(items)) => {
            let index: usize = token
                .parse()
                .map_err(|_| format!("invalid array index '{}'", token))?;
            if index >= items.len() {
                return Err(format!("array index {} out of bounds", index));
            }
            Ok(items.remove(index))
        }
        _ => Err(format!("path '{}' does not exist", path)),
    }
}
