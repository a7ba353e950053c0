//! Relationship-aware field visibility for JSON responses
//!
//! Catalog entities carry relationship properties (`address`, `sessions`,
//! `movie`, ...) next to their scalar fields. Emitting them blindly would
//! serialize whole object graphs, so every response goes through a
//! [`FieldVisibility`] filter built from a keep-list:
//!
//! - scalar properties are always emitted
//! - a relationship property is emitted only when its name is on the
//!   keep-list (compared case-insensitively) and it was actually loaded
//!
//! The filter recurses into nested objects and arrays so a loaded `cinema`
//! inside a session is filtered with the same rules.

use serde::Serialize;
use serde_json::{Map, Value};

use super::entity::Entity;
use super::error::{ApiError, ApiResult};

/// Keep-list driven filter over serialized entities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldVisibility {
    keep: Vec<String>,
}

impl FieldVisibility {
    /// Build a filter keeping the given relationship names
    pub fn new<I, S>(keep: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keep: Vec<String> = keep
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();
        keep.sort();
        keep.dedup();
        Self { keep }
    }

    /// Combine two keep-lists (e.g. server defaults and `include`)
    pub fn merged(&self, other: &FieldVisibility) -> Self {
        Self::new(self.keep.iter().chain(other.keep.iter()))
    }

    /// Whether the relationship with this name should be emitted
    pub fn keeps(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.keep.iter().any(|k| *k == name)
    }

    /// Strip relationship properties that are not kept
    pub fn apply(&self, value: Value, relations: &[&str]) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.filter_object(map, relations)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.apply(item, relations))
                    .collect(),
            ),
            other => other,
        }
    }

    fn filter_object(&self, map: Map<String, Value>, relations: &[&str]) -> Map<String, Value> {
        map.into_iter()
            .filter_map(|(name, value)| {
                let is_relation = relations.iter().any(|r| r.eq_ignore_ascii_case(&name));
                if !is_relation {
                    return Some((name, value));
                }
                if !self.keeps(&name) || value.is_null() {
                    return None;
                }
                Some((name, self.apply(value, relations)))
            })
            .collect()
    }

    /// Serialize an entity and filter it
    pub fn render<T: Entity>(&self, entity: &T, relations: &[&str]) -> ApiResult<Value> {
        let value = serde_json::to_value(entity).map_err(response_error)?;
        Ok(self.apply(value, relations))
    }

    /// Serialize a list of entities and filter each item
    pub fn render_all<T: Serialize>(&self, entities: &[T], relations: &[&str]) -> ApiResult<Value> {
        let value = serde_json::to_value(entities).map_err(response_error)?;
        Ok(self.apply(value, relations))
    }
}

/// Entities that cannot be serialized are a server fault, not a bad request
fn response_error(err: serde_json::Error) -> ApiError {
    ApiError::Internal(format!("Failed to serialize response: {}", err))
}
