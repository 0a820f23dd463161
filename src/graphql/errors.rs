use std::collections::BTreeMap;

use async_graphql::*;
use serde_json::json;
use tracing::error;

use crate::errors::{CoreError, CoreErrorKind, FieldErrors};

/// Structured error builder for consistent error handling
pub struct StructuredError;

impl StructuredError {
    /// Create a "not found" error carrying the entity and id
    pub fn not_found(message: impl Into<String>, fields: &BTreeMap<String, String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "NOT_FOUND");
            for (key, value) in fields {
                e.set(key.as_str(), value.as_str());
            }
        })
    }

    /// Create an "unauthorized" error
    pub fn unauthorized(message: impl Into<String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "UNAUTHORIZED");
        })
    }

    /// Create a "validation failed" error with per-field messages
    pub fn validation(message: impl Into<String>, fields: &FieldErrors) -> Error {
        let fields = Value::from_json(json!(fields)).unwrap_or(Value::Null);
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "VALIDATION_FAILED");
            e.set("fields", fields);
        })
    }

    /// Create an "internal error"
    pub fn internal(message: impl Into<String>) -> Error {
        Error::new(message.into()).extend_with(|_, e| {
            e.set("code", "INTERNAL_ERROR");
        })
    }
}

pub fn core_error_to_graphql_error(err: CoreError) -> Error {
    match err.kind() {
        CoreErrorKind::NotFound => {
            StructuredError::not_found(err.message(), err.fields().unwrap_or(&BTreeMap::new()))
        }
        CoreErrorKind::Unauthorized => StructuredError::unauthorized(err.message()),
        CoreErrorKind::Validation => {
            StructuredError::validation(err.message(), err.field_errors().unwrap_or(&FieldErrors::new()))
        }
        CoreErrorKind::Internal => {
            error!(error = ?err, "Request failed");
            StructuredError::internal(err.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extension(error: &Error, key: &str) -> Option<Value> {
        error.extensions.as_ref().and_then(|ext| ext.get(key).cloned())
    }

    #[test]
    fn not_found_exposes_entity_and_id() {
        let error = core_error_to_graphql_error(CoreError::not_found("Recipe", 3));
        assert_eq!(error.message, "No Recipe matches the given query.");
        assert_eq!(extension(&error, "code"), Some(Value::from("NOT_FOUND")));
        assert_eq!(extension(&error, "entity"), Some(Value::from("Recipe")));
        assert_eq!(extension(&error, "id"), Some(Value::from("3")));
    }

    #[test]
    fn validation_lists_messages_per_field() {
        let error = core_error_to_graphql_error(CoreError::field("name", "This field may not be blank."));
        assert_eq!(extension(&error, "code"), Some(Value::from("VALIDATION_FAILED")));

        let fields = extension(&error, "fields").unwrap().into_json().unwrap();
        assert_eq!(fields, json!({"name": ["This field may not be blank."]}));
    }

    #[test]
    fn unauthorized_keeps_the_message() {
        let error = core_error_to_graphql_error(CoreError::unauthorized());
        assert_eq!(error.message, "Authentication credentials were not provided");
        assert_eq!(extension(&error, "code"), Some(Value::from("UNAUTHORIZED")));
    }
}
