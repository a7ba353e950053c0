//! Reusable field validators
//!
//! Custom rules referenced from `#[validate(custom(...))]` attributes, plus
//! the conversion from `validator` reports into API field errors.

use std::borrow::Cow;

use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::auth::model::Role;
use crate::core::error::FieldValidationError;

/// Param naming the field a struct-level (`schema`) error belongs to
pub const FIELD_PARAM: &str = "field";

/// Flatten a validation report into sorted, camelCased field errors
///
/// Struct-level errors land under `__all__`; they are reported on the field
/// named by their [`FIELD_PARAM`] param when one is set.
pub fn collect_errors(errors: &ValidationErrors) -> Vec<FieldValidationError> {
    let mut fields: Vec<FieldValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(move |e| {
                    let name = e
                        .params
                        .get(FIELD_PARAM)
                        .and_then(Value::as_str)
                        .unwrap_or(field.as_str());
                    FieldValidationError::new(camel_case(name), describe(e))
                })
                .collect::<Vec<_>>()
        })
        .collect();
    sort_errors(&mut fields);
    fields
}

/// Order field errors by field, then message
pub fn sort_errors(fields: &mut [FieldValidationError]) {
    fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => error.code.to_string(),
    }
}

/// `confirm_password` -> `confirmPassword`
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub(crate) fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validator: value has at least one non-whitespace character
#[allow(clippy::ptr_arg)]
pub fn validate_not_blank(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("BLANK", "Value must not be blank"))
    } else {
        Ok(())
    }
}

/// Validator: value names a known role
#[allow(clippy::ptr_arg)]
pub fn validate_role(value: &String) -> Result<(), ValidationError> {
    match value.parse::<Role>() {
        Ok(_) => Ok(()),
        Err(_) => Err(error("INVALID_ROLE", "Role must be one of Admin, Manager, Customer")),
    }
}

/// Validator: value is a JSON boolean
pub fn validate_is_boolean(value: &Value) -> Result<(), ValidationError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(error("IS_NOT_BOOLEAN", "IS_NOT_BOOLEAN"))
    }
}
