//! Identity request and response bodies

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use super::model::User;
use crate::core::validation::validators::{
    FIELD_PARAM, error, validate_is_boolean, validate_not_blank, validate_role,
};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_passwords_match", skip_on_field_errors = false))]
pub struct SignUpDto {
    #[validate(
        required(message = "Name is required"),
        custom(function = "validate_not_blank", message = "Name is required")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Role is required"),
        custom(function = "validate_role")
    )]
    pub role: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Email is not a valid e-mail address")
    )]
    pub email: Option<String>,

    #[validate(required(message = "Password is required"))]
    pub password: Option<String>,

    #[validate(required(message = "ConfirmPassword is required"))]
    pub confirm_password: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

/// `confirmPassword` must repeat `password`
///
/// Only compared when both are present; a missing one is already reported.
fn validate_passwords_match(dto: &SignUpDto) -> Result<(), ValidationError> {
    match (&dto.password, &dto.confirm_password) {
        (Some(password), Some(confirm)) if password != confirm => {
            let mut err = error("MUST_MATCH", "Passwords do not match");
            err.add_param(FIELD_PARAM.into(), &"confirm_password");
            Err(err)
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    #[validate(
        required(message = "Email is required"),
        email(message = "Email is not a valid e-mail address")
    )]
    pub email: Option<String>,

    #[validate(required(message = "Password is required"))]
    pub password: Option<String>,

    /// Optional, must be a JSON boolean when present
    #[validate(custom(function = "validate_is_boolean"))]
    pub is_persistent: Option<Value>,
}

/// Response of a successful sign-up or login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
