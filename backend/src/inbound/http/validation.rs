//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies use `Option` fields so a missing value is reported as
//! `missing_field` with the field name rather than as a serde error string.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    AuthValidationError, Category, ComplaintValidationError, Error, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn field_error_with_value(field: &str, code: &str, value: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField.as_str(),
        format!("missing required field: {field}"),
    )
}

/// Unwrap an optional body field or fail with `missing_field`.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    field_error_with_value(
        field,
        ErrorCode::InvalidUuid.as_str(),
        value,
        format!("{field} must be a valid UUID"),
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

fn complaint_value_error(err: &ComplaintValidationError, value: &str) -> Error {
    field_error_with_value(err.field(), err.code(), value, err.to_string())
}

pub(crate) fn parse_category(value: &str) -> Result<Category, Error> {
    value
        .parse::<Category>()
        .map_err(|err| complaint_value_error(&err, value))
}

/// Map login/registration validation failures to field-level errors.
pub(crate) fn auth_validation_error(err: &AuthValidationError) -> Error {
    let (field, code) = match err {
        AuthValidationError::EmptyEmail => ("email", "empty_email"),
        AuthValidationError::EmptyPassword => ("password", "empty_password"),
        AuthValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
        AuthValidationError::User(inner) => match inner {
            UserValidationError::EmptyName => ("name", "empty_name"),
            UserValidationError::NameTooLong { .. } => ("name", "name_too_long"),
            UserValidationError::InvalidEmail => ("email", "invalid_email"),
            UserValidationError::InvalidId | UserValidationError::UnknownRole { .. } => {
                ("user", "invalid_user")
            }
        },
    };
    field_error(field, code, err.to_string())
}
