//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (bad JSON, bad path or query segments) are rewritten
//! into `invalid_request` domain errors so every 400 carries the same JSON
//! payload and trace identifier as handler-raised errors.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{Error, ListingFields, ListingId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidListingId,
    InvalidBody,
    InvalidJson,
    InvalidPath,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidListingId => "invalid_listing_id",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidPath => "invalid_path",
            ErrorCode::InvalidQuery => "invalid_query",
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

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) const ID_PARAM: FieldName = FieldName::new("id");
pub(crate) const BODY: FieldName = FieldName::new("body");

pub(crate) fn invalid_listing_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("{field} must be a 24 character hexadecimal listing id"),
    )
    .with_value(ErrorCode::InvalidListingId, value)
}

pub(crate) fn parse_listing_id(value: String, field: FieldName) -> Result<ListingId, Error> {
    ListingId::parse(&value).map_err(|_| invalid_listing_id_error(field, &value))
}

/// Accept only JSON objects as listing bodies.
pub(crate) fn listing_fields(value: Value, field: FieldName) -> Result<ListingFields, Error> {
    match value {
        Value::Object(map) => Ok(ListingFields::new(map)),
        _ => {
            let field = field.as_str();
            Err(ValidationError::new(field, format!("{field} must be a JSON object"))
                .with_code(ErrorCode::InvalidBody))
        }
    }
}

/// `JsonConfig` error handler.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting request body");
    ValidationError::new(BODY.as_str(), format!("request body is not valid JSON: {err}"))
        .with_code(ErrorCode::InvalidJson)
        .into()
}

/// `PathConfig` error handler.
pub(crate) fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting path parameters");
    ValidationError::new("path", format!("invalid path parameters: {err}"))
        .with_code(ErrorCode::InvalidPath)
        .into()
}

/// `QueryConfig` error handler.
pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting query string");
    ValidationError::new("query", format!("invalid query string: {err}"))
        .with_code(ErrorCode::InvalidQuery)
        .into()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode as ApiErrorCode;

    #[rstest]
    fn malformed_id_reports_field_value_and_code() {
        let err = parse_listing_id("not-a-valid-id".to_owned(), ID_PARAM)
            .expect_err("malformed id");
        assert_eq!(err.code(), ApiErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({
                "field": "id",
                "value": "not-a-valid-id",
                "code": "invalid_listing_id",
            }))
        );
    }

    #[rstest]
    fn well_formed_id_is_normalised() {
        let id = parse_listing_id("65F1C2A9B8E4D3C2B1A09F8E".to_owned(), ID_PARAM)
            .expect("valid id");
        assert_eq!(id.as_str(), "65f1c2a9b8e4d3c2b1a09f8e");
    }

    #[rstest]
    #[case(json!([1, 2]))]
    #[case(json!("text"))]
    #[case(json!(null))]
    fn non_object_bodies_are_rejected(#[case] body: Value) {
        let err = listing_fields(body, BODY).expect_err("non-object body");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "body", "code": "invalid_body"}))
        );
    }

    #[rstest]
    fn object_bodies_drop_identifier() {
        let fields = listing_fields(json!({"_id": "x", "name": "Rice"}), BODY).expect("object");
        assert!(fields.get("_id").is_none());
        assert_eq!(fields.get("name"), Some(&json!("Rice")));
    }
}
