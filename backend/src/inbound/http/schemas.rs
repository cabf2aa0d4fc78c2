//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and are registered with
//! utoipa under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The document store cannot be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "id must be a 24 character hexadecimal listing id")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Listing`].
///
/// Listings are schemaless; only the identifier is guaranteed. Every other
/// submitted field is returned as stored.
#[derive(ToSchema)]
#[schema(
    as = Listing,
    example = json!({
        "_id": "65f1c2a9b8e4d3c2b1a09f8e",
        "foodName": "Vegetable biryani",
        "foodQuantity": 4,
        "donatorEmail": "donor@example.com",
        "createdAt": "2024-05-01T10:00:00Z"
    })
)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ListingSchema {
    /// Store-assigned identifier, 24 hexadecimal characters.
    #[schema(rename = "_id", example = "65f1c2a9b8e4d3c2b1a09f8e")]
    id: String,
    /// Donor email used by `GET /manageFoods`.
    #[schema(rename = "donatorEmail")]
    donator_email: Option<String>,
    /// Sort key for `GET /latest-foods`.
    #[schema(rename = "createdAt")]
    created_at: Option<serde_json::Value>,
}

/// OpenAPI schema for a listing submission body.
#[derive(ToSchema)]
#[schema(
    as = ListingBody,
    example = json!({
        "foodName": "Vegetable biryani",
        "foodQuantity": 4,
        "donatorEmail": "donor@example.com",
        "createdAt": "2024-05-01T10:00:00Z"
    })
)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ListingBodySchema {
    /// Donor email.
    #[schema(rename = "donatorEmail")]
    donator_email: Option<String>,
    /// Creation timestamp; ISO-8601 UTC text sorts correctly.
    #[schema(rename = "createdAt")]
    created_at: Option<serde_json::Value>,
}
