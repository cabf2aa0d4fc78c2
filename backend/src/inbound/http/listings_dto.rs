//! Listing DTOs: path and query extractors plus write acknowledgements.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateListingResponse, DeleteListingResponse, UpdateListingResponse};

/// Path segment carrying a listing identifier.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ListingPath {
    /// Listing identifier, 24 hexadecimal characters.
    #[param(example = "65f1c2a9b8e4d3c2b1a09f8e")]
    pub id: String,
}

/// Query string for `GET /manageFoods`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DonatorQuery {
    /// Donor email; when absent the result is empty.
    #[param(example = "donor@example.com")]
    pub email: Option<String>,
}

/// Store acknowledgement for an insert.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResultBody {
    pub acknowledged: bool,
    #[schema(example = "65f1c2a9b8e4d3c2b1a09f8e")]
    pub inserted_id: String,
}

/// Response payload for `POST /foods`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateListingResponseBody {
    pub success: bool,
    pub result: InsertOneResultBody,
}

impl From<CreateListingResponse> for CreateListingResponseBody {
    fn from(value: CreateListingResponse) -> Self {
        Self {
            success: true,
            result: InsertOneResultBody {
                acknowledged: true,
                inserted_id: value.inserted_id.to_string(),
            },
        }
    }
}

/// Response payload for `PUT /foodUpdate/{id}`.
///
/// Upserts are never requested, so `upsertedId` is always `null` and
/// `upsertedCount` always 0.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingResponseBody {
    pub acknowledged: bool,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
    pub matched_count: u64,
}

impl From<UpdateListingResponse> for UpdateListingResponseBody {
    fn from(value: UpdateListingResponse) -> Self {
        Self {
            acknowledged: true,
            modified_count: value.outcome.modified_count,
            upserted_id: None,
            upserted_count: 0,
            matched_count: value.outcome.matched_count,
        }
    }
}

/// Store acknowledgement for a delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResultBody {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Response payload for `DELETE /foods/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteListingResponseBody {
    pub success: bool,
    pub result: DeleteResultBody,
}

impl From<DeleteListingResponse> for DeleteListingResponseBody {
    fn from(value: DeleteListingResponse) -> Self {
        Self {
            success: true,
            result: DeleteResultBody {
                acknowledged: true,
                deleted_count: value.deleted_count,
            },
        }
    }
}
