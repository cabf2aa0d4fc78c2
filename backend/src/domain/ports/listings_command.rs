//! Driving port for listing writes.

use async_trait::async_trait;

use crate::domain::{Error, ListingFields, ListingId, MergeOutcome};

/// Request to create a listing from arbitrary fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListingRequest {
    pub fields: ListingFields,
}

/// Result of a create: the store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListingResponse {
    pub inserted_id: ListingId,
}

/// Request to merge fields into an existing listing.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateListingRequest {
    pub id: ListingId,
    pub fields: ListingFields,
}

/// Result of a merge update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateListingResponse {
    pub outcome: MergeOutcome,
}

/// Request to delete a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteListingRequest {
    pub id: ListingId,
}

/// Result of a delete; zero when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteListingResponse {
    pub deleted_count: u64,
}

/// Driving port for listing writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsCommand: Send + Sync {
    /// Insert a new listing.
    async fn create_listing(
        &self,
        request: CreateListingRequest,
    ) -> Result<CreateListingResponse, Error>;

    /// Merge the supplied fields into the matching listing.
    async fn update_listing(
        &self,
        request: UpdateListingRequest,
    ) -> Result<UpdateListingResponse, Error>;

    /// Delete the matching listing.
    async fn delete_listing(
        &self,
        request: DeleteListingRequest,
    ) -> Result<DeleteListingResponse, Error>;
}
