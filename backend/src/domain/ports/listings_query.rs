//! Driving port for listing reads.
//!
//! HTTP handlers call this port; they never see repository errors, only the
//! domain [`Error`].

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingId};

/// Request to list one donor's listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDonatorListingsRequest {
    /// Donor email; `None` when the client omitted it.
    pub donator_email: Option<String>,
}

/// Request to fetch one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetListingRequest {
    pub id: ListingId,
}

/// Lookup result: found with a value, or not found.
#[derive(Debug, Clone, PartialEq)]
pub struct GetListingResponse {
    pub listing: Option<Listing>,
}

/// Driving port for listing reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsQuery: Send + Sync {
    /// Every listing in insertion order.
    async fn list_all(&self) -> Result<Vec<Listing>, Error>;

    /// Listings owned by one donor.
    async fn list_by_donator(
        &self,
        request: ListDonatorListingsRequest,
    ) -> Result<Vec<Listing>, Error>;

    /// The newest listings by `createdAt`, capped at
    /// [`crate::domain::LATEST_LISTINGS_LIMIT`].
    async fn list_latest(&self) -> Result<Vec<Listing>, Error>;

    /// One listing by identifier.
    async fn get_listing(&self, request: GetListingRequest) -> Result<GetListingResponse, Error>;
}
