//! Listing domain service.
//!
//! Implements both listing driving ports over a [`ListingRepository`]. Every
//! operation issues at most one repository call and maps repository failures
//! onto domain errors: connectivity becomes `service_unavailable`, anything
//! else becomes `internal_error`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    CreateListingRequest, CreateListingResponse, DeleteListingRequest, DeleteListingResponse,
    GetListingRequest, GetListingResponse, ListDonatorListingsRequest, ListingRepository,
    ListingRepositoryError, ListingsCommand, ListingsQuery, UpdateListingRequest,
    UpdateListingResponse,
};
use crate::domain::{Error, LATEST_LISTINGS_LIMIT, Listing};

fn map_repository_error(error: ListingRepositoryError) -> Error {
    warn!(%error, "listing repository call failed");
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing store unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing store error: {message}"))
        }
    }
}

/// Listing service implementing [`ListingsQuery`] and [`ListingsCommand`].
#[derive(Clone)]
pub struct ListingService<R> {
    listing_repo: Arc<R>,
}

impl<R> ListingService<R> {
    /// Create a service over the given repository.
    pub fn new(listing_repo: Arc<R>) -> Self {
        Self { listing_repo }
    }
}

#[async_trait]
impl<R> ListingsQuery for ListingService<R>
where
    R: ListingRepository,
{
    async fn list_all(&self) -> Result<Vec<Listing>, Error> {
        self.listing_repo
            .list_all()
            .await
            .map_err(map_repository_error)
    }

    async fn list_by_donator(
        &self,
        request: ListDonatorListingsRequest,
    ) -> Result<Vec<Listing>, Error> {
        let Some(email) = request.donator_email else {
            debug!("donator email missing; returning no listings");
            return Ok(Vec::new());
        };
        self.listing_repo
            .list_by_donator(&email)
            .await
            .map_err(map_repository_error)
    }

    async fn list_latest(&self) -> Result<Vec<Listing>, Error> {
        self.listing_repo
            .list_latest(LATEST_LISTINGS_LIMIT)
            .await
            .map_err(map_repository_error)
    }

    async fn get_listing(&self, request: GetListingRequest) -> Result<GetListingResponse, Error> {
        let listing = self
            .listing_repo
            .find_by_id(&request.id)
            .await
            .map_err(map_repository_error)?;
        Ok(GetListingResponse { listing })
    }
}

#[async_trait]
impl<R> ListingsCommand for ListingService<R>
where
    R: ListingRepository,
{
    async fn create_listing(
        &self,
        request: CreateListingRequest,
    ) -> Result<CreateListingResponse, Error> {
        let inserted_id = self
            .listing_repo
            .insert(&request.fields)
            .await
            .map_err(map_repository_error)?;
        debug!(listing_id = %inserted_id, "listing created");
        Ok(CreateListingResponse { inserted_id })
    }

    async fn update_listing(
        &self,
        request: UpdateListingRequest,
    ) -> Result<UpdateListingResponse, Error> {
        let outcome = self
            .listing_repo
            .merge_fields(&request.id, &request.fields)
            .await
            .map_err(map_repository_error)?;
        debug!(
            listing_id = %request.id,
            matched = outcome.matched_count,
            modified = outcome.modified_count,
            "listing merge applied"
        );
        Ok(UpdateListingResponse { outcome })
    }

    async fn delete_listing(
        &self,
        request: DeleteListingRequest,
    ) -> Result<DeleteListingResponse, Error> {
        let deleted_count = self
            .listing_repo
            .delete(&request.id)
            .await
            .map_err(map_repository_error)?;
        Ok(DeleteListingResponse { deleted_count })
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
