//! Driven port for the listings collection.
//!
//! Each method maps to exactly one document-store call. Adapters translate
//! store failures into [`ListingRepositoryError`] and never retry.

use async_trait::async_trait;

use crate::domain::{Listing, ListingFields, ListingId, MergeOutcome};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing repository adapters.
    pub enum ListingRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "listing repository connection failed: {message}",
        /// The store rejected or failed the operation.
        Query { message: String } =>
            "listing repository query failed: {message}",
    }
}

/// Persistence port for listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Round-trip to the store without touching the collection.
    async fn ping(&self) -> Result<(), ListingRepositoryError>;

    /// Every listing, in natural (insertion) order.
    async fn list_all(&self) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Listings whose `donatorEmail` equals `email`.
    async fn list_by_donator(&self, email: &str) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// At most `limit` listings ordered by `createdAt`, newest first.
    async fn list_latest(&self, limit: usize) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// One listing by identifier.
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Insert `fields` verbatim; the store assigns the identifier.
    async fn insert(&self, fields: &ListingFields) -> Result<ListingId, ListingRepositoryError>;

    /// Set the supplied fields on the matching listing, leaving others intact.
    async fn merge_fields(
        &self,
        id: &ListingId,
        fields: &ListingFields,
    ) -> Result<MergeOutcome, ListingRepositoryError>;

    /// Remove the matching listing and return how many were removed.
    async fn delete(&self, id: &ListingId) -> Result<u64, ListingRepositoryError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn connection_error_formats_message() {
        let err = ListingRepositoryError::connection("server selection timed out");
        assert_eq!(
            err.to_string(),
            "listing repository connection failed: server selection timed out"
        );
    }

    #[rstest]
    fn query_error_keeps_message_field() {
        let err = ListingRepositoryError::query("bad sort key");
        assert!(matches!(
            err,
            ListingRepositoryError::Query { ref message } if message == "bad sort key"
        ));
    }
}
