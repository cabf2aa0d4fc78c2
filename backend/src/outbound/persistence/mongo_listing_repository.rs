//! MongoDB-backed `ListingRepository` implementation.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use tracing::{debug, warn};

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{Listing, ListingFields, ListingId, MergeOutcome};

use super::document_mapping::{
    DocumentMappingError, document_to_listing, fields_to_document, id_filter, listing_id,
};
use super::listing_queries::{
    all_listings_filter, donator_filter, latest_limit, latest_sort, merge_update,
};
use super::mongo_error_mapping::map_mongo_error;
use super::store::{MongoStore, StoreError};

/// Listing repository over a MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoListingRepository {
    store: MongoStore,
}

impl MongoListingRepository {
    /// Create a repository over the given store handle.
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }

    async fn listings(&self) -> Result<&Collection<Document>, ListingRepositoryError> {
        self.store.listings().await.map_err(map_store_error)
    }

    async fn collect(&self, filter: Document) -> Result<Vec<Listing>, ListingRepositoryError> {
        let documents: Vec<Document> = self
            .listings()
            .await?
            .find(filter)
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(into_listings(documents))
    }
}

fn map_error(error: mongodb::error::Error) -> ListingRepositoryError {
    map_mongo_error(
        error,
        ListingRepositoryError::query,
        ListingRepositoryError::connection,
    )
}

fn map_store_error(error: StoreError) -> ListingRepositoryError {
    warn!(%error, "document store client unavailable");
    ListingRepositoryError::connection("document store unreachable")
}

fn map_document_error(error: DocumentMappingError) -> ListingRepositoryError {
    warn!(%error, "stored listing could not be decoded");
    ListingRepositoryError::query(error.to_string())
}

/// Decode a scan, skipping documents that are not listings.
fn into_listings(documents: Vec<Document>) -> Vec<Listing> {
    documents
        .into_iter()
        .filter_map(|document| match document_to_listing(document) {
            Ok(listing) => Some(listing),
            Err(error) => {
                warn!(%error, "skipping stored document that is not a listing");
                None
            }
        })
        .collect()
}

#[async_trait]
impl ListingRepository for MongoListingRepository {
    async fn ping(&self) -> Result<(), ListingRepositoryError> {
        self.store
            .client()
            .await
            .map_err(map_store_error)?
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Listing>, ListingRepositoryError> {
        self.collect(all_listings_filter()).await
    }

    async fn list_by_donator(&self, email: &str) -> Result<Vec<Listing>, ListingRepositoryError> {
        self.collect(donator_filter(email)).await
    }

    async fn list_latest(&self, limit: usize) -> Result<Vec<Listing>, ListingRepositoryError> {
        let documents: Vec<Document> = self
            .listings()
            .await?
            .find(all_listings_filter())
            .sort(latest_sort())
            .limit(latest_limit(limit))
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)?;
        Ok(into_listings(documents))
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        self.listings()
            .await?
            .find_one(id_filter(id))
            .await
            .map_err(map_error)?
            .map(|document| document_to_listing(document).map_err(map_document_error))
            .transpose()
    }

    async fn insert(&self, fields: &ListingFields) -> Result<ListingId, ListingRepositoryError> {
        let result = self
            .listings()
            .await?
            .insert_one(fields_to_document(fields))
            .await
            .map_err(map_error)?;
        result
            .inserted_id
            .as_object_id()
            .map(listing_id)
            .ok_or_else(|| ListingRepositoryError::query("store assigned a non object id"))
    }

    async fn merge_fields(
        &self,
        id: &ListingId,
        fields: &ListingFields,
    ) -> Result<MergeOutcome, ListingRepositoryError> {
        let listings = self.listings().await?;
        let Some(update) = merge_update(fields) else {
            // Nothing to set, so nothing can change: count the match instead of writing.
            let matched_count = listings
                .count_documents(id_filter(id))
                .await
                .map_err(map_error)?;
            debug!(listing_id = %id, matched_count, "empty merge skipped");
            return Ok(MergeOutcome {
                matched_count,
                modified_count: 0,
            });
        };

        let result = listings
            .update_one(id_filter(id), update)
            .await
            .map_err(map_error)?;
        Ok(MergeOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete(&self, id: &ListingId) -> Result<u64, ListingRepositoryError> {
        let result = self
            .listings()
            .await?
            .delete_one(id_filter(id))
            .await
            .map_err(map_error)?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::oid::ObjectId;
    use rstest::rstest;

    use super::*;
    use crate::outbound::persistence::StoreConfig;

    fn unreachable_repo() -> MongoListingRepository {
        MongoListingRepository::new(MongoStore::new(StoreConfig::new("not-a-connection-string")))
    }

    #[rstest]
    fn scans_skip_documents_that_are_not_listings() {
        let oid = ObjectId::new();
        let listings = into_listings(vec![
            doc! { "_id": oid, "name": "Bread" },
            doc! { "_id": 42, "name": "Legacy" },
            doc! { "name": "No id" },
        ]);

        assert_eq!(listings.len(), 1);
        assert_eq!(listings.first().map(|l| l.id().as_str()), Some(oid.to_hex().as_str()));
    }

    #[rstest]
    #[tokio::test]
    async fn unbuildable_client_is_a_connection_error() {
        let repo = unreachable_repo();

        let ping = repo.ping().await.expect_err("ping fails");
        assert!(matches!(ping, ListingRepositoryError::Connection { .. }), "{ping:?}");
        let scan = repo.list_all().await.expect_err("scan fails");
        assert!(matches!(scan, ListingRepositoryError::Connection { .. }), "{scan:?}");
    }
}
