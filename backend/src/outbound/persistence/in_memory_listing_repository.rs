//! Process-local `ListingRepository` used when no document store is
//! configured and in tests.
//!
//! Identifiers are fresh `ObjectId`s so listings look the same as those
//! created by the MongoDB adapter. The "latest" ordering compares
//! `createdAt` values by type class first (missing and null, numbers,
//! strings, objects, arrays, booleans) and by value within a class, which
//! mirrors how the store sorts mixed-type fields.

use std::cmp::Ordering;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{CREATED_AT_FIELD, Listing, ListingFields, ListingId, MergeOutcome};

use super::document_mapping::listing_id;

/// Listing repository holding documents in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    listings: RwLock<Vec<Listing>>,
}

impl InMemoryListingRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&[Listing]) -> T) -> Result<T, ListingRepositoryError> {
        let guard = self.listings.read().map_err(|_| poisoned())?;
        Ok(f(guard.as_slice()))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Vec<Listing>) -> T) -> Result<T, ListingRepositoryError> {
        let mut guard = self.listings.write().map_err(|_| poisoned())?;
        Ok(f(&mut *guard))
    }
}

fn poisoned() -> ListingRepositoryError {
    ListingRepositoryError::query("in-memory listing store lock poisoned")
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

/// Ascending order of two `createdAt` values.
fn compare_created_at(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    let by_type = type_rank(left).cmp(&type_rank(right));
    if by_type != Ordering::Equal {
        return by_type;
    }
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a @ (Value::Object(_) | Value::Array(_))), Some(b)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn ping(&self) -> Result<(), ListingRepositoryError> {
        self.read(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<Listing>, ListingRepositoryError> {
        self.read(<[Listing]>::to_vec)
    }

    async fn list_by_donator(&self, email: &str) -> Result<Vec<Listing>, ListingRepositoryError> {
        self.read(|listings| {
            listings
                .iter()
                .filter(|listing| listing.donator_email() == Some(email))
                .cloned()
                .collect()
        })
    }

    async fn list_latest(&self, limit: usize) -> Result<Vec<Listing>, ListingRepositoryError> {
        self.read(|listings| {
            let mut sorted = listings.to_vec();
            // Stable sort: equal timestamps keep insertion order.
            sorted.sort_by(|a, b| {
                compare_created_at(
                    b.fields().get(CREATED_AT_FIELD),
                    a.fields().get(CREATED_AT_FIELD),
                )
            });
            sorted.truncate(limit);
            sorted
        })
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        self.read(|listings| listings.iter().find(|listing| listing.id() == id).cloned())
    }

    async fn insert(&self, fields: &ListingFields) -> Result<ListingId, ListingRepositoryError> {
        let id = listing_id(ObjectId::new());
        self.write(|listings| {
            listings.push(Listing::new(id.clone(), fields.clone()));
        })?;
        Ok(id)
    }

    async fn merge_fields(
        &self,
        id: &ListingId,
        fields: &ListingFields,
    ) -> Result<MergeOutcome, ListingRepositoryError> {
        self.write(|listings| {
            let Some(listing) = listings.iter_mut().find(|listing| listing.id() == id) else {
                return MergeOutcome::default();
            };
            let changed = listing.fields_mut().merge(fields);
            MergeOutcome {
                matched_count: 1,
                modified_count: u64::from(changed),
            }
        })
    }

    async fn delete(&self, id: &ListingId) -> Result<u64, ListingRepositoryError> {
        self.write(|listings| {
            let before = listings.len();
            listings.retain(|listing| listing.id() != id);
            u64::try_from(before - listings.len()).unwrap_or(u64::MAX)
        })
    }
}
