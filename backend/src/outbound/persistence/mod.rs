//! Listing persistence adapters.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between BSON documents
//!   and domain listings.
//! - **Shared client**: [`MongoStore`] wraps one driver client whose pool is
//!   shared by every request. The client is built on first use and a failed
//!   build is retried by the next caller.
//! - **Pure query builders**: filters, sorts and update documents are built
//!   by plain functions so they can be checked without a server.
//! - **Fixed error messages**: driver errors are logged at debug level and
//!   mapped to connection or query errors.
//!
//! # Example
//!
//! ```ignore
//! use shareplate::outbound::persistence::{MongoListingRepository, MongoStore, StoreConfig};
//!
//! let store = MongoStore::new(StoreConfig::new("mongodb://localhost:27017"));
//! let repo = MongoListingRepository::new(store);
//! ```

mod document_mapping;
mod in_memory_listing_repository;
mod listing_queries;
mod mongo_error_mapping;
mod mongo_listing_repository;
mod store;

pub use in_memory_listing_repository::InMemoryListingRepository;
pub use mongo_listing_repository::MongoListingRepository;
pub use store::{MongoStore, StoreConfig, StoreError};
