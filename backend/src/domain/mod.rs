//! Domain primitives, ports and services.
//!
//! Purpose: keep listing semantics independent of actix and MongoDB. Inbound
//! adapters talk to the driving ports in [`ports`]; outbound adapters
//! implement [`ports::ListingRepository`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Listing / ListingId / ListingFields: schemaless listing documents.
//! - ListingService: driving-port implementation over a repository.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod listing;
mod listing_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::listing::{
    CREATED_AT_FIELD, DONATOR_EMAIL_FIELD, ID_FIELD, LATEST_LISTINGS_LIMIT, Listing,
    ListingFields, ListingId, ListingIdError, MergeOutcome,
};
pub use self::listing_service::ListingService;
pub use self::trace_id::TraceId;
