//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed and in-memory listing repositories.
//!
//! Adapters are thin translators between domain types and store
//! representations. They contain no business logic.

pub mod persistence;
