//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod listing_repository;
mod listings_command;
mod listings_query;

#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
#[cfg(test)]
pub use listings_command::MockListingsCommand;
pub use listings_command::{
    CreateListingRequest, CreateListingResponse, DeleteListingRequest, DeleteListingResponse,
    ListingsCommand, UpdateListingRequest, UpdateListingResponse,
};
#[cfg(test)]
pub use listings_query::MockListingsQuery;
pub use listings_query::{
    GetListingRequest, GetListingResponse, ListDonatorListingsRequest, ListingsQuery,
};
