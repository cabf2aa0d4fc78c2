//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use shareplate::domain::ListingService;
use shareplate::domain::ports::{ListingRepository, ListingsCommand, ListingsQuery};
use shareplate::inbound::http::state::HttpState;
use shareplate::outbound::persistence::{InMemoryListingRepository, MongoListingRepository};

use super::ServerConfig;

/// Wrap one repository-backed service as both driving ports.
fn service_pair<R>(repo: R) -> (Arc<dyn ListingsCommand>, Arc<dyn ListingsQuery>)
where
    R: ListingRepository + 'static,
{
    let service = Arc::new(ListingService::new(Arc::new(repo)));
    (service.clone(), service)
}

/// Build the HTTP state, using the document store when one is configured and
/// process memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (command, query) = match &config.store {
        Some(store) => service_pair(MongoListingRepository::new(store.clone())),
        None => service_pair(InMemoryListingRepository::new()),
    };
    web::Data::new(HttpState::new(command, query))
}
