//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ListingsCommand, ListingsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub listings: Arc<dyn ListingsCommand>,
    pub listings_query: Arc<dyn ListingsQuery>,
}

impl HttpState {
    /// Construct state from the listing ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use shareplate::domain::ListingService;
    /// use shareplate::inbound::http::state::HttpState;
    /// use shareplate::outbound::persistence::InMemoryListingRepository;
    ///
    /// let service = Arc::new(ListingService::new(Arc::new(InMemoryListingRepository::new())));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.listings_query.clone();
    /// ```
    pub fn new(listings: Arc<dyn ListingsCommand>, listings_query: Arc<dyn ListingsQuery>) -> Self {
        Self {
            listings,
            listings_query,
        }
    }
}
