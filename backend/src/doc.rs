//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the listing endpoints and health probes
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`ListingSchema`]) that provide OpenAPI definitions without coupling
//!   domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::listings_dto::{
    CreateListingResponseBody, DeleteListingResponseBody, DeleteResultBody, InsertOneResultBody,
    UpdateListingResponseBody,
};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ListingBodySchema, ListingSchema,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SharePlate listing gateway",
        description = "CRUD access to food-donation listings and health probes.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::listings::root,
        crate::inbound::http::listings::list_listings,
        crate::inbound::http::listings::list_donator_listings,
        crate::inbound::http::listings::list_latest_listings,
        crate::inbound::http::listings::get_listing,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::update_listing,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ListingSchema,
        ListingBodySchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateListingResponseBody,
        InsertOneResultBody,
        UpdateListingResponseBody,
        DeleteListingResponseBody,
        DeleteResultBody,
    )),
    tags(
        (name = "listings", description = "Food-donation listings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
