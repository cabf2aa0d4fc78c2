//! Listing HTTP handlers.
//!
//! ```text
//! GET    /
//! GET    /foods
//! GET    /manageFoods?email=
//! GET    /latest-foods
//! GET    /foods/{id}
//! POST   /foods
//! PUT    /foodUpdate/{id}
//! DELETE /foods/{id}
//! ```
//!
//! Each handler validates its inputs, calls exactly one listing port and
//! returns the outcome as JSON. Absent listings are not errors: lookups
//! answer `null` and writes report zero counts.

use actix_web::{HttpResponse, delete, get, http::header::ContentType, post, put, web};
use serde_json::Value;

use crate::domain::Listing;
use crate::domain::ports::{
    CreateListingRequest, DeleteListingRequest, GetListingRequest, ListDonatorListingsRequest,
    UpdateListingRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listings_dto::{
    CreateListingResponseBody, DeleteListingResponseBody, DonatorQuery, ListingPath,
    UpdateListingResponseBody,
};
use crate::inbound::http::schemas::{ErrorSchema, ListingBodySchema, ListingSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{BODY, ID_PARAM, listing_fields, parse_listing_id};

/// Plain-text banner served at `/`.
pub const GREETING: &str = "Hello World! Simple CRUD Server is running";

/// Service banner; never touches the store.
#[utoipa::path(
    get,
    path = "/",
    tags = ["listings"],
    responses((status = 200, description = "Service banner", body = String, content_type = "text/plain")),
    operation_id = "root"
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(GREETING)
}

/// Every listing, in store order.
#[utoipa::path(
    get,
    path = "/foods",
    tags = ["listings"],
    responses(
        (status = 200, description = "All listings", body = Vec<ListingSchema>),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    operation_id = "listListings"
)]
#[get("/foods")]
pub async fn list_listings(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Listing>>> {
    let listings = state.listings_query.list_all().await?;
    Ok(web::Json(listings))
}

/// Listings donated by `email`.
#[utoipa::path(
    get,
    path = "/manageFoods",
    tags = ["listings"],
    params(DonatorQuery),
    responses(
        (status = 200, description = "Listings owned by the donor", body = Vec<ListingSchema>),
        (status = 400, description = "Invalid query string", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    operation_id = "listDonatorListings"
)]
#[get("/manageFoods")]
pub async fn list_donator_listings(
    state: web::Data<HttpState>,
    query: web::Query<DonatorQuery>,
) -> ApiResult<web::Json<Vec<Listing>>> {
    let DonatorQuery { email } = query.into_inner();
    let listings = state
        .listings_query
        .list_by_donator(ListDonatorListingsRequest {
            donator_email: email,
        })
        .await?;
    Ok(web::Json(listings))
}

/// The six most recent listings by `createdAt`.
#[utoipa::path(
    get,
    path = "/latest-foods",
    tags = ["listings"],
    responses(
        (status = 200, description = "Newest listings first", body = Vec<ListingSchema>),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    operation_id = "listLatestListings"
)]
#[get("/latest-foods")]
pub async fn list_latest_listings(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Listing>>> {
    let listings = state.listings_query.list_latest().await?;
    Ok(web::Json(listings))
}

/// One listing, or `null` when no listing has the identifier.
#[utoipa::path(
    get,
    path = "/foods/{id}",
    tags = ["listings"],
    params(ListingPath),
    responses(
        (status = 200, description = "The listing, or null", body = Option<ListingSchema>),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    operation_id = "getListing"
)]
#[get("/foods/{id}")]
pub async fn get_listing(
    state: web::Data<HttpState>,
    path: web::Path<ListingPath>,
) -> ApiResult<web::Json<Option<Listing>>> {
    let id = parse_listing_id(path.into_inner().id, ID_PARAM)?;
    let response = state
        .listings_query
        .get_listing(GetListingRequest { id })
        .await?;
    Ok(web::Json(response.listing))
}

/// Store the submitted object as a new listing.
#[utoipa::path(
    post,
    path = "/foods",
    tags = ["listings"],
    request_body = ListingBodySchema,
    responses(
        (status = 200, description = "Listing stored", body = CreateListingResponseBody),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    operation_id = "createListing"
)]
#[post("/foods")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<CreateListingResponseBody>> {
    let fields = listing_fields(payload.into_inner(), BODY)?;
    let response = state
        .listings
        .create_listing(CreateListingRequest { fields })
        .await?;
    Ok(web::Json(CreateListingResponseBody::from(response)))
}

/// Overwrite the submitted fields on one listing, leaving the rest intact.
#[utoipa::path(
    put,
    path = "/foodUpdate/{id}",
    tags = ["listings"],
    params(ListingPath),
    request_body = ListingBodySchema,
    responses(
        (status = 200, description = "Merge outcome", body = UpdateListingResponseBody),
        (status = 400, description = "Malformed identifier or body", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    operation_id = "updateListing"
)]
#[put("/foodUpdate/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    path: web::Path<ListingPath>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<UpdateListingResponseBody>> {
    let id = parse_listing_id(path.into_inner().id, ID_PARAM)?;
    let fields = listing_fields(payload.into_inner(), BODY)?;
    let response = state
        .listings
        .update_listing(UpdateListingRequest { id, fields })
        .await?;
    Ok(web::Json(UpdateListingResponseBody::from(response)))
}

/// Remove one listing; deleting an absent listing reports zero.
#[utoipa::path(
    delete,
    path = "/foods/{id}",
    tags = ["listings"],
    params(ListingPath),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteListingResponseBody),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Document store unavailable", body = ErrorSchema)
    ),
    operation_id = "deleteListing"
)]
#[delete("/foods/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    path: web::Path<ListingPath>,
) -> ApiResult<web::Json<DeleteListingResponseBody>> {
    let id = parse_listing_id(path.into_inner().id, ID_PARAM)?;
    let response = state
        .listings
        .delete_listing(DeleteListingRequest { id })
        .await?;
    Ok(web::Json(DeleteListingResponseBody::from(response)))
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
