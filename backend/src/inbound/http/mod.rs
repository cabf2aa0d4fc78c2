//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod listings;
pub mod listings_dto;
pub mod schemas;
pub mod state;
pub mod validation;

use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::Error;

pub use error::ApiResult;

/// Largest accepted JSON body, in bytes.
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Register the listing routes and the extractor error handlers.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let _app = App::new().configure(shareplate::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(validation::json_error_handler),
    )
    .app_data(web::PathConfig::default().error_handler(validation::path_error_handler))
    .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
    .service(listings::root)
    .service(listings::list_listings)
    .service(listings::list_donator_listings)
    .service(listings::list_latest_listings)
    .service(listings::get_listing)
    .service(listings::create_listing)
    .service(listings::update_listing)
    .service(listings::delete_listing);
}

/// Default service answering unknown routes with a JSON 404.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}
