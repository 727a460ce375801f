//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Greeting
//! - `/listings/*`       - Listing and review pages
//! - `/static/*`         - Static assets
//! - `/uploads/*`        - Uploaded files
//! - anything else       - 404 error page
//!
//! # Middleware
//!
//! - **Path normalization** - Trailing slash handling
//! - **Method override** - `POST` + `_method` dispatched as `PUT`/`PATCH`/`DELETE`
//! - **Tracing** - Structured request/response logging

use std::path::Path;

use crate::state::AppState;
use crate::web;
use crate::web::handlers::{not_found_handler, root_handler};
use crate::web::middleware::{method_override, tracing};
use axum::handler::HandlerWithoutStateExt;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::services::ServeDir;

/// Builds the routes, static file services and fallbacks over `state`.
///
/// Unmatched paths, missing static files and unsupported methods all render
/// the 404 page.
pub fn app_router(
    state: AppState,
    static_dir: impl AsRef<Path>,
    uploads_dir: impl AsRef<Path>,
) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(web::routes::listing_routes())
        .nest_service(
            "/static",
            ServeDir::new(static_dir.as_ref())
                .not_found_service(not_found_handler.into_service()),
        )
        .nest_service(
            "/uploads",
            ServeDir::new(uploads_dir.as_ref())
                .not_found_service(not_found_handler.into_service()),
        )
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// The complete application.
///
/// Path normalization and method override run before routing, so they wrap
/// the router instead of being added with [`Router::layer`].
pub fn app(
    state: AppState,
    static_dir: impl AsRef<Path>,
    uploads_dir: impl AsRef<Path>,
) -> Router {
    let router = app_router(state, static_dir, uploads_dir);
    let service = NormalizePathLayer::trim_trailing_slash()
        .layer(middleware::from_fn(method_override::layer).layer(router));

    Router::new().fallback_service(service)
}
