//! # trove-api — Axum API Service for the Trove Item Catalog
//!
//! HTTP layer over [`trove_store`]: clients submit catalog items as
//! multipart forms, list them back, look one up by position, and fetch
//! item images by their content-derived names.
//!
//! ## API Surface
//!
//! | Method | Path                 | Module              | Behavior                 |
//! |--------|----------------------|---------------------|--------------------------|
//! | GET    | `/`                  | [`routes::items`]   | Full listing             |
//! | GET    | `/items`             | [`routes::items`]   | Full listing             |
//! | POST   | `/items`             | [`routes::items`]   | Multipart submission     |
//! | GET    | `/items/:item_id`    | [`routes::items`]   | Item by 0-based position |
//! | GET    | `/images/:file_name` | [`routes::images`]  | Image bytes or default   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → Handler
//! ```
//!
//! CORS admits the single configured front-end origin (`FRONT_URL`) with
//! the methods the catalog uses; preflight requests are answered by the
//! layer itself.

pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Body size limit covering multipart image uploads.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let origin = match state.config.front_url.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(_) => {
            tracing::warn!(
                front_url = %state.config.front_url,
                "FRONT_URL is not a valid origin, falling back to the default"
            );
            HeaderValue::from_static(state::DEFAULT_FRONT_URL)
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::items::router())
        .merge(routes::images::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
