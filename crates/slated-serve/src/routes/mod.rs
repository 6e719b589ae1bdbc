//! API route definitions.
//!
//! ## Route Structure
//!
//! ### API (JSON, nested under `/api`)
//! - `GET /api/health` - Health check
//! - `GET|POST /api/content-items`, `PUT|DELETE /api/content-items/{id}`
//! - `GET|POST /api/campaigns`, `PUT|DELETE /api/campaigns/{id}`
//! - `GET|POST /api/social-posts`, `PUT|DELETE /api/social-posts/{id}`
//! - `GET /api/link-preview?url=...` - Fetch and extract page metadata
//!
//! Unmatched `/api/*` paths return a JSON 404; unsupported methods on
//! matched paths return 405 from the method router.
//!
//! ### Static assets (everything else)
//! Files are served from the configured asset directory; any miss falls
//! back to `index.html` so client-side routing keeps working.

mod campaigns;
mod content_items;
mod health;
mod preview;
mod social_posts;

use std::path::Path;

use axum::Router;
use axum::routing::{get, put};
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    let assets = spa_service(&state.config.asset_dir);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/content-items",
            get(content_items::list).post(content_items::create),
        )
        .route(
            "/content-items/{id}",
            put(content_items::update).delete(content_items::remove),
        )
        .route("/campaigns", get(campaigns::list).post(campaigns::create))
        .route(
            "/campaigns/{id}",
            put(campaigns::update).delete(campaigns::remove),
        )
        .route(
            "/social-posts",
            get(social_posts::list).post(social_posts::create),
        )
        .route(
            "/social-posts/{id}",
            put(social_posts::update).delete(social_posts::remove),
        )
        .route("/link-preview", get(preview::link_preview))
        // API paths never fall through to asset serving
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api)
        .fallback_service(assets)
        .with_state(state)
}

/// Static file service with `index.html` fallback for SPA routing.
fn spa_service(asset_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(asset_dir).fallback(ServeFile::new(asset_dir.join("index.html")))
}

/// JSON 404 for unmatched `/api/*` paths.
async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Deleted {
    message: &'static str,
}

impl Deleted {
    pub(crate) fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Presence check for a required payload field. The error names the field
/// using its wire spelling.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}
