//! Slated Serve - HTTP API for the marketing content calendar.
//!
//! This crate provides the REST API over the calendar store plus two
//! non-CRUD concerns: link-preview metadata extraction for arbitrary URLs,
//! and static serving of the pre-built single-page front end.
//!
//! # Architecture
//!
//! - **AppState**: Shared application state (store handle, outbound HTTP
//!   client, configuration)
//! - **Routes**: Endpoint handlers grouped by resource, nested under `/api`
//! - **SPA fallback**: any non-`/api` path serves the asset directory,
//!   falling back to `index.html` for client-side routing

mod config;
mod error;
mod routes;
mod state;

pub use self::config::Config;
pub use self::error::ApiError;
pub use self::routes::router;
pub use self::state::AppState;
