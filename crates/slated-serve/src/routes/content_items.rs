//! Content item endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use slated_core::{ContentItem, NewContentItem};

use crate::error::ApiError;
use crate::routes::{require, Deleted};
use crate::state::AppState;

/// Client-submitted content item fields. Everything is optional here so
/// that a missing field produces a validation error naming the field
/// instead of a serde type error.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItemPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}

impl ContentItemPayload {
    /// Validate required fields and resolve defaults.
    fn into_new(self) -> Result<NewContentItem, ApiError> {
        let title = require(self.title, "title")?;
        let date = require(self.date, "date")?;
        let status = require(self.status, "status")?;
        Ok(NewContentItem {
            title,
            description: self.description.unwrap_or_default(),
            status,
            date,
        })
    }
}

/// `GET /api/content-items`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContentItem>>, ApiError> {
    Ok(Json(state.store.list_content_items()?))
}

/// `POST /api/content-items`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ContentItemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ContentItem>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = payload.into_new()?;
    let created = state.store.insert_content_item(new)?;
    tracing::debug!(id = created.id, "content item created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/content-items/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ContentItemPayload>, JsonRejection>,
) -> Result<Json<ContentItem>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = payload.into_new()?;
    if !state.store.update_content_item(id, &new)? {
        return Err(ApiError::NotFound("Content item not found".to_string()));
    }
    Ok(Json(new.into_record(id)))
}

/// `DELETE /api/content-items/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    if !state.store.delete_content_item(id)? {
        return Err(ApiError::NotFound("Content item not found".to_string()));
    }
    Ok(Json(Deleted::new("Content item deleted successfully")))
}
