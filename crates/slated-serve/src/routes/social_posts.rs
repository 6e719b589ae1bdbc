//! Social post endpoints.
//!
//! `platforms` crosses the wire as a JSON list of platform names and is
//! stored as a JSON array, so an empty list survives the round trip.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use slated_core::{NewSocialPost, SocialPost};

use crate::error::ApiError;
use crate::routes::{require, Deleted};
use crate::state::AppState;

/// Client-submitted social post fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialPostPayload {
    pub title: Option<String>,
    pub message: Option<String>,
    pub platforms: Option<Vec<String>>,
    pub date: Option<String>,
}

impl SocialPostPayload {
    /// Validate required fields (all four are required).
    fn into_new(self) -> Result<NewSocialPost, ApiError> {
        let title = require(self.title, "title")?;
        let message = require(self.message, "message")?;
        let platforms = require(self.platforms, "platforms")?;
        let date = require(self.date, "date")?;
        Ok(NewSocialPost {
            title,
            message,
            platforms,
            date,
        })
    }
}

/// `GET /api/social-posts`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SocialPost>>, ApiError> {
    Ok(Json(state.store.list_social_posts()?))
}

/// `POST /api/social-posts`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SocialPostPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<SocialPost>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = payload.into_new()?;
    let created = state.store.insert_social_post(new)?;
    tracing::debug!(id = created.id, "social post created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/social-posts/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<SocialPostPayload>, JsonRejection>,
) -> Result<Json<SocialPost>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = payload.into_new()?;
    if !state.store.update_social_post(id, &new)? {
        return Err(ApiError::NotFound("Social post not found".to_string()));
    }
    Ok(Json(new.into_record(id)))
}

/// `DELETE /api/social-posts/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    if !state.store.delete_social_post(id)? {
        return Err(ApiError::NotFound("Social post not found".to_string()));
    }
    Ok(Json(Deleted::new("Social post deleted successfully")))
}
