//! Campaign endpoints.
//!
//! Campaigns carry two server-side defaults: `status` ("Planned") and
//! `color`. Defaults are resolved before the write on both create and
//! update, so the echoed record always matches the stored row.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use slated_core::{Campaign, NewCampaign, DEFAULT_CAMPAIGN_COLOR, DEFAULT_CAMPAIGN_STATUS};

use crate::error::ApiError;
use crate::routes::{require, Deleted};
use crate::state::AppState;

/// Client-submitted campaign fields; wire names are camelCase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub color: Option<String>,
}

impl CampaignPayload {
    /// Validate required fields and resolve defaults.
    fn into_new(self) -> Result<NewCampaign, ApiError> {
        let title = require(self.title, "title")?;
        let start_date = require(self.start_date, "startDate")?;
        let end_date = require(self.end_date, "endDate")?;
        Ok(NewCampaign {
            title,
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_else(|| DEFAULT_CAMPAIGN_STATUS.to_string()),
            start_date,
            end_date,
            color: self.color.unwrap_or_else(|| DEFAULT_CAMPAIGN_COLOR.to_string()),
        })
    }
}

/// `GET /api/campaigns`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Campaign>>, ApiError> {
    Ok(Json(state.store.list_campaigns()?))
}

/// `POST /api/campaigns`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CampaignPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = payload.into_new()?;
    let created = state.store.insert_campaign(new)?;
    tracing::debug!(id = created.id, "campaign created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/campaigns/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CampaignPayload>, JsonRejection>,
) -> Result<Json<Campaign>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let new = payload.into_new()?;
    if !state.store.update_campaign(id, &new)? {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }
    Ok(Json(new.into_record(id)))
}

/// `DELETE /api/campaigns/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>, ApiError> {
    if !state.store.delete_campaign(id)? {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }
    Ok(Json(Deleted::new("Campaign deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_payload() -> CampaignPayload {
        CampaignPayload {
            title: Some("Launch".to_string()),
            description: None,
            status: None,
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
            color: None,
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let state = AppState::for_tests();

        let (status, Json(created)) = create(State(state.clone()), Ok(Json(minimal_payload())))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.status, "Planned");
        assert_eq!(created.color, DEFAULT_CAMPAIGN_COLOR);
        assert!(created.id > 0);

        // List contains exactly the created record, defaults included.
        let Json(listed) = list(State(state)).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn create_missing_start_date_names_wire_field() {
        let state = AppState::for_tests();

        let mut payload = minimal_payload();
        payload.start_date = None;
        let err = create(State(state.clone()), Ok(Json(payload)))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required field: startDate");
        let Json(listed) = list(State(state)).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn update_applies_defaults_and_matches_stored_state() {
        let state = AppState::for_tests();
        let (_, Json(created)) = create(State(state.clone()), Ok(Json(minimal_payload())))
            .await
            .unwrap();

        // Update with explicit status but omitted color: the echo must
        // carry the default color that was actually written.
        let mut payload = minimal_payload();
        payload.status = Some("Active".to_string());
        let Json(updated) = update(State(state.clone()), Path(created.id), Ok(Json(payload)))
            .await
            .unwrap();

        assert_eq!(updated.status, "Active");
        assert_eq!(updated.color, DEFAULT_CAMPAIGN_COLOR);

        let Json(listed) = list(State(state)).await.unwrap();
        assert_eq!(listed, vec![updated]);
    }

    #[tokio::test]
    async fn update_and_delete_missing_id_are_not_found() {
        let state = AppState::for_tests();

        let err = update(State(state.clone()), Path(7), Ok(Json(minimal_payload())))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = remove(State(state), Path(7)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
