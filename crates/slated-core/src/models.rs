//! Entity records for the content calendar.
//!
//! Each entity has two shapes: the full record as stored and returned by
//! the API (with its assigned id), and a `New*` input record whose optional
//! fields have already been resolved to their defaults. Handlers build the
//! `New*` form after presence validation; the store only ever sees resolved
//! values, so an echoed record always equals the stored row.

use serde::{Deserialize, Serialize};

/// Status applied to a campaign when the client omits one.
pub const DEFAULT_CAMPAIGN_STATUS: &str = "Planned";

/// Color applied to a campaign when the client omits one.
pub const DEFAULT_CAMPAIGN_COLOR: &str = "#FFB3BA";

/// A schedulable piece of marketing content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Identifier assigned by the store.
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Free-form workflow status (e.g. "Draft", "Scheduled").
    pub status: String,
    /// ISO-8601 date string by convention; not validated.
    pub date: String,
}

/// Input for creating or replacing a content item, defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentItem {
    pub title: String,
    pub description: String,
    pub status: String,
    pub date: String,
}

impl NewContentItem {
    /// Attach an identifier to produce the full record.
    pub fn into_record(self, id: i64) -> ContentItem {
        ContentItem {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            date: self.date,
        }
    }
}

/// A time-bounded grouping of marketing activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    /// Display color as a hex string (e.g. "#FFB3BA").
    pub color: String,
}

/// Input for creating or replacing a campaign, defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub color: String,
}

impl NewCampaign {
    /// Attach an identifier to produce the full record.
    pub fn into_record(self, id: i64) -> Campaign {
        Campaign {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            color: self.color,
        }
    }
}

/// A message scheduled for distribution across one or more platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: i64,
    pub title: String,
    pub message: String,
    /// Platform names, round-tripped exactly (an empty list stays empty).
    pub platforms: Vec<String>,
    pub date: String,
}

/// Input for creating or replacing a social post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialPost {
    pub title: String,
    pub message: String,
    pub platforms: Vec<String>,
    pub date: String,
}

impl NewSocialPost {
    /// Attach an identifier to produce the full record.
    pub fn into_record(self, id: i64) -> SocialPost {
        SocialPost {
            id,
            title: self.title,
            message: self.message,
            platforms: self.platforms,
            date: self.date,
        }
    }
}
