//! Core types and SQLite persistence for the Slated content calendar.
//!
//! This crate provides:
//! - Entity records (content items, campaigns, social posts) and their
//!   validated input counterparts
//! - The [`Store`] wrapper around a single long-lived SQLite connection
//! - Shared error types
//!
//! HTTP concerns live in `slated-serve`; nothing in this crate knows about
//! requests or responses.

mod error;
mod models;
mod store;

pub use error::{Error, Result};
pub use models::{
    Campaign, ContentItem, NewCampaign, NewContentItem, NewSocialPost, SocialPost,
    DEFAULT_CAMPAIGN_COLOR, DEFAULT_CAMPAIGN_STATUS,
};
pub use store::Store;
