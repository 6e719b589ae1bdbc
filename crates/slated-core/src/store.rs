//! SQLite persistence for calendar entities.
//!
//! A single long-lived connection is shared behind a mutex and injected
//! into handlers through application state. Every method locks the
//! connection for one statement (or the short insert-then-rowid sequence);
//! SQLite's own isolation is the only concurrency control, matching the
//! last-write-wins contract of the API.
//!
//! The `platforms` column on social posts holds a JSON array, so an empty
//! platform list round-trips as an empty list rather than collapsing into
//! a single empty string.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{Connection, params};
use tracing::info;

use crate::error::Result;
use crate::models::{
    Campaign, ContentItem, NewCampaign, NewContentItem, NewSocialPost, SocialPost,
};

/// Idempotent schema bootstrap for the three entity tables.
///
/// `campaign_id` on content items is an association slot reserved for
/// campaign grouping; nothing writes it yet and no foreign key is enforced.
const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS content_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL,
        date TEXT NOT NULL,
        campaign_id INTEGER
    );

    CREATE TABLE IF NOT EXISTS campaigns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        color TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS social_posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        message TEXT NOT NULL,
        platforms TEXT NOT NULL,
        date TEXT NOT NULL
    );
"#;

/// Handle to the calendar database, cheap to clone into handlers.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (creating if necessary) the database file and ensure the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        // WAL keeps readers from blocking while a write is in flight
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %path.display(), "calendar database ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database with the schema applied. Test use only,
    /// but kept out of `#[cfg(test)]` so downstream crates' tests can use it.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // ── Content items ──────────────────────────────────────────────────

    /// All content items in insertion order.
    pub fn list_content_items(&self) -> Result<Vec<ContentItem>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT id, title, description, status, date FROM content_items")?;
        let items = stmt
            .query_map([], |row| {
                Ok(ContentItem {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    status: row.get(3)?,
                    date: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Insert a content item, returning the full record with its new id.
    pub fn insert_content_item(&self, new: NewContentItem) -> Result<ContentItem> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO content_items (title, description, status, date) VALUES (?1, ?2, ?3, ?4)",
            params![new.title, new.description, new.status, new.date],
        )?;
        let id = conn.last_insert_rowid();
        Ok(new.into_record(id))
    }

    /// Overwrite all fields of a content item. Returns `false` if no row
    /// matched the id.
    pub fn update_content_item(&self, id: i64, new: &NewContentItem) -> Result<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE content_items SET title = ?1, description = ?2, status = ?3, date = ?4
             WHERE id = ?5",
            params![new.title, new.description, new.status, new.date, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a content item. Returns `false` if no row matched the id.
    pub fn delete_content_item(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM content_items WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    // ── Campaigns ──────────────────────────────────────────────────────

    /// All campaigns in insertion order.
    pub fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, title, description, status, start_date, end_date, color FROM campaigns",
        )?;
        let campaigns = stmt
            .query_map([], |row| {
                Ok(Campaign {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    status: row.get(3)?,
                    start_date: row.get(4)?,
                    end_date: row.get(5)?,
                    color: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(campaigns)
    }

    /// Insert a campaign, returning the full record with its new id.
    pub fn insert_campaign(&self, new: NewCampaign) -> Result<Campaign> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO campaigns (title, description, status, start_date, end_date, color)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.title,
                new.description,
                new.status,
                new.start_date,
                new.end_date,
                new.color
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(new.into_record(id))
    }

    /// Overwrite all fields of a campaign. Returns `false` if no row
    /// matched the id.
    pub fn update_campaign(&self, id: i64, new: &NewCampaign) -> Result<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE campaigns SET title = ?1, description = ?2, status = ?3,
             start_date = ?4, end_date = ?5, color = ?6 WHERE id = ?7",
            params![
                new.title,
                new.description,
                new.status,
                new.start_date,
                new.end_date,
                new.color,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a campaign. Returns `false` if no row matched the id.
    pub fn delete_campaign(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM campaigns WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    // ── Social posts ───────────────────────────────────────────────────

    /// All social posts in insertion order, platforms decoded back to lists.
    pub fn list_social_posts(&self) -> Result<Vec<SocialPost>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT id, title, message, platforms, date FROM social_posts")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, title, message, platforms, date)| {
                Ok(SocialPost {
                    id,
                    title,
                    message,
                    platforms: serde_json::from_str(&platforms)?,
                    date,
                })
            })
            .collect()
    }

    /// Insert a social post, returning the full record with its new id.
    pub fn insert_social_post(&self, new: NewSocialPost) -> Result<SocialPost> {
        let platforms = serde_json::to_string(&new.platforms)?;
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO social_posts (title, message, platforms, date) VALUES (?1, ?2, ?3, ?4)",
            params![new.title, new.message, platforms, new.date],
        )?;
        let id = conn.last_insert_rowid();
        Ok(new.into_record(id))
    }

    /// Overwrite all fields of a social post. Returns `false` if no row
    /// matched the id.
    pub fn update_social_post(&self, id: i64, new: &NewSocialPost) -> Result<bool> {
        let platforms = serde_json::to_string(&new.platforms)?;
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE social_posts SET title = ?1, message = ?2, platforms = ?3, date = ?4
             WHERE id = ?5",
            params![new.title, new.message, platforms, new.date, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a social post. Returns `false` if no row matched the id.
    pub fn delete_social_post(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM social_posts WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}
