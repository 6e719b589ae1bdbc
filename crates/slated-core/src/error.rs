//! Error types for the store layer.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing the calendar database.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error (I/O, constraint violation, locked database).
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The stored platforms column could not be decoded as a JSON array.
    #[error("platforms encoding error: {0}")]
    Platforms(#[from] serde_json::Error),

    /// Filesystem error while creating the database directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
