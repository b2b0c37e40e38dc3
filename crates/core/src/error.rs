//! Error types for deck export.
//!
//! Building and editing a deck cannot fail; only encoding it for export and
//! writing it out can.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to encode the presentation as JSON.
    #[error("Failed to serialize presentation: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to write an exported deck.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
