//! Error types for the catalog and playback seams.
//!
//! Application plumbing uses `anyhow`; these enums exist where callers need
//! to tell failures apart.

use thiserror::Error;

/// Failure while fetching or decoding a catalog page.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// The API reported a failure in its response headers.
    #[error("catalog API error {code}: {message}")]
    Api { code: i64, message: String },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while switching or driving the audio source.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A newer play/pause request superseded this one. Not a real failure.
    #[error("playback interrupted by a newer request")]
    Interrupted,

    /// Downloading the audio stream failed.
    #[error("failed to fetch audio from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The downloaded bytes could not be decoded.
    #[error("failed to decode audio: {0}")]
    Decode(String),

    /// The audio output refused the operation.
    #[error("audio output error: {0}")]
    Output(String),
}

impl PlaybackError {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
