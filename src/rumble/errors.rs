use thiserror::Error;

#[derive(Error, Debug)]
pub enum RumbleError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned non-success status: {0}")]
    ApiStatus(reqwest::StatusCode),

    #[error("failed to decode API response: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("no livestream is currently active")]
    NoActiveLivestream,

    #[error("no livestream matches id {0}")]
    NoMatchingLivestream(String),
}
