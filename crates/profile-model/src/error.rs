//! Error types for profile-model

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid canonical profile: {0}")]
    InvalidProfile(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
