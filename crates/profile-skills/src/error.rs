//! Error types for profile-skills

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid skill catalog: {0}")]
    InvalidCatalog(#[from] toml::de::Error),

    #[error("Failed to read skill catalog: {0}")]
    Io(#[from] std::io::Error),
}
