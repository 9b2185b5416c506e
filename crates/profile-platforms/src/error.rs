//! Error types for profile-platforms

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The session cookie/token was rejected or absent. Expected condition;
    /// adapters convert it to `FetchOutcome::AuthRequired` at the fetch
    /// boundary.
    #[error("Authentication required")]
    Unauthorized,

    /// A remote call failed (network, HTTP status, driver fault).
    #[error("Remote call failed: {message}")]
    Remote { message: String },

    /// A remote call exceeded its per-call timeout.
    #[error("Remote call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The account's resume container is missing, so structured section
    /// calls have nothing to address.
    #[error("No resume container on remote account")]
    MissingContainer,

    /// A plan payload did not carry the field a call needs.
    #[error("Malformed plan payload: {0}")]
    MalformedPayload(String),
}

impl Error {
    /// Shorthand for transport-level failures.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}
