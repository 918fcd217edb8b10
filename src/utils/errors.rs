use thiserror::Error;

/// Failure of a single catalog chunk fetch.
///
/// The adapter never retries; callers decide what to do with each variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, timeout or request construction failure
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded into catalog records
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    /// The catalog answered with a non-success HTTP status
    #[error("Catalog returned HTTP {0}")]
    UpstreamStatus(u16),
}

impl FetchError {
    /// Check if repeating the same request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::UpstreamStatus(code) => *code == 429 || *code >= 500,
            FetchError::Decode(_) => false,
        }
    }

    /// Create an error from a reqwest error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_decode() {
            FetchError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            FetchError::UpstreamStatus(status.as_u16())
        } else if error.is_timeout() {
            FetchError::Network(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            FetchError::Network(format!("Connection failed: {}", error))
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Decode(error.to_string())
    }
}

/// Failure reading or writing the persisted user state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Stored data exists but cannot be decoded
    #[error("Persisted state is malformed: {0}")]
    Malformed(String),

    /// The backing storage could not be read or written
    #[error("Persisted state unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(error: std::io::Error) -> Self {
        PersistenceError::Unavailable(error.to_string())
    }
}

/// Caller contract violations, rejected before reaching the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid page number {0}: pages start at 1")]
    InvalidPage(i64),

    #[error("Invalid specification: {0}")]
    InvalidSpec(String),
}
