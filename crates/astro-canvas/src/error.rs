//! Error types for the few fallible edges of the engine.
//!
//! Rendering itself never fails: these errors are recovered inside the
//! owning component and surface to users only as "content not shown".

/// Errors fetching or decoding the Astronomy Picture of the Day.
#[derive(Debug, thiserror::Error)]
pub enum ApodError {
    /// The request never produced a response (offline, DNS, CORS...).
    #[error("APOD request failed: {0}")]
    Transport(String),

    /// The API answered with a non-200 status.
    #[error("APOD request returned HTTP {0}")]
    Status(u16),

    /// The response body was not a valid APOD record.
    #[error("failed to parse APOD response: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Errors persisting state to key-value storage.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or missing (private browsing, no window).
    #[error("storage is unavailable")]
    Unavailable,

    /// The backend refused the write.
    #[error("storage write rejected: {0}")]
    Rejected(String),

    /// The value could not be encoded as JSON.
    #[error("failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
}
