use thiserror::Error;

/// Failure of a remote query operation.
///
/// Every variant carries the most specific message available: the
/// wiki-reported error description when the response embeds one, otherwise
/// the underlying transport or decode error.
#[derive(Debug, Error)]
pub enum WikiError {
    /// The request could not complete or came back with a failure status.
    #[error("wiki request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response was well-formed but carried an `error` payload.
    #[error("wiki API error: {0}")]
    Api(String),

    /// The response body did not match the expected shape.
    #[error("unexpected wiki response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Invalid connection parameters, detected once at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("wiki base URL is not configured (set WIKI_BASE_URL)")]
    MissingBaseUrl,
}
