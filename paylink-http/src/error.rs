//! Shared error type for the HTTP collaborators.

/// Error talking to a token-search or chain-metadata endpoint.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Transport-level failure or JSON decode error.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL could not be constructed.
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// The upstream responded with a non-success status.
    #[error("unexpected status {status} from {endpoint}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Endpoint that produced it.
        endpoint: String,
    },
}
