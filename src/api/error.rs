use thiserror::Error;

/// Everything that can go wrong while talking to the search service.
///
/// The variants only matter for the message text: the executor turns all of them into
/// the same `Failure` state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout...).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("request failed with status code {0}")]
    Http(u16),

    /// The body did not match the expected schema.
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::Http(status.as_u16()),
            None => ApiError::Network(err.to_string()),
        }
    }
}
