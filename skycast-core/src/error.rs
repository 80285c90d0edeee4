use thiserror::Error;

/// Failures of a provider request/response exchange.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The weather provider answered with a non-success status for the
    /// requested city.
    #[error("City not found")]
    CityNotFound,

    /// The provider payload could not be decoded, or a required field was
    /// absent or of the wrong type.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// The request could not be sent, or the body could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}
