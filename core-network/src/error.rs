//! Transport error taxonomy

use bridge_traits::BridgeError;
use bytes::Bytes;
use thiserror::Error;

/// Failures of a single Parse request.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    /// The request could not be built (unusable base URL, missing payload,
    /// unserializable body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The server answered, but not with a structurally valid response
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered with a status outside 2xx
    #[error("Data loading failed with status {status_code} ({} bytes)", .data.len())]
    DataLoading { status_code: u16, data: Bytes },

    /// The response is JSON but does not match the expected schema
    #[error("JSON decoding failed: {0}")]
    JsonDecoding(String),

    #[error("No internet connection")]
    NoConnectivity,

    /// Any other transport failure reported by the HTTP client
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl From<BridgeError> for NetworkError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::InvalidRequest(msg) => NetworkError::InvalidRequest(msg),
            BridgeError::NoConnectivity(_) => NetworkError::NoConnectivity,
            other => NetworkError::Transport(other.to_string()),
        }
    }
}
