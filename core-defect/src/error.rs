//! Defect module errors and transport error mapping

use bytes::Bytes;
use core_network::NetworkError;
use thiserror::Error;

/// Failures surfaced by the defect facade.
#[derive(Error, Debug, Clone)]
pub enum DefectError {
    #[error("There is a network Problem: invalid request!")]
    InvalidRequest,

    #[error("There is a network Problem: invalid response!")]
    InvalidResponse,

    /// Non-2xx answer; `data` holds the raw response body
    ///
    /// Only the status and body length are displayed. The body can echo the
    /// reporter's name or email back, so it never reaches the description.
    #[error(
        "There is a network Problem: data loading failed with status code {status_code} ({} bytes)",
        .data.len()
    )]
    DataLoading { status_code: u16, data: Bytes },

    /// Response did not match the expected schema
    #[error("{}", json_decoding_description(.0))]
    JsonDecoding(String),

    #[error("There is a network Problem: Internet connection failure!")]
    NoConnectivity,

    #[error("There is an unspecified network Problem!")]
    Network,

    #[error("Unknown error!")]
    Unknown,
}

/// Value-level result of the never-failing facade operations.
pub type DefectResult<T> = std::result::Result<T, DefectError>;

#[cfg(debug_assertions)]
fn json_decoding_description(detail: &str) -> String {
    format!("There is a network Problem: JSON decoding: {}", detail)
}

#[cfg(not(debug_assertions))]
fn json_decoding_description(_detail: &str) -> String {
    "There is a network Problem with JSON decoding".to_string()
}

impl DefectError {
    /// Map any transport failure onto the defect error taxonomy.
    ///
    /// Errors that are not [`NetworkError`]s become [`DefectError::Unknown`].
    pub fn from_transport(error: &(dyn std::error::Error + 'static)) -> Self {
        match error.downcast_ref::<NetworkError>() {
            Some(network) => Self::from(network.clone()),
            None => DefectError::Unknown,
        }
    }

    /// Variant name, stable for logs and analytics.
    pub fn kind(&self) -> &'static str {
        match self {
            DefectError::InvalidRequest => "invalid_request",
            DefectError::InvalidResponse => "invalid_response",
            DefectError::DataLoading { .. } => "data_loading",
            DefectError::JsonDecoding(_) => "json_decoding",
            DefectError::NoConnectivity => "no_connectivity",
            DefectError::Network => "network",
            DefectError::Unknown => "unknown",
        }
    }
}

impl From<NetworkError> for DefectError {
    fn from(error: NetworkError) -> Self {
        match error {
            NetworkError::InvalidRequest(_) => DefectError::InvalidRequest,
            NetworkError::InvalidResponse(_) => DefectError::InvalidResponse,
            NetworkError::DataLoading { status_code, data } => {
                DefectError::DataLoading { status_code, data }
            }
            NetworkError::JsonDecoding(detail) => DefectError::JsonDecoding(detail),
            NetworkError::NoConnectivity => DefectError::NoConnectivity,
            NetworkError::Transport(_) => DefectError::Network,
        }
    }
}

impl PartialEq for DefectError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                DefectError::DataLoading {
                    status_code: lhs_status,
                    data: lhs_data,
                },
                DefectError::DataLoading {
                    status_code: rhs_status,
                    data: rhs_data,
                },
            ) => lhs_status == rhs_status && lhs_data == rhs_data,
            // Decoding details are diagnostics only.
            (DefectError::JsonDecoding(_), DefectError::JsonDecoding(_)) => true,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for DefectError {}
