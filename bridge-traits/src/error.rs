use thiserror::Error;

/// Errors raised by host bridge implementations.
///
/// The transport-flavoured variants (`InvalidRequest`, `NoConnectivity`,
/// `Timeout`) let upper layers classify failures without inspecting
/// platform-specific error types.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Request could not be built: {0}")]
    InvalidRequest(String),

    #[error("No network connectivity: {0}")]
    NoConnectivity(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
