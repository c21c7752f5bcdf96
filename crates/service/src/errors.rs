use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The backend connection cannot be established or was never set up.
    #[error("connection error: {0}")]
    Connection(String),
    /// A single backend operation failed or timed out.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// Stored bytes could not be decoded into a cart.
    #[error("data corruption: {0}")]
    DataCorruption(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl CartStoreError {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            CartStoreError::Connection(_) => "connection_error",
            CartStoreError::StorageUnavailable(_) => "storage_unavailable",
            CartStoreError::DataCorruption(_) => "data_corruption",
            CartStoreError::InvalidArgument(_) => "invalid_argument",
        }
    }
}

impl From<ModelError> for CartStoreError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => CartStoreError::InvalidArgument(msg),
        }
    }
}
