use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::CartStoreError;
use thiserror::Error;
use tracing::error;

/// Store failure rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CartStoreError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CartStoreError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CartStoreError::StorageUnavailable(_) | CartStoreError::Connection(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CartStoreError::DataCorruption(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CartStoreError> for ApiError {
    fn from(e: CartStoreError) -> Self {
        Self(e)
    }
}

/// Malformed request bodies are invalid arguments, rendered like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CartStoreError::InvalidArgument(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.0.to_string();
        if status.is_server_error() {
            error!(error = %msg, kind = self.0.kind(), "cart request failed");
        }
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cart store initialization failed: {0}")]
    Store(#[from] CartStoreError),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
