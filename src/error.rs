use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request validation failures. All of them are rejected before any fetch happens.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("URL is required.")]
    MissingUrl,

    #[error("Invalid URL format.")]
    InvalidUrl,

    #[error("Request body must be a JSON string containing the URL.")]
    MalformedBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::InvalidUrl => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}
