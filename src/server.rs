use crate::error::ApiError;
use crate::fetcher::PageFetcher;
use crate::models::AnalysisReport;
use crate::state::SharedState;
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;

pub const ANALYZE_PATH: &str = "/api/seo/analyze";

/// Accepted request bodies: a bare JSON string, or `{"url": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnalyzeRequest {
    Bare(Option<String>),
    Object { url: Option<String> },
}

pub fn build_router<F: PageFetcher>(state: SharedState<F>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(ANALYZE_PATH, post(analyze_seo::<F>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve<F: PageFetcher>(host: &str, port: u16, state: SharedState<F>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        "Listening on http://{}:{}{}",
        host,
        port,
        ANALYZE_PATH
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

async fn analyze_seo<F: PageFetcher>(
    State(state): State<SharedState<F>>,
    body: Bytes,
) -> Result<Json<AnalysisReport>, ApiError> {
    let requested = parse_request(&body)?;
    let url = validate_url(requested.as_deref())?;
    let requested = requested.unwrap_or_default();

    let report = state.analyze(requested.trim(), &url).await;
    Ok(Json(report))
}

fn parse_request(body: &[u8]) -> Result<Option<String>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    match serde_json::from_slice::<AnalyzeRequest>(body) {
        Ok(AnalyzeRequest::Bare(url)) | Ok(AnalyzeRequest::Object { url }) => Ok(url),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed request body");
            Err(ApiError::MalformedBody)
        }
    }
}

/// Rejects blank input and anything that is not an absolute URL.
pub fn validate_url(input: Option<&str>) -> Result<Url, ApiError> {
    let input = input.map(str::trim).unwrap_or_default();
    if input.is_empty() {
        return Err(ApiError::MissingUrl);
    }

    Url::parse(input).map_err(|_| ApiError::InvalidUrl)
}
