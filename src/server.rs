use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use eyre::{Result, WrapErr};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::pipeline::{Pipeline, SummarizeError};
use crate::{SummarizeRequest, SummarizeResponse, embed_url, extract_video_id};

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        let status = match &self {
            SummarizeError::MissingUrl | SummarizeError::MissingLanguage | SummarizeError::InvalidUrl => {
                StatusCode::BAD_REQUEST
            }
            SummarizeError::TranscriptNotFound => StatusCode::NOT_FOUND,
            SummarizeError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            SummarizeError::Upstream(_) => serde_json::json!({ "error": self.to_string(), "success": false }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

/// Build the HTTP router: summarize API, ID lookup, index, permissive CORS and access logging
pub fn router(pipeline: Pipeline) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/summarize", post(summarize_video))
        .route("/api/video-id", get(video_id))
        .with_state(pipeline)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
}

/// Bind to the configured host/port and serve until Ctrl-C
pub async fn serve(pipeline: Pipeline) -> Result<()> {
    let addr = format!("{}:{}", pipeline.config().host, pipeline.config().port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("binding to {addr}"))?;
    info!("Server running on http://{addr}");

    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("running HTTP server")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {e}");
    }
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let resp = next.run(req).await;

    info!("{method} {path} {} {:.1?}", resp.status().as_u16(), start.elapsed());
    resp
}

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "YouTube Summarizer",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "Service index",
            "POST /api/summarize": "Summarize a video transcript (body: {youtubeUrl, language})",
            "GET /api/video-id": "Extract the video ID from a URL (query: url)"
        }
    }))
}

async fn summarize_video(
    State(pipeline): State<Pipeline>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, Response> {
    let request = match body {
        Ok(Json(body)) => SummarizeRequest::from_body(&body),
        // No JSON body at all reads as a request with every field missing
        Err(JsonRejection::MissingJsonContentType(_)) => SummarizeRequest::default(),
        Err(rejection) => {
            warn!("Rejected summarize body: {}", rejection.body_text());
            return Err(bad_request("Invalid JSON body"));
        }
    };

    pipeline
        .run(&request)
        .await
        .map(Json)
        .map_err(IntoResponse::into_response)
}

#[derive(Debug, Deserialize)]
struct VideoIdQuery {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoIdResponse {
    video_id: String,
    embed_url: String,
}

async fn video_id(Query(query): Query<VideoIdQuery>) -> Result<Json<VideoIdResponse>, SummarizeError> {
    let url = query.url.unwrap_or_default();
    let video_id = extract_video_id(&url).ok_or(SummarizeError::InvalidUrl)?;
    Ok(Json(VideoIdResponse {
        embed_url: embed_url(&video_id),
        video_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let cases = [
            (SummarizeError::MissingUrl, StatusCode::BAD_REQUEST, "youtubeUrl required"),
            (SummarizeError::MissingLanguage, StatusCode::BAD_REQUEST, "language required"),
            (SummarizeError::InvalidUrl, StatusCode::BAD_REQUEST, "Invalid YouTube URL"),
            (SummarizeError::TranscriptNotFound, StatusCode::NOT_FOUND, "Transcript not found"),
        ];
        for (err, status, message) in cases {
            let resp = err.into_response();
            assert_eq!(resp.status(), status);
            assert_eq!(body_json(resp).await, serde_json::json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn test_upstream_error_hides_details() {
        let resp = SummarizeError::Upstream(eyre::eyre!("Gemini API returned 403: key leaked")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({ "error": "Server error", "success": false })
        );
    }

    #[tokio::test]
    async fn test_video_id_handler() {
        let Json(resp) = video_id(Query(VideoIdQuery {
            url: Some("https://youtu.be/abc123?t=5".to_string()),
        }))
        .await
        .unwrap();
        assert_eq!(resp.video_id, "abc123");
        assert_eq!(resp.embed_url, "https://www.youtube.com/embed/abc123");
    }

    #[tokio::test]
    async fn test_video_id_handler_missing_url() {
        let result = video_id(Query(VideoIdQuery { url: None })).await;
        assert!(matches!(result, Err(SummarizeError::InvalidUrl)));
    }
}
