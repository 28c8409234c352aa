use std::sync::Arc;

use eyre::Result;
use log::{debug, error, info};
use serde_json::Value;

use crate::config::Config;
use crate::transcript::{self, TranscriptLookup};
use crate::{SummarizeRequest, SummarizeResponse, extract_video_id, summarize};

/// Ways a summarization request can end without a summary.
///
/// `Display` yields the message shown to the caller; upstream details stay in
/// the logs.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("youtubeUrl required")]
    MissingUrl,
    #[error("language required")]
    MissingLanguage,
    #[error("Invalid YouTube URL")]
    InvalidUrl,
    #[error("Transcript not found")]
    TranscriptNotFound,
    #[error("Server error")]
    Upstream(eyre::Report),
}

/// Runs URL → transcript → summary for one request at a time.
///
/// Cheap to clone; holds only the shared HTTP client and read-only config.
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ytsum/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn run(&self, request: &SummarizeRequest) -> Result<SummarizeResponse, SummarizeError> {
        let url = present(&request.youtube_url).ok_or(SummarizeError::MissingUrl)?;
        let language = present(&request.language).ok_or(SummarizeError::MissingLanguage)?;

        let url = url.as_str().ok_or(SummarizeError::InvalidUrl)?;
        let language = match language {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let language = language.as_str();

        let video_id = extract_video_id(url).ok_or(SummarizeError::InvalidUrl)?;
        debug!("Extracted video ID {video_id} from {url}");

        let transcript = match transcript::fetch_transcript(&self.client, &self.config, &video_id).await {
            TranscriptLookup::Found(text) => text,
            TranscriptLookup::NotFound(_) | TranscriptLookup::Failed(_) => {
                return Err(SummarizeError::TranscriptNotFound);
            }
        };
        debug!("Transcript for {video_id}: {} chars", transcript.len());

        let summary = summarize::summarize(&self.client, &self.config, language, &transcript)
            .await
            .map_err(|e| {
                error!("Gemini API error for {video_id}: {e:#}");
                SummarizeError::Upstream(e)
            })?;

        info!("Summarized {video_id} in {language}");
        Ok(SummarizeResponse::ok(summary))
    }
}

/// A field counts as present when it holds a truthy value: not null, `false`, `0` or `""`
fn present(field: &Option<Value>) -> Option<&Value> {
    field.as_ref().filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
