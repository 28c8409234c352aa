use eyre::{Result, WrapErr, bail};
use log::{debug, error, warn};
use serde::Deserialize;

use crate::config::Config;

#[derive(Debug, Deserialize)]
struct TranscriptItem {
    text: Option<String>,
    tracks: Option<Vec<Track>>,
}

#[derive(Debug, Deserialize)]
struct Track {
    #[serde(default)]
    transcript: Vec<TrackSegment>,
}

#[derive(Debug, Deserialize)]
struct TrackSegment {
    text: Option<String>,
}

/// Outcome of asking the transcript provider for one video
#[derive(Debug)]
pub enum TranscriptLookup {
    Found(String),
    /// The provider answered, but had no usable transcript
    NotFound(&'static str),
    /// Transport failure or an unreadable provider response
    Failed(eyre::Report),
}

#[cfg(test)]
impl TranscriptLookup {
    fn into_text(self) -> Option<String> {
        match self {
            TranscriptLookup::Found(text) => Some(text),
            _ => None,
        }
    }
}

/// Fetch the transcript for a video from the transcript provider.
///
/// Never returns an error: failures are logged and reported as
/// [`TranscriptLookup::Failed`].
pub async fn fetch_transcript(client: &reqwest::Client, config: &Config, video_id: &str) -> TranscriptLookup {
    let items = match request_transcripts(client, config, video_id).await {
        Ok(items) => items,
        Err(e) => {
            error!("Transcript API error for {video_id}: {e:#}");
            return TranscriptLookup::Failed(e);
        }
    };

    let lookup = transcript_from_items(items);
    if let TranscriptLookup::NotFound(reason) = &lookup {
        warn!("No transcript for {video_id}: {reason}");
    }
    lookup
}

async fn request_transcripts(client: &reqwest::Client, config: &Config, video_id: &str) -> Result<Vec<TranscriptItem>> {
    let Some(api_key) = config.transcript_api_key.as_deref() else {
        bail!("YT_TRANSCRIPT_API_KEY is not configured");
    };

    let url = format!("{}/api/transcripts", config.transcript_base_url.trim_end_matches('/'));
    debug!("Requesting transcript for {video_id} from {url}");

    let body = serde_json::json!({ "ids": [video_id] });

    let resp = client
        .post(&url)
        .header("Authorization", format!("Basic {api_key}"))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("transcript API returned {status}: {body}");
    }

    let items = resp
        .json::<Vec<TranscriptItem>>()
        .await
        .wrap_err("unexpected transcript API response format")?;
    Ok(items)
}

/// Prefer the flat `text` field of the first item, then the first track's segments
fn transcript_from_items(items: Vec<TranscriptItem>) -> TranscriptLookup {
    let Some(item) = items.into_iter().next() else {
        return TranscriptLookup::NotFound("no transcript items found");
    };

    if let Some(text) = item.text.filter(|t| !t.is_empty()) {
        return TranscriptLookup::Found(text);
    }

    if let Some(track) = item.tracks.and_then(|tracks| tracks.into_iter().next()) {
        let combined = track
            .transcript
            .into_iter()
            .map(|s| s.text.unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ");
        if !combined.is_empty() {
            return TranscriptLookup::Found(combined);
        }
    }

    TranscriptLookup::NotFound("no transcript available in text or tracks")
}
