pub mod config;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod summarize;
pub mod transcript;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Incoming summarization request, as posted by the browser UI.
///
/// Fields keep their raw JSON value; presence and type are judged by
/// [`pipeline::Pipeline::run`], not by deserialization.
#[derive(Debug, Clone, Default)]
pub struct SummarizeRequest {
    pub youtube_url: Option<Value>,
    pub language: Option<Value>,
}

impl SummarizeRequest {
    pub fn new(youtube_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            youtube_url: Some(Value::String(youtube_url.into())),
            language: Some(Value::String(language.into())),
        }
    }

    /// Pick `youtubeUrl` and `language` out of a request body; a non-object body has neither
    pub fn from_body(body: &Value) -> Self {
        Self {
            youtube_url: body.get("youtubeUrl").cloned(),
            language: body.get("language").cloned(),
        }
    }
}

/// Successful summarization result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub success: bool,
}

impl SummarizeResponse {
    pub fn ok(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            success: true,
        }
    }
}

/// Extract the video ID from a YouTube URL.
///
/// Tries `v=`, `youtu.be/` and `/shorts/` in that order; the first marker
/// present decides the outcome. The token is not checked against YouTube's
/// ID format.
pub fn extract_video_id(input: &str) -> Option<String> {
    let id = if let Some(rest) = after_marker(input, "v=") {
        rest.split('&').next()
    } else if let Some(rest) = after_marker(input, "youtu.be/") {
        rest.split('?').next()
    } else if let Some(rest) = after_marker(input, "/shorts/") {
        rest.split('?').next()
    } else {
        None
    }?;

    if id.is_empty() { None } else { Some(id.to_string()) }
}

fn after_marker<'a>(input: &'a str, marker: &str) -> Option<&'a str> {
    input.find(marker).map(|idx| &input[idx + marker.len()..])
}

/// Embeddable player URL for a video ID
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120&list=PL1"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abc123?feature=share"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_id_is_not_validated() {
        assert_eq!(extract_video_id("v=anything goes"), Some("anything goes".to_string()));
    }

    #[test]
    fn test_first_rule_wins() {
        // `v=` takes priority even when the URL also contains `youtu.be/`
        assert_eq!(
            extract_video_id("https://youtu.be/short?v=long&x=1"),
            Some("long".to_string())
        );
        assert_eq!(extract_video_id("https://youtu.be/a?b/shorts/c"), Some("a".to_string()));
    }

    #[test]
    fn test_matched_but_empty_is_none() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=&t=1"), None);
        assert_eq!(extract_video_id("https://youtu.be/"), None);
        // a matched rule does not fall through to the next one
        assert_eq!(extract_video_id("https://youtu.be/?v="), None);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id("not a url at all \u{0}\u{fffd}"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_multibyte_input() {
        assert_eq!(extract_video_id("ñ?v=ид&x"), Some("ид".to_string()));
        assert_eq!(extract_video_id("🎵 youtu.be/🎶?t=1"), Some("🎶".to_string()));
    }

    #[test]
    fn test_request_from_body() {
        let req = SummarizeRequest::from_body(&serde_json::json!({ "youtubeUrl": "u", "language": 42 }));
        assert_eq!(req.youtube_url, Some(Value::String("u".to_string())));
        assert_eq!(req.language, Some(serde_json::json!(42)));

        let req = SummarizeRequest::from_body(&serde_json::json!(["youtubeUrl"]));
        assert!(req.youtube_url.is_none());
        assert!(req.language.is_none());
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(embed_url("abc123"), "https://www.youtube.com/embed/abc123");
    }
}
