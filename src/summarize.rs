use eyre::{Result, WrapErr, bail};
use log::{debug, warn};

use crate::config::Config;

/// Returned in place of a summary when the model response has no text part
pub const FALLBACK_SUMMARY: &str = "Unable to generate summary.";

/// Build the instruction sent to the model. The transcript is passed through untruncated.
pub fn build_prompt(language: &str, transcript: &str) -> String {
    format!(
        "Summarize the following YouTube transcript in {language}.\n\
         Use bullet points. Make it readable.\n\
         \n\
         Transcript:\n\
         {transcript}\n"
    )
}

/// Summarize a transcript with Gemini
pub async fn summarize(client: &reqwest::Client, config: &Config, language: &str, transcript: &str) -> Result<String> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        bail!("GEMINI_API_KEY is not configured");
    };

    let model = &config.gemini_model;
    debug!("Summarizing via Gemini API with model {model}");

    let url = format!(
        "{}/v1beta/models/{model}:generateContent",
        config.gemini_base_url.trim_end_matches('/')
    );

    let body = serde_json::json!({
        "contents": [
            {
                "parts": [
                    { "text": build_prompt(language, transcript) }
                ]
            }
        ]
    });

    let resp = client
        .post(&url)
        .query(&[("key", api_key)])
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("Gemini API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await.wrap_err("Gemini API returned invalid JSON")?;
    Ok(extract_gemini_text(&json).unwrap_or_else(|| {
        warn!("Gemini response had no candidate text, using fallback summary");
        FALLBACK_SUMMARY.to_string()
    }))
}

fn extract_gemini_text(json: &serde_json::Value) -> Option<String> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
}
