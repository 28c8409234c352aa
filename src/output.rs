use eyre::Result;

use crate::SummarizeResponse;

/// Render the summary as the markdown the model produced
pub fn render_text(response: &SummarizeResponse) -> String {
    response.summary.clone()
}

/// Render the full response payload, as the HTTP API would return it
pub fn render_json(response: &SummarizeResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> SummarizeResponse {
        SummarizeResponse::ok("- First point\n- Second point")
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&sample_response()), "- First point\n- Second point");
    }

    #[test]
    fn test_render_json() {
        let output = render_json(&sample_response()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({ "summary": "- First point\n- Second point", "success": true })
        );
    }
}
