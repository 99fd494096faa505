//! Pulls generated text out of a provider response whose exact shape is not
//! guaranteed.

use serde_json::Value;

type Strategy = fn(&Value) -> Option<&str>;

/// Tried in order; the first hit wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("wrapped_parts", wrapped_parts),
    ("bare_parts", bare_parts),
    ("wrapped_content_text", wrapped_content_text),
];

fn wrapped_parts(value: &Value) -> Option<&str> {
    value
        .pointer("/response/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

fn bare_parts(value: &Value) -> Option<&str> {
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

fn wrapped_content_text(value: &Value) -> Option<&str> {
    value
        .pointer("/response/candidates/0/content/text")
        .and_then(Value::as_str)
}

/// Returns the generated text, or the whole response pretty-printed when no
/// known path holds a string. Never fails.
pub fn extract_generated_text(response: &Value) -> String {
    for (name, strategy) in STRATEGIES {
        if let Some(text) = strategy(response) {
            tracing::trace!(strategy = *name, "Extracted generated text");
            return text.to_string();
        }
    }

    tracing::warn!("No generated text found in provider response, returning raw dump");
    dump(response)
}

fn dump(response: &Value) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to pretty-print provider response");
        response.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_candidates_shape() {
        let response = json!({"candidates": [{"content": {"parts": [{"text": "X"}]}}]});
        assert_eq!(extract_generated_text(&response), "X");
    }

    #[test]
    fn test_wrapped_shape_wins_over_bare() {
        let response = json!({
            "response": {"candidates": [{"content": {"parts": [{"text": "wrapped"}]}}]},
            "candidates": [{"content": {"parts": [{"text": "bare"}]}}]
        });
        assert_eq!(extract_generated_text(&response), "wrapped");
    }

    #[test]
    fn test_wrapped_content_text_shape() {
        let response = json!({"response": {"candidates": [{"content": {"text": "flat"}}]}});
        assert_eq!(extract_generated_text(&response), "flat");
    }

    #[test]
    fn test_only_first_candidate_and_part_are_considered() {
        let response = json!({
            "candidates": [
                {"content": {"parts": [{"inlineData": {}}, {"text": "second part"}]}},
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        });
        assert_eq!(
            extract_generated_text(&response),
            serde_json::to_string_pretty(&response).unwrap()
        );
    }

    #[test]
    fn test_null_text_falls_through() {
        let response = json!({
            "candidates": [{"content": {"parts": [{"text": null}]}}],
            "response": {"candidates": [{"content": {"text": "fallback path"}}]}
        });
        assert_eq!(extract_generated_text(&response), "fallback path");
    }

    #[test]
    fn test_unknown_shape_returns_pretty_dump() {
        let response = json!({"error": {"code": 7, "status": "PERMISSION_DENIED"}});
        let dumped = extract_generated_text(&response);
        assert_eq!(dumped, serde_json::to_string_pretty(&response).unwrap());
        assert!(dumped.contains("\n  \"error\""));
    }

    #[test]
    fn test_non_object_response_is_dumped() {
        assert_eq!(extract_generated_text(&json!([1, 2])), "[\n  1,\n  2\n]");
        assert_eq!(extract_generated_text(&Value::Null), "null");
    }
}
