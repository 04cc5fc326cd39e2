//! Turning a completion response into a shot-list body.

use serde::Deserialize;
use serde_json::Value;

use crate::shots::types::ShotList;

/// Content used when the completion carries none.
const EMPTY_CONTENT: &str = "{}";

/// Outcome of parsing model content.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedShots {
    /// JSON body to relay to the caller.
    pub body: Value,
    /// True when the model content was not JSON and `body` is the empty list.
    pub degraded: bool,
}

/// `choices[0].message.content` from a completion body, or `"{}"` when any
/// level is missing, not a string, or empty.
pub fn extract_content(completion: &Value) -> &str {
    completion
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .unwrap_or(EMPTY_CONTENT)
}

/// Parse model content into a response body.
///
/// Any content that parses as JSON is relayed exactly as produced. Only
/// unparseable content yields `{"shots": []}` with `degraded` set.
pub fn parse_shot_list(content: &str) -> ParsedShots {
    match serde_json::from_str::<Value>(content) {
        Ok(body) => {
            if ShotList::deserialize(&body).is_err() {
                tracing::debug!("Model content is not shot-list shaped; relaying as produced");
            }
            ParsedShots {
                body,
                degraded: false,
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "Model content is not JSON");
            ParsedShots {
                body: degraded_body(),
                degraded: true,
            }
        }
    }
}

fn degraded_body() -> Value {
    serde_json::to_value(ShotList::empty()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_first_choice() {
        let completion = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "{\"shots\":[]}" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(extract_content(&completion), "{\"shots\":[]}");
    }

    #[test]
    fn test_extract_defaults_at_every_level() {
        assert_eq!(extract_content(&json!({})), "{}");
        assert_eq!(extract_content(&json!({ "choices": [] })), "{}");
        assert_eq!(extract_content(&json!({ "choices": [{}] })), "{}");
        assert_eq!(extract_content(&json!({ "choices": [{ "message": {} }] })), "{}");
        assert_eq!(
            extract_content(&json!({ "choices": [{ "message": { "content": null } }] })),
            "{}"
        );
        assert_eq!(
            extract_content(&json!({ "choices": [{ "message": { "content": "" } }] })),
            "{}"
        );
    }

    #[test]
    fn test_content_round_trips_exactly() {
        let content = r#"{"shots":[{"n":1,"slugline":"INT. KITCHEN - NIGHT","description":"Kettle boils.","angle":"CU","movement":"static","location":"Kitchen","time_of_day":"NIGHT","props":["kettle"],"notes":"","lens":"50mm"}],"title":"Pilot"}"#;
        let parsed = parse_shot_list(content);
        assert!(!parsed.degraded);
        assert_eq!(parsed.body, serde_json::from_str::<Value>(content).unwrap());
    }

    #[test]
    fn test_invalid_json_degrades() {
        let parsed = parse_shot_list("not json");
        assert!(parsed.degraded);
        assert_eq!(parsed.body, json!({ "shots": [] }));
    }

    #[test]
    fn test_any_valid_json_is_relayed() {
        for content in [
            "{}",
            "42",
            "[]",
            r#"{"shots": "none"}"#,
            r#"{"shots":[{"n":"1","notes":null}]}"#,
            r#"{"shots":[{"n":1.0}]}"#,
        ] {
            let parsed = parse_shot_list(content);
            assert!(!parsed.degraded, "{content} should be relayed");
            assert_eq!(parsed.body, serde_json::from_str::<Value>(content).unwrap());
        }
    }

    #[test]
    fn test_null_notes_keep_the_whole_list() {
        let content = r#"{"shots":[{"n":1,"slugline":"INT. HALL - DAY","notes":null},{"n":2,"slugline":"INT. HALL - DAY","notes":"hold"}]}"#;
        let parsed = parse_shot_list(content);
        assert!(!parsed.degraded);
        assert_eq!(parsed.body["shots"].as_array().map(Vec::len), Some(2));
        assert_eq!(parsed.body["shots"][0]["notes"], Value::Null);
    }

    #[test]
    fn test_legitimately_empty_list_is_not_degraded() {
        let parsed = parse_shot_list(r#"{"shots":[]}"#);
        assert!(!parsed.degraded);
        assert_eq!(parsed.body, json!({ "shots": [] }));
    }
}
