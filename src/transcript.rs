//! Extraction of the analysis text from the vision CLI's structured output.
//!
//! The CLI emits a JSON transcript when `--json` is requested:
//! `{"messages":[{"role":"assistant","content":[{"type":"text","text":"..."}]}]}`.
//! Extraction is intentionally best-effort: any parse or shape failure
//! returns the raw text unchanged so diagnostic output is never lost.

use serde_json::Value;

/// Recover the human-readable analysis from raw CLI stdout.
///
/// Selects the last message with role "assistant", keeps its "text"
/// segments in order, and joins them with newlines.  A text segment with a
/// missing payload contributes an empty line at its position.  Anything
/// that is not a well-formed transcript comes back verbatim.
pub fn extract_text(raw: &str) -> String {
    let Ok(v) = serde_json::from_str::<Value>(raw) else {
        return raw.to_string();
    };

    let Some(messages) = v.get("messages").and_then(|m| m.as_array()) else {
        return raw.to_string();
    };

    let Some(assistant) = messages
        .iter()
        .rev()
        .find(|m| m.get("role").and_then(|r| r.as_str()) == Some("assistant"))
    else {
        return raw.to_string();
    };

    let Some(content) = assistant.get("content").and_then(|c| c.as_array()) else {
        return raw.to_string();
    };
    if content.is_empty() {
        return raw.to_string();
    }

    content
        .iter()
        .filter(|seg| seg.get("type").and_then(|t| t.as_str()) == Some("text"))
        .map(|seg| seg.get("text").and_then(|t| t.as_str()).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_assistant_message() {
        let raw = r#"{"messages":[{"role":"assistant","content":[{"type":"text","text":"**Category**: chart"}]}]}"#;
        assert_eq!(extract_text(raw), "**Category**: chart");
    }

    #[test]
    fn joins_text_segments_with_newline() {
        let raw = r#"{"messages":[{"role":"assistant","content":[{"type":"text","text":"A"},{"type":"text","text":"B"}]}]}"#;
        assert_eq!(extract_text(raw), "A\nB");
    }

    #[test]
    fn last_assistant_wins() {
        let raw = r#"{"messages":[
            {"role":"assistant","content":[{"type":"text","text":"first"}]},
            {"role":"user","content":[{"type":"text","text":"mid"}]},
            {"role":"assistant","content":[{"type":"text","text":"final"}]}
        ]}"#;
        assert_eq!(extract_text(raw), "final");
    }

    #[test]
    fn filters_non_text_segments() {
        let raw = r#"{"messages":[{"role":"assistant","content":[
            {"type":"text","text":"X"},
            {"type":"image","source":"..."},
            {"type":"text","text":"Y"}
        ]}]}"#;
        assert_eq!(extract_text(raw), "X\nY");
    }

    #[test]
    fn missing_text_payload_contributes_empty_line() {
        let raw = r#"{"messages":[{"role":"assistant","content":[
            {"type":"text","text":"X"},
            {"type":"text"},
            {"type":"text","text":"Y"}
        ]}]}"#;
        assert_eq!(extract_text(raw), "X\n\nY");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(extract_text(""), "");
    }

    #[test]
    fn non_json_returned_unchanged() {
        assert_eq!(extract_text("not json"), "not json");
    }

    #[test]
    fn json_without_messages_returned_unchanged() {
        let raw = r#"{"status":"ok"}"#;
        assert_eq!(extract_text(raw), raw);
    }

    #[test]
    fn empty_messages_returned_unchanged() {
        let raw = r#"{"messages":[]}"#;
        assert_eq!(extract_text(raw), raw);
    }

    #[test]
    fn no_assistant_message_returned_unchanged() {
        let raw = r#"{"messages":[{"role":"user","content":[{"type":"text","text":"hi"}]}]}"#;
        assert_eq!(extract_text(raw), raw);
    }

    #[test]
    fn assistant_without_content_returned_unchanged() {
        let raw = r#"{"messages":[{"role":"assistant"}]}"#;
        assert_eq!(extract_text(raw), raw);

        let raw = r#"{"messages":[{"role":"assistant","content":[]}]}"#;
        assert_eq!(extract_text(raw), raw);
    }

    #[test]
    fn idempotent_on_plain_text() {
        let plain = "just a description of the image";
        assert_eq!(extract_text(&extract_text(plain)), extract_text(plain));
    }
}
