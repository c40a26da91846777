use async_trait::async_trait;
use tracing::debug;

use super::{Tool, ToolContext, ToolOutput};
use crate::error::Result;

/// The host's plain file-read capability.  The vision proxy wraps this tool
/// and delegates to it unchanged whenever interception does not apply.
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read a file and return its contents as text."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["path"],
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Absolute path of the file to read"
                }
            }
        })
    }

    async fn execute(&self, params: serde_json::Value, _ctx: &ToolContext) -> Result<ToolOutput> {
        let path = params
            .get("path")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        if path.is_empty() {
            return Ok(ToolOutput::error("path is required"));
        }

        debug!(path, "reading file");

        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Ok(ToolOutput::ok(contents)),
            Err(e) => Ok(ToolOutput::error(format!("failed to read: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_file_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "world").unwrap();

        let ctx = ToolContext::new(None);
        let result = ReadFileTool
            .execute(serde_json::json!({"path": path.to_str().unwrap()}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output, "world");
    }

    #[tokio::test]
    async fn read_file_not_found() {
        let ctx = ToolContext::new(None);
        let result = ReadFileTool
            .execute(serde_json::json!({"path": "/nonexistent/glance-test.txt"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.output.contains("failed to read"));
    }

    #[tokio::test]
    async fn read_file_empty_path() {
        let ctx = ToolContext::new(None);
        let result = ReadFileTool
            .execute(serde_json::json!({"path": ""}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.output.contains("path is required"));
    }

    #[test]
    fn tool_name_and_schema() {
        assert_eq!(ReadFileTool.name(), "read_file");
        assert!(!ReadFileTool.description().is_empty());
        let schema = ReadFileTool.parameters_schema();
        assert_eq!(schema["type"], "object");
        assert!(
            schema["required"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("path"))
        );
    }
}
