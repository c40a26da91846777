pub mod file;
pub mod vision_proxy;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{GlanceError, Result};

/// Output from a tool execution.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolOutput {
    pub success: bool,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl ToolOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            metadata: None,
        }
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
            metadata: None,
        }
    }

    pub fn ok_with_meta(output: impl Into<String>, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            output: output.into(),
            metadata: Some(meta),
        }
    }
}

/// An intermediate or final status update emitted while a tool runs, for
/// the host's notification channel.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub message: String,
    /// Vision model the update is attributed to, when one was involved.
    pub model: Option<String>,
    /// Final updates embed the result text; intermediate ones do not.
    pub done: bool,
}

/// Shared context passed to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Identifier of the model driving this tool call, when the host
    /// supplies one.
    pub model: Option<String>,
    pub cancel: CancellationToken,
    pub progress: Option<mpsc::UnboundedSender<ProgressUpdate>>,
}

impl ToolContext {
    pub fn new(model: Option<String>) -> Self {
        Self {
            model,
            cancel: CancellationToken::new(),
            progress: None,
        }
    }

    pub fn notify(&self, update: ProgressUpdate) {
        if let Some(tx) = &self.progress {
            let _ = tx.send(update);
        }
    }
}

/// The trait all tools implement.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g. "read_file").
    fn name(&self) -> &str;

    /// Human-readable description for the model prompt.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given parameters.
    async fn execute(&self, params: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput>;
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Panics on duplicate names.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        assert!(
            !self.tools.contains_key(&name),
            "duplicate tool name: {name}"
        );
        self.tools.insert(name, tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// List all registered tools as (name, description) pairs.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut items: Vec<_> = self
            .tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect();
        items.sort_by_key(|(name, _)| *name);
        items
    }

    /// Execute a tool by name.
    pub async fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<ToolOutput> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| GlanceError::ToolNotFound(name.to_string()))?;
        tool.execute(params, ctx).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
