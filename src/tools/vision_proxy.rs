use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{ProgressUpdate, Tool, ToolContext, ToolOutput};
use crate::classify;
use crate::error::{GlanceError, Result};
use crate::vision::VisionAnalyzer;

/// Decorator around the host's file-read tool.
///
/// When the active model cannot see images and the requested path is a
/// supported image, the read is redirected to an out-of-process vision
/// model and the structured analysis text is returned in place of the file
/// contents.  In every other case the inner tool is invoked unchanged.
pub struct VisionReadTool {
    inner: Box<dyn Tool>,
    analyzer: Arc<VisionAnalyzer>,
}

impl VisionReadTool {
    pub fn wrap(inner: Box<dyn Tool>, analyzer: Arc<VisionAnalyzer>) -> Self {
        Self { inner, analyzer }
    }
}

#[async_trait]
impl Tool for VisionReadTool {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn parameters_schema(&self) -> serde_json::Value {
        self.inner.parameters_schema()
    }

    async fn execute(&self, params: serde_json::Value, ctx: &ToolContext) -> Result<ToolOutput> {
        let path = params
            .get("path")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let intercept = classify::is_supported_image(&path)
            && classify::requires_vision_proxy(ctx.model.as_deref());
        if !intercept {
            return self.inner.execute(params, ctx).await;
        }

        debug!(path, model = ?ctx.model, "proxying image read to vision model");
        ctx.notify(ProgressUpdate {
            message: format!("Analyzing {path} with {}...", self.analyzer.model()),
            model: None,
            done: false,
        });

        let text = match self.analyzer.analyze(&path, ctx.cancel.clone()).await {
            Ok(text) => text,
            Err(e @ GlanceError::Aborted) => return Err(e),
            Err(e) => {
                return Err(GlanceError::ToolExecution(format!(
                    "Image analysis failed: {e}"
                )));
            }
        };

        // Cancellation takes precedence even when it raced with success.
        if ctx.cancel.is_cancelled() {
            return Err(GlanceError::Aborted);
        }

        ctx.notify(ProgressUpdate {
            message: text.clone(),
            model: Some(self.analyzer.model().to_string()),
            done: true,
        });

        let meta = serde_json::json!({
            "vision_model": self.analyzer.model(),
            "source": path,
        });
        Ok(ToolOutput::ok_with_meta(
            format!("[Image analysis of {path}]\n\n{text}"),
            meta,
        ))
    }
}
