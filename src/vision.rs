use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{GlanceError, Result};
use crate::prompt;
use crate::transcript;

/// Out-of-process vision analysis backed by the host CLI.
///
/// Invokes the CLI with the image path as an `@file` argument and a fixed
/// analysis prompt, requesting machine-readable (`--json`) output.  The
/// `GLANCE_VISION_BIN` and `GLANCE_VISION_MODEL` environment variables
/// override the configured binary and model.
pub struct VisionAnalyzer {
    cli_bin: String,
    provider: String,
    model: String,
    timeout_secs: u64,
}

impl VisionAnalyzer {
    pub fn new(config: &Config) -> Self {
        let cli_bin = std::env::var("GLANCE_VISION_BIN")
            .unwrap_or_else(|_| config.vision.cli_bin.clone());
        let model = std::env::var("GLANCE_VISION_MODEL")
            .unwrap_or_else(|_| config.vision.model.clone());

        info!(
            cli_bin = %cli_bin,
            provider = %config.vision.provider,
            model = %model,
            timeout_secs = config.vision.timeout_secs,
            "vision analyzer initialized"
        );

        Self {
            cli_bin,
            provider: config.vision.provider.clone(),
            model,
            timeout_secs: config.vision.timeout_secs,
        }
    }

    /// The vision model identifier used for invocations.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one analysis subprocess for the image at `image_path`.
    ///
    /// Resolves with the extracted analysis text on exit code 0.  A
    /// triggered `cancel` token kills the child and yields `Aborted`;
    /// cancellation wins even when it races with a successful exit.
    pub async fn analyze(&self, image_path: &str, cancel: CancellationToken) -> Result<String> {
        let mut cmd = Command::new(&self.cli_bin);
        cmd.arg(format!("@{image_path}"))
            .arg("--provider")
            .arg(&self.provider)
            .arg("--model")
            .arg(&self.model)
            .arg("--print")
            .arg("--json")
            .arg("--no-extensions")
            .arg("-p")
            .arg(prompt::analysis_prompt())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(image = %image_path, model = %self.model, "invoking vision CLI");

        let mut child = cmd.spawn().map_err(|e| {
            GlanceError::AnalysisLaunch(format!("{} ({e})", self.cli_bin))
        })?;

        // Accumulate both streams while the child runs; output is bounded
        // in practice by a single analysis response, so no cap.
        let stdout_task = tokio::spawn(read_to_string(child.stdout.take()));
        let stderr_task = tokio::spawn(read_to_string(child.stderr.take()));

        let status = tokio::select! {
            status = child.wait() => {
                status.map_err(|e| GlanceError::AnalysisLaunch(format!("{} ({e})", self.cli_bin)))?
            }
            _ = cancel.cancelled() => {
                let _ = child.kill().await;
                warn!(image = %image_path, "vision CLI cancelled");
                return Err(GlanceError::Aborted);
            }
            _ = expired(self.timeout_secs) => {
                let _ = child.kill().await;
                warn!(timeout_secs = self.timeout_secs, "vision CLI timed out");
                return Err(GlanceError::AnalysisExit {
                    code: None,
                    stderr: format!("timed out after {}s", self.timeout_secs),
                });
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            warn!(
                exit_code = ?status.code(),
                stderr = %stderr.trim(),
                "vision CLI exited with error"
            );
            return Err(GlanceError::AnalysisExit {
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        // A cancellation that raced with a successful exit still aborts;
        // the stale result must not reach the caller.
        if cancel.is_cancelled() {
            return Err(GlanceError::Aborted);
        }

        let text = transcript::extract_text(stdout.trim());
        info!(response_len = text.len(), "vision analysis received");
        Ok(text)
    }
}

async fn read_to_string<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    String::from_utf8_lossy(&buf).into_owned()
}

async fn expired(secs: u64) {
    if secs == 0 {
        std::future::pending::<()>().await
    } else {
        tokio::time::sleep(Duration::from_secs(secs)).await
    }
}
