use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlanceError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to launch vision CLI: {0}")]
    AnalysisLaunch(String),

    #[error("vision CLI exited with {code:?}: {stderr}")]
    AnalysisExit { code: Option<i32>, stderr: String },

    #[error("operation aborted")]
    Aborted,

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("tool execution error: {0}")]
    ToolExecution(String),
}

pub type Result<T> = std::result::Result<T, GlanceError>;
