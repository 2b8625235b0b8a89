pub mod git;
pub mod pipeline;
pub mod screenshot;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("git {args:?} failed: {stderr}")]
    Git { args: Vec<String>, stderr: String },

    #[error("failed to parse git output: {0}")]
    Parse(String),

    #[error("screenshot command failed: {0}")]
    Screenshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
