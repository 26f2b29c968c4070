//! Pipeline error types.

/// Errors that abort a render.
///
/// Per-document problems are `RenderError`s recorded on the document;
/// this type is for a pipeline that is wired up wrong.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
