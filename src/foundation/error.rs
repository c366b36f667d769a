/// Convenience result type used across the previewer.
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Top-level error taxonomy for stages, previews and surfaces.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// Invalid environment overrides or runtime configuration values.
    #[error("configuration error: {0}")]
    Config(String),

    /// Preview size could not be computed from the capture and target sizes.
    #[error("sizing error: {0}")]
    Sizing(String),

    /// A display surface rejected or failed to show a frame.
    #[error("display error: {0}")]
    Display(String),

    /// A pipeline stage failed while executing or exposing its outputs.
    #[error("stage error: {0}")]
    Stage(String),

    /// The capture source could not produce metadata or frames.
    #[error("capture error: {0}")]
    Capture(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreviewError {
    /// Build a [`PreviewError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PreviewError::Sizing`] value.
    pub fn sizing(msg: impl Into<String>) -> Self {
        Self::Sizing(msg.into())
    }

    /// Build a [`PreviewError::Display`] value.
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display(msg.into())
    }

    /// Build a [`PreviewError::Stage`] value.
    pub fn stage(msg: impl Into<String>) -> Self {
        Self::Stage(msg.into())
    }

    /// Build a [`PreviewError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
