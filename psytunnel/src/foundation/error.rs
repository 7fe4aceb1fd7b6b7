use std::path::PathBuf;

/// Result alias used across the crate.
pub type TunnelResult<T> = Result<T, TunnelError>;

/// Errors surfaced by the synthesis pipeline and its sinks.
///
/// Degenerate geometry (a layer shrinking to nothing, a zoom collapsing to a point) is not an
/// error: the affected stage skips or clamps instead.
#[derive(thiserror::Error, Debug)]
pub enum TunnelError {
    /// The source image is missing or cannot be decoded.
    #[error("input error: '{}': {reason}", path.display())]
    Input {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// A parameter set or call argument is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame could not be synthesized.
    #[error("render error: {0}")]
    Render(String),

    /// The frame sink rejected a frame or failed to finalize.
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    /// Anything else, with its source chain preserved.
    Other(#[from] anyhow::Error),
}

impl TunnelError {
    /// Build an [`TunnelError::Input`] for `path`.
    pub fn input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`TunnelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TunnelError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TunnelError::Encoding`].
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
