//! Error types shared across Reelsmith crates.

use std::path::PathBuf;

/// Top-level error type for Reelsmith operations.
///
/// Every pipeline stage maps its failures into one of these variants;
/// cleanup failures are deliberately absent (they are logged as warnings
/// and never abort anything).
#[derive(Debug, thiserror::Error)]
pub enum ReelsmithError {
    #[error("Asset missing: {message}")]
    AssetMissing { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Encode error: {message}")]
    Encode { message: String },

    #[error("Synthesis error: {message}")]
    Synthesis { message: String },

    #[error("Mux error: {message}")]
    Mux { message: String },

    #[error("Content error: {message}")]
    Content { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ReelsmithError.
pub type ReelsmithResult<T> = Result<T, ReelsmithError>;

impl ReelsmithError {
    pub fn asset_missing(msg: impl Into<String>) -> Self {
        Self::AssetMissing {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode {
            message: msg.into(),
        }
    }

    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis {
            message: msg.into(),
        }
    }

    pub fn mux(msg: impl Into<String>) -> Self {
        Self::Mux {
            message: msg.into(),
        }
    }

    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// The pipeline stage this error belongs to, for log context.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::AssetMissing { .. } | Self::Render { .. } => "rendering_frames",
            Self::Encode { .. } => "encoding",
            Self::Synthesis { .. } => "synthesizing",
            Self::Mux { .. } => "muxing",
            Self::Content { .. } => "content",
            Self::Config { .. } => "config",
            Self::FileNotFound { .. } | Self::Io(_) | Self::Json(_) | Self::Other(_) => "io",
        }
    }
}
