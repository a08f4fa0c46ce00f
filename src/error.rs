//! Error handling module for funnelscope
//!
//! Provides centralized error handling with proper error types using thiserror.
//! An empty selection is not an error and never surfaces here.

use thiserror::Error;

/// Main error type for funnelscope
#[derive(Error, Debug)]
pub enum FunnelError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A stage table could not be loaded
    #[error("Failed to load {stage} from {path}: {reason}")]
    Load {
        stage: String,
        path: String,
        reason: String,
    },

    /// A required key column is absent from a stage table
    #[error("Column '{column}' not found in {category}")]
    MissingColumn { category: String, column: String },

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for funnelscope operations
pub type Result<T> = std::result::Result<T, FunnelError>;

impl FunnelError {
    /// Create a missing column error
    pub fn missing_column(category: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            category: category.into(),
            column: column.into(),
        }
    }

    /// Create a stage load error
    pub fn load(
        stage: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Load {
            stage: stage.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}
