//! Error types for CLI operations.

use contracts::NullStreamError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Scenario file not found
    #[error("Scenario file not found: {path}")]
    ConfigNotFound { path: String },

    /// Scenario validation reported failures
    #[error("Scenario validation failed: {path}")]
    ValidationFailed { path: String },

    /// Error propagated from the pipeline crates
    #[error(transparent)]
    Scenario(#[from] NullStreamError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn validation_failed(path: impl Into<String>) -> Self {
        Self::ValidationFailed { path: path.into() }
    }

    /// Process exit code for this error class
    ///
    /// 2 = scenario problems, 3 = engine failures, 4 = IO, 1 = everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound { .. } | Self::ValidationFailed { .. } => 2,
            Self::Scenario(error) => match error {
                NullStreamError::ConfigParse { .. }
                | NullStreamError::ConfigValidation { .. }
                | NullStreamError::UnsupportedFormat { .. } => 2,
                NullStreamError::Io(_) => 4,
                _ => 3,
            },
            Self::Io(_) => 4,
            Self::Other(_) => 1,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_class() {
        assert_eq!(CliError::config_not_found("x.toml").exit_code(), 2);
        assert_eq!(
            CliError::from(NullStreamError::config_parse("bad")).exit_code(),
            2
        );
        assert_eq!(
            CliError::from(NullStreamError::singular_antenna_pattern(0.0, 1e-12)).exit_code(),
            3
        );
        assert_eq!(
            CliError::from(NullStreamError::shape_mismatch(1, 4, 2)).exit_code(),
            3
        );
        assert_eq!(
            CliError::from(anyhow::anyhow!("anything else")).exit_code(),
            1
        );
    }
}
