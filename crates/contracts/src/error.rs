//! Unified error type shared across the workspace.
//!
//! Every fallible operation in the pipeline returns [`NullStreamError`].
//! Variants carry enough structure for callers to branch on the failure
//! class without parsing messages.

use std::error::Error as StdError;

use thiserror::Error;

/// Workspace-wide error taxonomy.
#[derive(Debug, Error)]
pub enum NullStreamError {
    /// Malformed engine input detected before any computation ran.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A detector channel does not match the sample count of the reference.
    #[error("shape mismatch on detector {detector}: expected {expected} samples, got {actual}")]
    ShapeMismatch {
        detector: usize,
        expected: usize,
        actual: usize,
    },

    /// The antenna-pattern denominator is too close to zero to solve for
    /// the combination coefficients.
    #[error("singular antenna pattern: |denominator| = {denominator:.3e} <= epsilon = {epsilon:.3e}")]
    SingularAntennaPattern { denominator: f64, epsilon: f64 },

    /// A configuration document could not be parsed.
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A configuration document parsed but failed a semantic rule.
    #[error("config validation failed for `{field}`: {message}")]
    ConfigValidation { field: String, message: String },

    /// The configuration file extension is not one we can load.
    #[error("unsupported config format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl NullStreamError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn shape_mismatch(detector: usize, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            detector,
            expected,
            actual,
        }
    }

    pub fn singular_antenna_pattern(denominator: f64, epsilon: f64) -> Self {
        Self::SingularAntennaPattern {
            denominator,
            epsilon,
        }
    }

    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_parse_with_source(
        message: impl Into<String>,
        source: Box<dyn StdError + Send + Sync>,
    ) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Short label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::ShapeMismatch { .. } => "shape_mismatch",
            Self::SingularAntennaPattern { .. } => "singular_antenna_pattern",
            Self::ConfigParse { .. } => "config_parse",
            Self::ConfigValidation { .. } => "config_validation",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::Io(_) => "io",
        }
    }
}
