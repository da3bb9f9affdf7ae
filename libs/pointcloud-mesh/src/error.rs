//! # Mesh Errors
//!
//! Error types for point cloud meshing.
//!
//! Missing points are not errors: a zero-vector cell is ordinary input and is
//! skipped silently. Errors are reserved for inputs the pipeline cannot use
//! at all.

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while turning a point field into a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The input holds no usable points (for example, centering an all-missing field).
    #[error("Degenerate input: {message}")]
    DegenerateInput {
        /// What made the input unusable.
        message: String,
    },

    /// A parameter is outside the range the mesher accepts.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Which parameter was rejected and why.
        message: String,
    },

    /// A buffer does not hold `rows * cols` entries.
    #[error("Dimension mismatch: expected {expected} entries, got {actual}")]
    DimensionMismatch {
        /// Entries required by the declared grid shape.
        expected: usize,
        /// Entries actually supplied.
        actual: usize,
    },
}

impl MeshError {
    /// Creates a degenerate input error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<ConfigError> for MeshError {
    fn from(err: ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_become_configuration() {
        let err = MeshError::from(ConfigError::InvalidStep(0));
        assert!(matches!(err, MeshError::Configuration { .. }));
        assert_eq!(err.to_string(), "Configuration error: step must be >= 1: 0");
    }
}
