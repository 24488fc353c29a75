//! Error types for terrain generation.
//!
//! Generation is pure and deterministic, so the only failure mode is a bad
//! input. Every check runs before any sampling starts; a call either fails
//! up front or produces a complete grid.

use thiserror::Error;

/// Errors returned by the generation entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoiseError {
    /// A generation parameter is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter (e.g. `"width"`, `"scale"`).
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
}

impl NoiseError {
    /// Create an [`NoiseError::InvalidParameter`] for `name`.
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Name of the parameter that caused the error.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_parameter_and_reason() {
        let err = NoiseError::invalid_parameter("scale", "must be non-zero, got 0");
        assert_eq!(
            err.to_string(),
            "invalid parameter `scale`: must be non-zero, got 0"
        );
        assert_eq!(err.parameter(), "scale");
    }
}
