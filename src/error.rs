//! Error types for the visualization engine

use thiserror::Error;

/// Result type for geometry and configuration operations
pub type VisualResult<T> = Result<T, VisualError>;

/// Errors the engine can report
///
/// None of these are fatal: a caller that receives one skips rendering the
/// artifact it asked for.
#[derive(Error, Debug)]
pub enum VisualError {
    #[error("phase {phase} is outside [0, 2π)")]
    InvalidPhase { phase: f64 },

    #[error("invalid {what}: {value}")]
    InvalidDimension { what: &'static str, value: f64 },

    #[error("yield {yield_mt} Mt cannot be scaled")]
    DegenerateYield { yield_mt: f64 },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VisualError {
    pub(crate) fn dimension(what: &'static str, value: f64) -> Self {
        VisualError::InvalidDimension { what, value }
    }
}

/// Require a finite, strictly positive dimension
pub(crate) fn require_positive(what: &'static str, value: f64) -> VisualResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(VisualError::dimension(what, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("radius", 2.5).unwrap(), 2.5);
        assert!(matches!(
            require_positive("radius", 0.0),
            Err(VisualError::InvalidDimension { what: "radius", .. })
        ));
        assert!(require_positive("depth", -1.0).is_err());
        assert!(require_positive("depth", f64::NAN).is_err());
        assert!(require_positive("depth", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = VisualError::InvalidPhase { phase: 7.0 };
        assert!(err.to_string().contains("7"));
        let err = VisualError::dimension("grid size", 1.0);
        assert_eq!(err.to_string(), "invalid grid size: 1");
    }
}
