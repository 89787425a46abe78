//! Error type shared by all evaluators.
//!
//! Every check runs before any computation starts, so a failed call never
//! hands back a partially evaluated curve.

use thiserror::Error;

/// Result type for curve evaluation.
pub type Result<T> = core::result::Result<T, Error>;

/// Structured failure of an evaluation call: the variant is the kind,
/// `Display` is the human-readable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Coordinates or parameters that are not finite numbers.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Fewer control points than the operation needs.
    #[error("not enough points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    #[error("degree must be positive, got {0}")]
    InvalidDegree(i64),

    #[error(
        "knot count must equal point count + degree + 1: expected {expected} knots, got {actual}"
    )]
    KnotCountMismatch { expected: usize, actual: usize },

    #[error("empty knot vector")]
    EmptyKnotVector,

    #[error("empty degree")]
    EmptyDegree,

    /// B-spline parameter outside `[knots[degree], knots[len - degree - 1]]`.
    #[error("parameter {t} is outside of the knot domain [{min}, {max}]")]
    OutOfDomain { t: f64, min: f64, max: f64 },

    /// Failure of the underlying numerics, e.g. a malformed knot vector or a
    /// singular interpolation system.
    #[error("numerical error: {0}")]
    Numerical(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knot_count_message_names_expected_length() {
        let err = Error::KnotCountMismatch {
            expected: 9,
            actual: 7,
        };
        let message = err.to_string();
        assert!(message.contains("point count + degree + 1"));
        assert!(message.contains("expected 9"));
    }

    #[test]
    fn insufficient_points_message() {
        let err = Error::InsufficientPoints {
            required: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "not enough points: need at least 2, got 1");
    }
}
