// ============================================================================
// Numeric Errors
// Error types for exponent arithmetic and magnitude operations
// ============================================================================

use std::fmt;

/// Errors that can occur in rational-exponent arithmetic and elementwise
/// magnitude operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericError {
    /// Reduced numerator or denominator exceeded i32 range
    Overflow,
    /// Attempted division by zero (zero denominator or reciprocal of zero)
    DivisionByZero,
    /// Input string or value is invalid
    InvalidInput,
    /// Two arrays with different shapes were combined elementwise
    ShapeMismatch {
        left: Vec<usize>,
        right: Vec<usize>,
    },
    /// Array rank exceeds the supported maximum
    RankTooHigh(usize),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: rational exponent out of range")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::ShapeMismatch { left, right } => write!(
                f,
                "shape mismatch: operands with shapes {:?} and {:?} cannot be combined",
                left, right
            ),
            NumericError::RankTooHigh(rank) => write!(
                f,
                "array rank {} exceeds the supported maximum of {}",
                rank,
                super::magnitude::MAX_RANK
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: rational exponent out of range"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            NumericError::ShapeMismatch {
                left: vec![3],
                right: vec![2]
            }
            .to_string(),
            "shape mismatch: operands with shapes [3] and [2] cannot be combined"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::DivisionByZero);
    }
}
