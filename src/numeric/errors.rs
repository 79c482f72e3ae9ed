// ============================================================================
// Numeric Errors
// Error types for fraction parsing and arithmetic
// ============================================================================

use thiserror::Error;

/// Errors that can occur while building or combining fractions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionError {
    /// Input text is not of the form "numerator/denominator"
    #[error("malformed fraction {input:?}: {reason}")]
    Format { input: String, reason: &'static str },

    /// A denominator of zero was supplied or produced
    #[error("denominator must not be zero")]
    ZeroDenominator,
}

impl FractionError {
    pub(crate) fn format(input: &str, reason: &'static str) -> Self {
        FractionError::Format {
            input: input.to_string(),
            reason,
        }
    }
}

/// Result type alias for fraction operations
pub type FractionResult<T> = Result<T, FractionError>;
