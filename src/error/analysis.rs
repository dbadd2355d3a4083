// Analysis error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Analysis error code constants
///
/// Single source of truth for the numeric codes reported alongside
/// analysis errors, so callers outside Rust can match on them.
///
/// Error code range: 3001-3003
pub struct AnalysisErrorCodes {}

impl AnalysisErrorCodes {
    /// Input series was empty or contained no usable points
    pub const INVALID_INPUT: i32 = 3001;

    /// A feature had no finite value for the current data
    pub const NUMERICAL_DEGENERACY: i32 = 3002;

    /// Analyzer configuration failed validation
    pub const INVALID_CONFIG: i32 = 3003;
}

/// Log an analysis error with structured context
///
/// Fields logged:
/// - error_code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: Additional contextual information
pub fn log_analysis_error(err: &AnalysisError, context: &str) {
    error!(
        "Analysis error in {}: code={}, component=StabilityAnalysis, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by CoP stability analysis
///
/// Degenerate-but-defined situations (zero total load, a window too short
/// for path length) are not errors; they produce plain values.
///
/// Error code range: 3001-3003
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input series was empty or had no finite points
    InvalidInput { reason: String },

    /// Feature value undefined for this data (e.g. log of a non-positive number)
    NumericalDegeneracy { feature: String, reason: String },

    /// Configuration value out of range
    InvalidConfig { field: String, reason: String },
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::InvalidInput { .. } => AnalysisErrorCodes::INVALID_INPUT,
            AnalysisError::NumericalDegeneracy { .. } => AnalysisErrorCodes::NUMERICAL_DEGENERACY,
            AnalysisError::InvalidConfig { .. } => AnalysisErrorCodes::INVALID_CONFIG,
        }
    }

    fn message(&self) -> String {
        match self {
            AnalysisError::InvalidInput { reason } => format!("Invalid input: {}", reason),
            AnalysisError::NumericalDegeneracy { feature, reason } => {
                format!("Numerical degeneracy in '{}': {}", feature, reason)
            }
            AnalysisError::InvalidConfig { field, reason } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AnalysisError {}
