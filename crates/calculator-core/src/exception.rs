//! Error types shared by the calculator crates

use thiserror::Error;

/// Errors raised while assembling a calculator controller
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculatorError {
	/// The configured link to the calculator sources is not an absolute URL.
	#[error("Given source code URL is not a valid one: '{url}'")]
	SourceCodeUrlIsNotValid { url: String },
}

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, CalculatorError>;
