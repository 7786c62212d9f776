//! URL validation

use crate::exception::{CalculatorError, Result};
use regex::Regex;
use std::sync::LazyLock;

// Absolute URL pattern.
//
// Requires:
// - an RFC 3986 scheme followed by `://`
// - optional `user[:password]@` credentials
// - a host made of domain labels, an IPv4 address or a bracketed IPv6 literal
// - optional port, path, query string and fragment without whitespace
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"^[a-zA-Z][a-zA-Z0-9+.\-]*://([^\s@/]+@)?([a-zA-Z0-9_]([a-zA-Z0-9_\-]{0,61}[a-zA-Z0-9_])?(\.[a-zA-Z0-9_]([a-zA-Z0-9_\-]*[a-zA-Z0-9_])?)*|\[[0-9a-fA-F:.]+\])(:[0-9]{1,5})?(/[^\s?#]*)?(\?[^\s#]*)?(#[^\s]*)?$",
	)
	.expect("URL_REGEX: invalid regex pattern")
});

/// Validates that a string is an absolute URL with a scheme and a host.
///
/// # Examples
///
/// ```
/// use calculator_core::validators::UrlValidator;
///
/// let validator = UrlValidator::new();
/// assert!(validator.is_valid("https://example.com/repo"));
/// assert!(validator.is_valid("http://localhost:8080/path?q=1#top"));
/// assert!(validator.is_valid("ftp://files.example.com"));
/// assert!(!validator.is_valid("not-a-url"));
/// assert!(!validator.is_valid("/relative/path"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlValidator;

impl UrlValidator {
	pub fn new() -> Self {
		Self
	}

	pub fn is_valid(&self, value: &str) -> bool {
		URL_REGEX.is_match(value)
	}

	/// Validate a link to the calculator sources
	///
	/// # Examples
	///
	/// ```
	/// use calculator_core::{CalculatorError, validators::UrlValidator};
	///
	/// let validator = UrlValidator::new();
	/// assert!(validator.validate_source_code_url("https://example.com/repo").is_ok());
	/// assert_eq!(
	/// 	validator.validate_source_code_url("not-a-url"),
	/// 	Err(CalculatorError::SourceCodeUrlIsNotValid { url: "not-a-url".to_string() })
	/// );
	/// ```
	pub fn validate_source_code_url(&self, value: &str) -> Result<()> {
		if self.is_valid(value) {
			Ok(())
		} else {
			Err(CalculatorError::SourceCodeUrlIsNotValid {
				url: value.to_string(),
			})
		}
	}
}
