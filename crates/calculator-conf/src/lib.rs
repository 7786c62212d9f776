//! Settings for the calculator skeleton
//!
//! Settings are layered: defaults, then a TOML file, then environment
//! variables carrying a prefix (`CALCULATOR_` by default).
//!
//! ```toml
//! google_analytics_id = "UA-000000-1"
//! source_code_url = "https://github.com/drdplusinfo/calculator-skeleton"
//! cookies_postfix = "-fight"
//! cookies_ttl = 31536000
//! history_limit = 50
//! ```
//!
//! ```
//! use calculator_conf::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//! cookies_postfix = "-fight"
//! cookies_ttl = 3600
//! "#).unwrap();
//!
//! assert_eq!(settings.cookies_postfix, "-fight");
//! assert_eq!(settings.cookies_ttl, Some(3600));
//! assert_eq!(settings.history_limit, 100);
//! ```

use calculator_core::validators::UrlValidator;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default prefix of environment variable overrides
pub const ENV_PREFIX: &str = "CALCULATOR_";

/// Error type for loading and validating settings
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for '{key}': '{value}'")]
	InvalidValue { key: String, value: String },

	#[error("Validation error: {0}")]
	Validation(String),
}

/// Calculator settings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Analytics property the frontend reports to
	pub google_analytics_id: String,
	/// Public link to the calculator sources
	pub source_code_url: String,
	/// Appended to the memory and history cookie names
	pub cookies_postfix: String,
	/// Cookie lifetime in seconds; browser-session cookies when unset
	pub cookies_ttl: Option<u64>,
	/// Maximum number of remembered snapshots kept in history
	pub history_limit: usize,
	/// Largest encoded history cookie, name included, in bytes
	pub history_max_cookie_size: usize,
	/// Directory the frontend serves files from
	pub document_root: PathBuf,
	/// Base URL of static assets
	pub assets_url: String,
	pub cookie_path: String,
	pub cookie_secure: bool,
	pub cookie_http_only: bool,
	pub cookie_same_site: Option<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			google_analytics_id: String::new(),
			source_code_url: "https://github.com/drdplusinfo/calculator-skeleton".to_string(),
			cookies_postfix: String::new(),
			cookies_ttl: None,
			history_limit: 100,
			history_max_cookie_size: 4096,
			document_root: PathBuf::from("."),
			assets_url: "/assets".to_string(),
			cookie_path: "/".to_string(),
			cookie_secure: false,
			cookie_http_only: true,
			cookie_same_site: Some("Lax".to_string()),
		}
	}
}

impl Settings {
	/// Parse settings from TOML text; missing keys keep their defaults
	pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(text)?)
	}

	/// Read settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		tracing::debug!(path = %path.display(), "Loading calculator settings");
		let text = fs::read_to_string(path)?;
		Self::from_toml_str(&text)
	}

	/// Defaults overridden by the process environment
	pub fn from_env() -> Result<Self, SettingsError> {
		let mut settings = Self::default();
		settings.apply_env(ENV_PREFIX)?;
		Ok(settings)
	}

	/// Override fields from the process environment
	pub fn apply_env(&mut self, prefix: &str) -> Result<(), SettingsError> {
		self.apply_env_vars(prefix, std::env::vars())
	}

	/// Override fields from `(name, value)` pairs carrying `prefix`
	///
	/// Names are matched case-insensitively after the prefix is stripped;
	/// unknown names are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use calculator_conf::Settings;
	///
	/// let mut settings = Settings::default();
	/// settings
	/// 	.apply_env_vars("CALCULATOR_", [
	/// 		("CALCULATOR_COOKIES_TTL".to_string(), "60".to_string()),
	/// 		("CALCULATOR_COOKIE_SECURE".to_string(), "yes".to_string()),
	/// 		("HOME".to_string(), "/root".to_string()),
	/// 	])
	/// 	.unwrap();
	///
	/// assert_eq!(settings.cookies_ttl, Some(60));
	/// assert!(settings.cookie_secure);
	/// ```
	pub fn apply_env_vars<I>(&mut self, prefix: &str, vars: I) -> Result<(), SettingsError>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		for (name, value) in vars {
			let Some(key) = name.strip_prefix(prefix) else {
				continue;
			};
			let key = key.to_lowercase();
			match key.as_str() {
				"google_analytics_id" => self.google_analytics_id = value,
				"source_code_url" => self.source_code_url = value,
				"cookies_postfix" => self.cookies_postfix = value,
				"cookies_ttl" => self.cookies_ttl = parse_optional(&key, &value)?,
				"history_limit" => self.history_limit = parse_number(&key, &value)?,
				"history_max_cookie_size" => {
					self.history_max_cookie_size = parse_number(&key, &value)?
				}
				"document_root" => self.document_root = PathBuf::from(value),
				"assets_url" => self.assets_url = value,
				"cookie_path" => self.cookie_path = value,
				"cookie_secure" => self.cookie_secure = parse_bool(&key, &value)?,
				"cookie_http_only" => self.cookie_http_only = parse_bool(&key, &value)?,
				"cookie_same_site" => {
					self.cookie_same_site = (!value.trim().is_empty()).then_some(value)
				}
				_ => {
					tracing::debug!(variable = %name, "Ignoring unknown calculator setting");
				}
			}
		}
		Ok(())
	}

	/// Check values that would otherwise fail later, at request time
	///
	/// # Examples
	///
	/// ```
	/// use calculator_conf::Settings;
	///
	/// let mut settings = Settings::default();
	/// assert!(settings.validate().is_ok());
	///
	/// settings.source_code_url = "not-a-url".to_string();
	/// assert!(settings.validate().is_err());
	/// ```
	pub fn validate(&self) -> Result<(), SettingsError> {
		UrlValidator::new()
			.validate_source_code_url(&self.source_code_url)
			.map_err(|e| SettingsError::Validation(e.to_string()))?;
		if self.history_limit == 0 {
			return Err(SettingsError::Validation(
				"history_limit must be at least 1".to_string(),
			));
		}
		if self.history_max_cookie_size == 0 {
			return Err(SettingsError::Validation(
				"history_max_cookie_size must be at least 1".to_string(),
			));
		}
		if let Some(invalid) = self.cookies_postfix.chars().find(|c| !is_cookie_name_char(*c)) {
			return Err(SettingsError::Validation(format!(
				"cookies_postfix {:?} cannot contain {:?}",
				self.cookies_postfix, invalid
			)));
		}
		Ok(())
	}

	pub fn cookies_ttl(&self) -> Option<Duration> {
		self.cookies_ttl.map(Duration::from_secs)
	}
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(invalid(key, value)),
	}
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
	value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_optional(key: &str, value: &str) -> Result<Option<u64>, SettingsError> {
	match value.trim() {
		"" | "none" => Ok(None),
		_ => parse_number(key, value).map(Some),
	}
}

fn invalid(key: &str, value: &str) -> SettingsError {
	SettingsError::InvalidValue {
		key: key.to_string(),
		value: value.to_string(),
	}
}

/// Characters allowed in a cookie name token (RFC 6265, section 4.1.1)
fn is_cookie_name_char(c: char) -> bool {
	c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
}
