//! Cookie storage
//!
//! [`CookieStore`] is the small get/set/delete contract the calculator state
//! is persisted through. [`CookieJar`] implements it on top of the request's
//! `Cookie` header and records every change so it can be sent back as
//! `Set-Cookie` headers.

use http::header::{COOKIE, HeaderValue, SET_COOKIE};
use http::HeaderMap;
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::time::Duration;
use thiserror::Error;

// RFC 6265 forbids whitespace, DQUOTE, comma, semicolon and backslash in
// cookie values; `%` is added so decoding is unambiguous.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b',')
	.add(b';')
	.add(b'\\')
	.add(b'%');

/// Errors raised while rendering cookies into headers
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CookieError {
	#[error("Cookie '{name}' cannot be sent as a header: {reason}")]
	InvalidHeaderValue { name: String, reason: String },
}

/// Named, TTL-bounded string storage backed by cookies
pub trait CookieStore {
	/// Current value of a cookie, reflecting changes made during this request
	fn get(&self, name: &str) -> Option<&str>;

	/// Store a value; `None` TTL means a browser-session cookie
	fn set(&mut self, name: &str, value: String, ttl: Option<Duration>);

	fn delete(&mut self, name: &str);

	/// Bytes `value` takes once written into a `Set-Cookie` header
	fn encoded_len(&self, value: &str) -> usize {
		value.len()
	}
}

/// Attributes applied to every cookie a [`CookieJar`] sends
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
	pub path: String,
	pub domain: Option<String>,
	pub secure: bool,
	pub http_only: bool,
	pub same_site: Option<String>,
}

impl CookieOptions {
	/// Defaults: `Path=/`, `HttpOnly`, `SameSite=Lax`, not `Secure`
	///
	/// # Examples
	///
	/// ```
	/// use calculator_http::cookies::CookieOptions;
	///
	/// let options = CookieOptions::new().with_secure(true).with_path("/calc");
	/// assert!(options.secure);
	/// assert_eq!(options.path, "/calc");
	/// ```
	pub fn new() -> Self {
		Self {
			path: "/".to_string(),
			domain: None,
			secure: false,
			http_only: true,
			same_site: Some("Lax".to_string()),
		}
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = Some(domain.into());
		self
	}

	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	pub fn with_http_only(mut self, http_only: bool) -> Self {
		self.http_only = http_only;
		self
	}

	pub fn with_same_site(mut self, same_site: Option<String>) -> Self {
		self.same_site = same_site;
		self
	}
}

impl Default for CookieOptions {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingCookie {
	Set { value: String, ttl: Option<Duration> },
	Delete,
}

/// Cookies received with a request plus the changes made while handling it
///
/// # Examples
///
/// ```
/// use calculator_http::cookies::{CookieJar, CookieStore};
/// use std::time::Duration;
///
/// let mut jar = CookieJar::from_header("memory=%7B%7D; theme=dark");
/// assert_eq!(jar.get("memory"), Some("{}"));
///
/// jar.set("memory", r#"{"a":"1"}"#.to_string(), Some(Duration::from_secs(60)));
/// jar.delete("theme");
///
/// assert_eq!(jar.get("memory"), Some(r#"{"a":"1"}"#));
/// assert_eq!(jar.get("theme"), None);
/// assert_eq!(jar.set_cookie_headers().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
	incoming: IndexMap<String, String>,
	pending: IndexMap<String, PendingCookie>,
	options: CookieOptions,
}

impl CookieJar {
	/// Empty jar, as for a first-time visitor
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a `Cookie` request header value (`a=1; b=2`)
	///
	/// Values are percent-decoded; malformed pairs are skipped. When a name
	/// occurs twice the first occurrence wins, as browsers send the most
	/// specific cookie first.
	pub fn from_header(header: &str) -> Self {
		let mut jar = Self::new();
		jar.add_header(header);
		jar
	}

	/// Collect every `Cookie` header of a request
	pub fn from_headers(headers: &HeaderMap) -> Self {
		let mut jar = Self::new();
		for value in headers.get_all(COOKIE) {
			match value.to_str() {
				Ok(header) => jar.add_header(header),
				Err(_) => tracing::debug!("Skipping non-ASCII Cookie header"),
			}
		}
		jar
	}

	pub fn with_options(mut self, options: CookieOptions) -> Self {
		self.options = options;
		self
	}

	pub fn options(&self) -> &CookieOptions {
		&self.options
	}

	/// Whether any cookie was set or deleted during this request
	pub fn has_changes(&self) -> bool {
		!self.pending.is_empty()
	}

	/// `Set-Cookie` header values for every change, in the order made
	///
	/// # Examples
	///
	/// ```
	/// use calculator_http::cookies::{CookieJar, CookieOptions, CookieStore};
	/// use std::time::Duration;
	///
	/// let mut jar = CookieJar::new().with_options(CookieOptions::new().with_secure(true));
	/// jar.set("memory", "a b".to_string(), Some(Duration::from_secs(3600)));
	///
	/// assert_eq!(
	/// 	jar.set_cookie_headers(),
	/// 	vec!["memory=a%20b; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=3600"]
	/// );
	/// ```
	pub fn set_cookie_headers(&self) -> Vec<String> {
		self.pending
			.iter()
			.map(|(name, change)| match change {
				PendingCookie::Set { value, ttl } => self.render(name, value, *ttl),
				PendingCookie::Delete => self.render(name, "", Some(Duration::ZERO)),
			})
			.collect()
	}

	/// Append one `Set-Cookie` header per change to `headers`
	pub fn write_headers(&self, headers: &mut HeaderMap) -> Result<(), CookieError> {
		for (name, header) in self.pending.keys().zip(self.set_cookie_headers()) {
			let value =
				HeaderValue::from_str(&header).map_err(|e| CookieError::InvalidHeaderValue {
					name: name.clone(),
					reason: e.to_string(),
				})?;
			headers.append(SET_COOKIE, value);
		}
		Ok(())
	}

	fn add_header(&mut self, header: &str) {
		for pair in header.split(';') {
			let Some((name, value)) = pair.trim().split_once('=') else {
				continue;
			};
			let name = name.trim();
			if name.is_empty() || self.incoming.contains_key(name) {
				continue;
			}
			let value = value.trim().trim_matches('"');
			let decoded = percent_decode_str(value).decode_utf8_lossy().into_owned();
			self.incoming.insert(name.to_string(), decoded);
		}
	}

	fn render(&self, name: &str, value: &str, max_age: Option<Duration>) -> String {
		let mut parts = vec![format!(
			"{}={}",
			name,
			utf8_percent_encode(value, COOKIE_VALUE)
		)];

		parts.push(format!("Path={}", self.options.path));

		if let Some(domain) = &self.options.domain {
			parts.push(format!("Domain={}", domain));
		}

		if self.options.http_only {
			parts.push("HttpOnly".to_string());
		}

		if self.options.secure {
			parts.push("Secure".to_string());
		}

		if let Some(same_site) = &self.options.same_site {
			parts.push(format!("SameSite={}", same_site));
		}

		if let Some(max_age) = max_age {
			parts.push(format!("Max-Age={}", max_age.as_secs()));
		}

		parts.join("; ")
	}
}

impl CookieStore for CookieJar {
	fn get(&self, name: &str) -> Option<&str> {
		match self.pending.get(name) {
			Some(PendingCookie::Set { value, .. }) => Some(value.as_str()),
			Some(PendingCookie::Delete) => None,
			None => self.incoming.get(name).map(String::as_str),
		}
	}

	fn set(&mut self, name: &str, value: String, ttl: Option<Duration>) {
		self.pending
			.insert(name.to_string(), PendingCookie::Set { value, ttl });
	}

	fn delete(&mut self, name: &str) {
		self.pending.insert(name.to_string(), PendingCookie::Delete);
	}

	fn encoded_len(&self, value: &str) -> usize {
		utf8_percent_encode(value, COOKIE_VALUE).map(str::len).sum()
	}
}
