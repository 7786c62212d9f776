//! Integration test utilities for the calculator skeleton
//!
//! [`Browser`] plays the client side of several requests in a row: it keeps
//! the cookies every response sets and sends them back with the next
//! request.

use calculator_http::cookies::CookieJar;
use calculator_http::request::RequestContext;
use http::Method;
use indexmap::IndexMap;
use rstest::fixture;

pub const SOURCE_CODE_URL: &str = "https://github.com/drdplusinfo/calculator-skeleton";

/// `GET` request for `uri`
pub fn get(uri: &str) -> RequestContext {
	RequestContext::builder()
		.uri(uri)
		.build()
		.expect("Failed to build GET request")
}

/// `POST` request for `uri` with an urlencoded `body`
pub fn post(uri: &str, body: &str) -> RequestContext {
	RequestContext::builder()
		.method(Method::POST)
		.uri(uri)
		.header("content-type", "application/x-www-form-urlencoded")
		.form_body(body)
		.build()
		.expect("Failed to build POST request")
}

/// Cookies a browser would hold between requests
#[derive(Debug, Default, Clone)]
pub struct Browser {
	cookies: IndexMap<String, String>,
}

impl Browser {
	pub fn new() -> Self {
		Self::default()
	}

	/// Apply every `Set-Cookie` header of a response
	pub fn receive(&mut self, jar: &CookieJar) {
		for header in jar.set_cookie_headers() {
			self.receive_header(&header);
		}
	}

	/// Apply one `Set-Cookie` header value
	pub fn receive_header(&mut self, header: &str) {
		let mut attributes = header.split("; ");
		let Some((name, value)) = attributes.next().and_then(|pair| pair.split_once('=')) else {
			return;
		};
		if attributes.any(|attribute| attribute == "Max-Age=0") {
			self.cookies.shift_remove(name);
		} else {
			self.cookies.insert(name.to_string(), value.to_string());
		}
	}

	/// `Cookie` request header value
	pub fn cookie_header(&self) -> String {
		self.cookies
			.iter()
			.map(|(name, value)| format!("{}={}", name, value))
			.collect::<Vec<_>>()
			.join("; ")
	}

	/// Jar the server sees for the next request
	pub fn jar(&self) -> CookieJar {
		CookieJar::from_header(&self.cookie_header())
	}

	pub fn has_cookie(&self, name: &str) -> bool {
		self.cookies.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.cookies.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cookies.is_empty()
	}
}

/// A browser without any cookies
#[fixture]
pub fn browser() -> Browser {
	Browser::new()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_browser_keeps_and_expires_cookies(mut browser: Browser) {
		browser.receive_header("memory=%7B%7D; Path=/; HttpOnly");
		browser.receive_header("history=%5B%5D; Path=/");
		browser.receive_header("memory=; Path=/; Max-Age=0");

		assert!(!browser.has_cookie("memory"));
		assert_eq!(browser.cookie_header(), "history=%5B%5D");
	}
}
