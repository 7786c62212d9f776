//! Per-request context
//!
//! Everything the controller needs to know about the incoming request is
//! captured once in a [`RequestContext`] and passed around explicitly.

pub mod params;

use calculator_core::values::SelectedValues;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Uri};
use thiserror::Error;

pub use params::{extract_selected_values, parse_form};

/// Errors raised while building a [`RequestContext`]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RequestError {
	#[error("Invalid request URI: {0}")]
	InvalidUri(#[from] http::uri::InvalidUri),
	#[error("Invalid header: {0}")]
	InvalidHeader(String),
}

/// Method, URI, headers and parsed form data of one request
#[derive(Debug, Clone)]
pub struct RequestContext {
	method: Method,
	request_uri: String,
	uri: Uri,
	headers: HeaderMap,
	query: SelectedValues,
	post: SelectedValues,
}

impl RequestContext {
	/// Start building a request context
	///
	/// # Examples
	///
	/// ```
	/// use calculator_http::RequestContext;
	/// use http::Method;
	///
	/// let request = RequestContext::builder()
	/// 	.method(Method::POST)
	/// 	.uri("/?color=red")
	/// 	.form_body("delete_history=1")
	/// 	.build()
	/// 	.unwrap();
	///
	/// assert_eq!(request.request_uri(), "/?color=red");
	/// assert!(request.query().contains("color"));
	/// assert!(request.post().is_truthy("delete_history"));
	/// ```
	pub fn builder() -> RequestContextBuilder {
		RequestContextBuilder::default()
	}

	/// Build a context from an `http::Request` whose body is already read
	///
	/// The body is only parsed as form data when the request declares an
	/// `application/x-www-form-urlencoded` content type.
	pub fn from_http_request<B>(request: &http::Request<B>, body: Option<&str>) -> Self {
		let is_form = request
			.headers()
			.get(http::header::CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));
		let post = match body {
			Some(body) if is_form => parse_form(body),
			_ => SelectedValues::new(),
		};
		let uri = request.uri().clone();
		Self {
			method: request.method().clone(),
			request_uri: uri.to_string(),
			query: uri.query().map(parse_form).unwrap_or_default(),
			uri,
			headers: request.headers().clone(),
			post,
		}
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	/// The request URI exactly as received
	pub fn request_uri(&self) -> &str {
		&self.request_uri
	}

	pub fn uri(&self) -> &Uri {
		&self.uri
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Parsed query parameters
	pub fn query(&self) -> &SelectedValues {
		&self.query
	}

	/// Parsed posted form fields
	pub fn post(&self) -> &SelectedValues {
		&self.post
	}

	/// Query parameters with posted fields applied on top
	pub fn selected_values(&self) -> SelectedValues {
		extract_selected_values(&self.query, Some(&self.post))
	}

	/// `scheme://host` when the request URI is absolute
	///
	/// Origin-form URIs (`/path?query`), which is what servers normally
	/// receive, yield `None`. The port is not part of the result.
	///
	/// # Examples
	///
	/// ```
	/// use calculator_http::RequestContext;
	///
	/// let absolute = RequestContext::builder().uri("https://example.com:8443/?a=1").build().unwrap();
	/// assert_eq!(absolute.scheme_and_host().as_deref(), Some("https://example.com"));
	///
	/// let origin = RequestContext::builder().uri("/?a=1").build().unwrap();
	/// assert_eq!(origin.scheme_and_host(), None);
	/// ```
	pub fn scheme_and_host(&self) -> Option<String> {
		let scheme = self.uri.scheme_str().filter(|scheme| !scheme.is_empty())?;
		let host = self.uri.host().filter(|host| !host.is_empty())?;
		Some(format!("{}://{}", scheme, host))
	}
}

/// Builder for [`RequestContext`]
#[derive(Debug, Default)]
pub struct RequestContextBuilder {
	method: Option<Method>,
	uri: Option<String>,
	headers: Vec<(String, String)>,
	body: Option<String>,
}

impl RequestContextBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	/// Urlencoded request body, parsed into [`RequestContext::post`]
	pub fn form_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());
		self
	}

	/// Finish the context
	///
	/// Defaults to `GET /` when no method or URI was given.
	pub fn build(self) -> Result<RequestContext, RequestError> {
		let request_uri = self.uri.unwrap_or_else(|| "/".to_string());
		let uri: Uri = request_uri.parse()?;

		let mut headers = HeaderMap::new();
		for (name, value) in self.headers {
			let header_name = HeaderName::from_bytes(name.as_bytes())
				.map_err(|e| RequestError::InvalidHeader(format!("{}: {}", name, e)))?;
			let header_value = HeaderValue::from_str(&value)
				.map_err(|e| RequestError::InvalidHeader(format!("{}: {}", name, e)))?;
			headers.append(header_name, header_value);
		}

		Ok(RequestContext {
			method: self.method.unwrap_or(Method::GET),
			query: uri.query().map(parse_form).unwrap_or_default(),
			post: self.body.as_deref().map(parse_form).unwrap_or_default(),
			request_uri,
			uri,
			headers,
		})
	}
}
