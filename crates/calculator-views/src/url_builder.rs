//! Links back to the calculator carrying form values in the query string
//!
//! Values are flattened the way form parsers read them back: every scalar
//! becomes one `name=value` pair and each array level adds a `[]` suffix to
//! the name, so `tags: ["x", "y"]` is written as `tags[]=x&tags[]=y`. Array
//! keys are not written; parsers re-index the entries in order.

use calculator_core::values::SelectedValues;
use calculator_http::request::RequestContext;
use url::form_urlencoded::byte_serialize;

/// Builds URLs relative to the current request
///
/// # Examples
///
/// ```
/// use calculator_core::values::SelectedValues;
/// use calculator_http::RequestContext;
/// use calculator_views::url_builder::UrlBuilder;
///
/// let request = RequestContext::builder().uri("/?color=red&size=2").build().unwrap();
/// let urls = UrlBuilder::new(&request);
///
/// let extra: SelectedValues = [("color", "dark blue")].into_iter().collect();
/// assert_eq!(urls.request_url(&extra), "/?color=dark+blue&size=2");
/// assert_eq!(urls.request_url(&SelectedValues::new()), "/?color=red&size=2");
/// assert_eq!(urls.request_url_except(&["color"]), "/?size=2");
/// assert_eq!(urls.request_url_except(&["color", "size"]), "");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UrlBuilder<'a> {
	request: &'a RequestContext,
}

impl<'a> UrlBuilder<'a> {
	pub fn new(request: &'a RequestContext) -> Self {
		Self { request }
	}

	/// URL of the current request with `extra` applied over its query
	///
	/// Without extra parameters the request URI is returned exactly as
	/// received. Otherwise query parameters keep their position, overridden
	/// ones take the new value and new ones are appended.
	pub fn request_url(&self, extra: &SelectedValues) -> String {
		if extra.is_empty() {
			return self.request.request_uri().to_string();
		}
		self.build_url(&self.request.query().merged_with(extra))
	}

	/// URL of the current request without the named query parameters
	pub fn request_url_except<S: AsRef<str>>(&self, names: &[S]) -> String {
		self.build_url(&self.request.query().without(names))
	}

	/// Serialize `values` into `[scheme://host]/?query`
	///
	/// The scheme and host are only written when the request URI carries
	/// both. Nothing is written for the query when there are no pairs, so an
	/// empty mapping on an origin-form request yields an empty string.
	pub fn build_url(&self, values: &SelectedValues) -> String {
		let query = to_query_string(values);
		let mut url = self.request.scheme_and_host().unwrap_or_default();
		if !query.is_empty() {
			url.push_str("/?");
			url.push_str(&query);
		}
		tracing::trace!(url = %url, pairs = values.len(), "Built calculator URL");
		url
	}
}

/// `name=value` pairs of every scalar in `values`, joined with `&`
///
/// # Examples
///
/// ```
/// use calculator_core::values::{SelectedValues, Value};
/// use calculator_views::url_builder::to_query_string;
///
/// let mut values = SelectedValues::new();
/// values.insert("a b", "1&2");
/// values.insert("tags", Value::list(["x", "y"]));
///
/// assert_eq!(to_query_string(&values), "a+b=1%262&tags%5B%5D=x&tags%5B%5D=y");
/// ```
pub fn to_query_string(values: &SelectedValues) -> String {
	values
		.flatten()
		.iter()
		.map(|leaf| {
			format!(
				"{}={}",
				byte_serialize(leaf.bracketed_name().as_bytes()).collect::<String>(),
				byte_serialize(leaf.value().as_bytes()).collect::<String>()
			)
		})
		.collect::<Vec<_>>()
		.join("&")
}

#[cfg(test)]
mod tests {
	use super::*;
	use calculator_core::values::Value;
	use calculator_http::request::parse_form;
	use proptest::prelude::*;
	use rstest::rstest;

	fn request(uri: &str) -> RequestContext {
		RequestContext::builder().uri(uri).build().unwrap()
	}

	#[rstest]
	#[case("/?a=1", "/?a=1&b=2")]
	#[case("http://example.com/calc/?a=1", "http://example.com/?a=1&b=2")]
	#[case("https://example.com:8443/?a=1", "https://example.com/?a=1&b=2")]
	fn test_host_prefix_follows_request_uri(#[case] uri: &str, #[case] expected: &str) {
		let request = request(uri);
		let extra: SelectedValues = [("b", "2")].into_iter().collect();

		let url = UrlBuilder::new(&request).request_url(&extra);

		assert_eq!(url, expected);
	}

	#[rstest]
	fn test_empty_values_on_absolute_request_yield_host_only() {
		let request = request("https://example.com/?a=1");

		let url = UrlBuilder::new(&request).request_url_except(&["a"]);

		assert_eq!(url, "https://example.com");
	}

	#[rstest]
	fn test_request_url_without_extra_is_verbatim() {
		let request = request("/some/path?b=%20x&a%5B%5D=1");

		let url = UrlBuilder::new(&request).request_url(&SelectedValues::new());

		assert_eq!(url, "/some/path?b=%20x&a%5B%5D=1");
	}

	#[rstest]
	fn test_extra_overrides_and_appends() {
		// Arrange
		let request = request("/?a=1&b=2&c=3");
		let mut extra = SelectedValues::new();
		extra.insert("d", "4");
		extra.insert("b", Value::list(["x", "y"]));

		// Act
		let url = UrlBuilder::new(&request).request_url(&extra);

		// Assert
		assert_eq!(url, "/?a=1&b%5B%5D=x&b%5B%5D=y&c=3&d=4");
	}

	#[rstest]
	fn test_nested_arrays_repeat_brackets() {
		let request = request("/");
		let mut values = SelectedValues::new();
		values.insert(
			"m",
			Value::array([("k", Value::list(["1", "2"])), ("l", Value::scalar("3"))]),
		);

		let url = UrlBuilder::new(&request).build_url(&values);

		assert_eq!(url, "/?m%5B%5D%5B%5D=1&m%5B%5D%5B%5D=2&m%5B%5D=3");
	}

	#[rstest]
	fn test_empty_arrays_are_skipped() {
		let request = request("/");
		let mut values = SelectedValues::new();
		values.insert("empty", Value::list(Vec::<&str>::new()));
		values.insert("a", "1");

		let url = UrlBuilder::new(&request).build_url(&values);

		assert_eq!(url, "/?a=1");
	}

	#[rstest]
	fn test_except_with_nothing_equals_plain_serialization() {
		let request = request("/?a=1&tags%5B%5D=x&tags%5B%5D=y");
		let urls = UrlBuilder::new(&request);

		assert_eq!(
			urls.request_url_except::<&str>(&[]),
			urls.build_url(request.query())
		);
	}

	fn flat_values() -> impl Strategy<Value = SelectedValues> {
		prop::collection::vec(("[a-z][a-z0-9_]{0,7}", "[ -~]{0,12}"), 1..8).prop_map(|pairs| {
			pairs
				.into_iter()
				.map(|(name, value)| (name, Value::Scalar(value)))
				.collect()
		})
	}

	proptest! {
		#[test]
		fn prop_flat_values_survive_reparsing(values in flat_values()) {
			let request = request("/");

			let url = UrlBuilder::new(&request).build_url(&values);

			let query = url.strip_prefix("/?").unwrap();
			prop_assert_eq!(parse_form(query), values);
		}

		#[test]
		fn prop_excluded_names_never_appear(values in flat_values(), skip in 0usize..8) {
			let query = to_query_string(&values);
			let request = request(&format!("/?{}", query));
			let names: Vec<&str> = values.names().step_by(skip.max(1)).collect();

			let url = UrlBuilder::new(&request).request_url_except(&names);

			let reparsed = parse_form(url.strip_prefix("/?").unwrap_or(""));
			for name in &names {
				prop_assert!(!reparsed.contains(name));
			}
		}
	}
}
