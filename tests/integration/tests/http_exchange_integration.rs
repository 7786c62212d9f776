//! Controller driven by `http` requests and answered with `http` responses

use calculator::prelude::*;
use calculator_integration_tests::SOURCE_CODE_URL;
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Method, Response};
use rstest::rstest;

fn respond(controller: CalculatorController<CookieJar>) -> Response<String> {
	let body = controller.current_values_as_hidden_inputs(&["remember_current"]);
	let mut response = Response::new(body);
	controller
		.into_cookies()
		.write_headers(response.headers_mut())
		.unwrap();
	response
}

#[rstest]
fn test_remember_then_read_back_through_headers() {
	// Arrange
	let first = http::Request::builder()
		.method(Method::GET)
		.uri("/?strength=3&remember_current=1")
		.body(())
		.unwrap();
	let context = RequestContext::from_http_request(&first, None);
	let controller = CalculatorController::builder(
		SOURCE_CODE_URL,
		context,
		CookieJar::from_headers(first.headers()),
	)
	.build()
	.unwrap();

	// Act
	let response = respond(controller);
	let cookie_header = response
		.headers()
		.get_all(SET_COOKIE)
		.iter()
		.map(|value| value.to_str().unwrap().split(';').next().unwrap().to_string())
		.collect::<Vec<_>>()
		.join("; ");
	let second = http::Request::builder()
		.uri("/")
		.header(COOKIE, cookie_header)
		.body(())
		.unwrap();
	let controller = CalculatorController::builder(
		SOURCE_CODE_URL,
		RequestContext::from_http_request(&second, None),
		CookieJar::from_headers(second.headers()),
	)
	.build()
	.unwrap();

	// Assert
	assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
	assert_eq!(
		response.body(),
		"<input type=\"hidden\" name=\"strength\" value=\"3\">"
	);
	assert_eq!(
		controller
			.current_values()
			.current_value("strength")
			.and_then(Value::as_scalar),
		Some("3")
	);
	assert!(!controller.cookies().has_changes());
}

#[rstest]
fn test_posted_form_deletes_cookies() {
	let request = http::Request::builder()
		.method(Method::POST)
		.uri("/")
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.header(COOKIE, "memory=%7B%22a%22%3A%221%22%7D; history=%5B%5D")
		.body(())
		.unwrap();
	let controller = CalculatorController::builder(
		SOURCE_CODE_URL,
		RequestContext::from_http_request(&request, Some("delete_history=on")),
		CookieJar::from_headers(request.headers()),
	)
	.build()
	.unwrap();

	let response = respond(controller);

	let headers: Vec<&str> = response
		.headers()
		.get_all(SET_COOKIE)
		.iter()
		.map(|value| value.to_str().unwrap())
		.collect();
	assert_eq!(
		headers,
		vec![
			"memory=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
			"history=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
		]
	);
	assert_eq!(response.body(), "");
}

#[rstest]
fn test_absolute_request_uri_keeps_host_in_links() {
	let request = http::Request::builder()
		.uri("https://calc.example.com/fight?a=1&b=2")
		.body(())
		.unwrap();
	let controller = CalculatorController::builder(
		SOURCE_CODE_URL,
		RequestContext::from_http_request(&request, None),
		CookieJar::new(),
	)
	.build()
	.unwrap();

	let url = controller.request_url_except(&["b"]);

	assert_eq!(url, "https://calc.example.com/?a=1");
}
