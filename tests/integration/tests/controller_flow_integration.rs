//! Several requests in a row against one calculator

use calculator::prelude::*;
use calculator_integration_tests::{Browser, SOURCE_CODE_URL, browser, get, post};
use rstest::rstest;

fn visit(browser: &mut Browser, request: RequestContext) -> CalculatorController<CookieJar> {
	let controller = CalculatorController::builder(SOURCE_CODE_URL, request, browser.jar())
		.cookies_postfix("-fight")
		.build()
		.unwrap();
	browser.receive(controller.cookies());
	controller
}

fn scalar<'a>(values: &'a SelectedValues, name: &str) -> Option<&'a str> {
	values.get(name).and_then(Value::as_scalar)
}

#[rstest]
fn test_remembered_values_come_back_on_next_visit(mut browser: Browser) {
	// Arrange
	visit(&mut browser, get("/?color=red&remember_current=1"));

	// Act
	let controller = visit(&mut browser, get("/?size=2"));

	// Assert
	let current = controller.current_values().values();
	assert_eq!(scalar(current, "color"), Some("red"));
	assert_eq!(scalar(current, "size"), Some("2"));
	assert_eq!(controller.current_values().selected_value("color"), None);
	assert_eq!(scalar(controller.selected_values(), "color"), Some("red"));
}

#[rstest]
fn test_request_values_override_memory(mut browser: Browser) {
	visit(&mut browser, get("/?color=red&remember_current=1"));

	let controller = visit(&mut browser, get("/?color=blue"));

	assert_eq!(scalar(controller.current_values().values(), "color"), Some("blue"));
	assert_eq!(scalar(controller.memory().values(), "color"), Some("red"));
}

#[rstest]
fn test_remember_replaces_memory_but_appends_history(mut browser: Browser) {
	// Arrange
	visit(&mut browser, get("/?color=red&size=1&remember_current=1"));

	// Act
	visit(&mut browser, get("/?color=blue&remember_current=1"));
	let controller = visit(&mut browser, get("/"));

	// Assert
	assert!(controller.memory().value("size").is_none());
	assert_eq!(controller.history().len(), 2);
	assert_eq!(
		controller.history().value("size").and_then(Value::as_scalar),
		Some("1")
	);
	assert_eq!(
		controller.history().value("color").and_then(Value::as_scalar),
		Some("blue")
	);
}

#[rstest]
#[case("/?remember_current=1&color=green")]
#[case("/?color=green")]
fn test_posted_delete_wipes_memory_and_history(mut browser: Browser, #[case] uri: &str) {
	// Arrange
	visit(&mut browser, get("/?color=red&remember_current=1"));
	assert_eq!(browser.len(), 2);

	// Act
	let controller = visit(&mut browser, post(uri, "delete_history=1"));

	// Assert
	assert!(controller.memory().is_empty());
	assert!(controller.history().is_empty());
	assert!(browser.is_empty());
	let after = visit(&mut browser, get("/"));
	assert!(after.current_values().is_empty());
}

#[rstest]
fn test_postfixes_keep_calculators_apart(mut browser: Browser) {
	visit(&mut browser, get("/?color=red&remember_current=1"));

	let other = CalculatorController::builder(SOURCE_CODE_URL, get("/"), browser.jar())
		.cookies_postfix("-magic")
		.build()
		.unwrap();

	assert!(other.memory().is_empty());
	assert!(other.history().is_empty());
}

#[rstest]
fn test_corrupted_cookies_are_treated_as_empty(mut browser: Browser) {
	browser.receive_header("memory-fight=%7Bnot-json; Path=/");
	browser.receive_header("history-fight=42; Path=/");

	let controller = visit(&mut browser, get("/?a=1"));

	assert!(controller.memory().is_empty());
	assert!(controller.history().is_empty());
	assert_eq!(controller.current_values().len(), 1);
}

#[rstest]
fn test_hidden_inputs_resubmit_remembered_arrays(mut browser: Browser) {
	// Arrange
	visit(
		&mut browser,
		get("/?color=red&tags%5B%5D=x&tags%5B%5D=y&remember_current=1"),
	);

	// Act
	let controller = visit(&mut browser, get("/"));
	let html = controller.current_values_as_hidden_inputs(&["color", "remember_current"]);

	// Assert
	assert_eq!(
		html,
		"<input type=\"hidden\" name=\"tags[]\" value=\"x\">\n<input type=\"hidden\" name=\"tags[]\" value=\"y\">"
	);
	assert!(!html.contains("name=\"color\""));
}

#[rstest]
fn test_links_carry_query_not_memory(mut browser: Browser) {
	visit(&mut browser, get("/?color=red&remember_current=1"));

	let controller = visit(&mut browser, get("/calc?size=2&page=3"));

	let extra: SelectedValues = [("page", "4")].into_iter().collect();
	assert_eq!(controller.request_url(&extra), "/?size=2&page=4");
	assert_eq!(controller.request_url(&SelectedValues::new()), "/calc?size=2&page=3");
	assert_eq!(controller.request_url_except(&["page"]), "/?size=2");
}

#[rstest]
fn test_invalid_source_code_url_stops_construction(browser: Browser) {
	let result = CalculatorController::builder("not-a-url", get("/"), browser.jar()).build();

	assert!(matches!(
		result,
		Err(CalculatorError::SourceCodeUrlIsNotValid { ref url }) if url == "not-a-url"
	));
}

#[rstest]
fn test_long_history_cookie_stays_within_browser_limit(mut browser: Browser) {
	// Arrange
	let form = (0..7)
		.map(|field| format!("field_{}=some%20longer%20value%20{}", field, field))
		.collect::<Vec<_>>()
		.join("&");

	// Act
	let mut sizes = Vec::new();
	for round in 0..41 {
		let controller = visit(
			&mut browser,
			get(&format!("/?{}&round={}&remember_current=1", form, round)),
		);
		let header = controller
			.cookies()
			.set_cookie_headers()
			.into_iter()
			.find(|header| header.starts_with("history-fight="))
			.unwrap();
		sizes.push(header.split("; ").next().unwrap().len());
	}
	let controller = visit(&mut browser, get("/"));

	// Assert
	assert!(sizes.iter().all(|size| *size <= 4096), "sizes: {:?}", sizes);
	let history = controller.history();
	assert!(history.len() < 41);
	assert_eq!(history.value("round").and_then(Value::as_scalar), Some("40"));
}
