//! Settings loaded from files and the environment, applied to a controller

use calculator::prelude::*;
use calculator_conf::ENV_PREFIX;
use calculator_integration_tests::{Browser, browser, get};
use rstest::rstest;
use serial_test::serial;
use std::io::Write;

#[rstest]
fn test_settings_file_configures_controller(mut browser: Browser) {
	// Arrange
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(
		file,
		r#"
google_analytics_id = "UA-7"
cookies_postfix = "-magic"
cookies_ttl = 600
history_limit = 2
cookie_secure = true
assets_url = "https://cdn.example.com/calc"
"#
	)
	.unwrap();
	let settings = Settings::from_file(file.path()).unwrap();
	settings.validate().unwrap();

	// Act
	for value in ["1", "2", "3"] {
		let cookies = browser.jar().with_options(cookie_options(&settings));
		let controller = CalculatorController::from_settings(
			&settings,
			get(&format!("/?a={}&remember_current=1", value)),
			cookies,
		)
		.unwrap();
		browser.receive(controller.cookies());
	}
	let cookies = browser.jar().with_options(cookie_options(&settings));
	let controller = CalculatorController::from_settings(&settings, get("/"), cookies).unwrap();

	// Assert
	assert!(browser.has_cookie("memory-magic"));
	assert_eq!(controller.history().len(), 2);
	assert_eq!(controller.frontend().google_analytics_id(), "UA-7");
	assert_eq!(
		controller.frontend().asset_url("main.css"),
		"https://cdn.example.com/calc/main.css"
	);
}

#[rstest]
fn test_cookie_attributes_follow_settings() {
	let mut settings = Settings::default();
	settings.cookie_secure = true;
	settings.cookie_http_only = false;
	settings.cookie_same_site = Some("Strict".to_string());
	settings.cookies_ttl = Some(60);
	let cookies = CookieJar::new().with_options(cookie_options(&settings));

	let controller =
		CalculatorController::from_settings(&settings, get("/?a=1&remember_current=1"), cookies)
			.unwrap();

	for header in controller.cookies().set_cookie_headers() {
		assert!(header.ends_with("; Path=/; Secure; SameSite=Strict; Max-Age=60"));
	}
}

#[rstest]
#[serial(calculator_env)]
fn test_environment_overrides_defaults() {
	// Arrange
	unsafe {
		std::env::set_var("CALCULATOR_COOKIES_POSTFIX", "-env");
		std::env::set_var("CALCULATOR_HISTORY_LIMIT", "5");
	}

	// Act
	let settings = Settings::from_env();

	// Assert
	unsafe {
		std::env::remove_var("CALCULATOR_COOKIES_POSTFIX");
		std::env::remove_var("CALCULATOR_HISTORY_LIMIT");
	}
	let settings = settings.unwrap();
	assert_eq!(settings.cookies_postfix, "-env");
	assert_eq!(settings.history_limit, 5);
}

#[rstest]
#[serial(calculator_env)]
fn test_environment_applies_over_file_settings() {
	let mut settings = Settings::from_toml_str(r#"source_code_url = "https://example.com/repo""#).unwrap();
	unsafe {
		std::env::set_var("CALCULATOR_SOURCE_CODE_URL", "nope");
	}

	let result = settings.apply_env(ENV_PREFIX);

	unsafe {
		std::env::remove_var("CALCULATOR_SOURCE_CODE_URL");
	}
	result.unwrap();
	assert_eq!(settings.source_code_url, "nope");
	assert!(settings.validate().is_err());
	assert!(matches!(
		CalculatorController::from_settings(&settings, get("/"), CookieJar::new()),
		Err(CalculatorError::SourceCodeUrlIsNotValid { .. })
	));
}
