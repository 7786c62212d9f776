//! # Calculator skeleton
//!
//! Shared machinery for small web calculators whose visitors can keep their
//! last inputs between page loads.
//!
//! Every request builds a [`CalculatorController`] that:
//!
//! - remembers the submitted values in a cookie when the form asks for it
//!   (`remember_current`), and forgets everything on `delete_history`;
//! - keeps a history of every remembered selection;
//! - merges live input over the remembered values;
//! - builds links back to the calculator and hidden inputs that resubmit the
//!   remembered values.
//!
//! ## Crates
//!
//! - `calculator-core`: value model, errors, HTML escaping, URL validation
//! - `calculator-http`: request context, form parsing, cookie jar
//! - `calculator-conf`: settings from TOML and `CALCULATOR_*` variables
//! - `calculator-state`: memory, history and current values
//! - `calculator-views`: controller, URL builder, hidden inputs, frontend hooks
//!
//! ## Quick Example
//!
//! ```rust
//! use calculator::prelude::*;
//!
//! let settings = Settings::from_toml_str(r#"cookies_postfix = "-fight""#).unwrap();
//!
//! // First visit: the form asks to remember its values
//! let request = RequestContext::builder()
//! 	.uri("/?strength=3&remember_current=1")
//! 	.build()
//! 	.unwrap();
//! let cookies = CookieJar::new().with_options(cookie_options(&settings));
//! let controller = CalculatorController::from_settings(&settings, request, cookies).unwrap();
//! let set_cookies = controller.into_cookies().set_cookie_headers();
//!
//! // Next visit sends the cookies back
//! let cookie_header = set_cookies
//! 	.iter()
//! 	.map(|header| header.split(';').next().unwrap())
//! 	.collect::<Vec<_>>()
//! 	.join("; ");
//! let request = RequestContext::builder().uri("/").build().unwrap();
//! let controller =
//! 	CalculatorController::from_settings(&settings, request, CookieJar::from_header(&cookie_header))
//! 		.unwrap();
//!
//! assert_eq!(
//! 	controller.current_values().current_value("strength").and_then(|v| v.as_scalar()),
//! 	Some("3")
//! );
//! assert!(controller
//! 	.current_values_as_hidden_inputs(&["remember_current"])
//! 	.contains(r#"name="strength" value="3""#));
//! ```

pub use calculator_conf as conf;
pub use calculator_core as core;
pub use calculator_http as http;
pub use calculator_state as state;
pub use calculator_views as views;

pub use calculator_conf::{Settings, SettingsError};
pub use calculator_core::{CalculatorError, Leaf, Result, SelectedValues, UrlValidator, Value, escape_html};
pub use calculator_http::{
	CookieError, CookieJar, CookieOptions, CookieStore, RequestContext, RequestContextBuilder,
	RequestError,
};
pub use calculator_state::{CurrentValues, History, HistoryLimits, Memory};
pub use calculator_views::{
	CalculatorController, CalculatorControllerBuilder, DELETE_HISTORY, Frontend, REMEMBER_CURRENT,
	StaticFrontend, UrlBuilder, cookie_options, render_hidden_inputs,
};

/// Everything a calculator page usually needs
pub mod prelude {
	pub use crate::{
		CalculatorController, CalculatorError, CookieJar, CookieStore, CurrentValues, Frontend,
		History, Memory, RequestContext, SelectedValues, Settings, StaticFrontend, Value,
		cookie_options,
	};
}
