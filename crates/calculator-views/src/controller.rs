//! Calculator controller
//!
//! A [`CalculatorController`] is built once per request. Construction decides
//! the whole state: the remembered [`Memory`], the [`CurrentValues`] layered
//! over it and the [`History`]. Afterwards it only answers questions from the
//! rendering layer.
//!
//! Two form fields steer the state:
//!
//! - [`DELETE_HISTORY`], read from the posted fields, forgets everything;
//! - [`REMEMBER_CURRENT`], read from the selected values, stores them.
//!
//! Both count as set when present and not empty (`""` and `"0"` are empty).

use crate::frontend::{Frontend, StaticFrontend};
use crate::hidden_inputs::render_hidden_inputs;
use crate::url_builder::UrlBuilder;
use calculator_conf::Settings;
use calculator_core::exception::Result;
use calculator_core::validators::UrlValidator;
use calculator_core::values::SelectedValues;
use calculator_http::cookies::{CookieOptions, CookieStore};
use calculator_http::request::RequestContext;
use calculator_state::{CurrentValues, History, HistoryLimits, Memory};
use std::time::Duration;

/// Posted field that wipes memory and history
pub const DELETE_HISTORY: &str = "delete_history";

/// Selected value that stores the current values
pub const REMEMBER_CURRENT: &str = "remember_current";

/// Per-request calculator state and the helpers templates render it with
///
/// # Examples
///
/// ```
/// use calculator_http::{CookieJar, RequestContext};
/// use calculator_views::CalculatorController;
///
/// let request = RequestContext::builder()
/// 	.uri("/?strength=3&remember_current=1")
/// 	.build()
/// 	.unwrap();
///
/// let controller = CalculatorController::builder(
/// 	"https://github.com/drdplusinfo/calculator-skeleton",
/// 	request,
/// 	CookieJar::new(),
/// )
/// .cookies_postfix("-fight")
/// .build()
/// .unwrap();
///
/// assert_eq!(
/// 	controller.current_values().current_value("strength").and_then(|v| v.as_scalar()),
/// 	Some("3")
/// );
/// assert!(controller.cookies().has_changes());
/// ```
#[derive(Debug)]
pub struct CalculatorController<C: CookieStore> {
	frontend: Box<dyn Frontend>,
	source_code_url: String,
	request: RequestContext,
	cookies: C,
	memory: Memory,
	current_values: CurrentValues,
	history: History,
}

impl<C: CookieStore> CalculatorController<C> {
	/// Start configuring a controller for `request`
	pub fn builder(
		source_code_url: impl Into<String>,
		request: RequestContext,
		cookies: C,
	) -> CalculatorControllerBuilder<C> {
		CalculatorControllerBuilder {
			frontend: None,
			source_code_url: source_code_url.into(),
			request,
			cookies,
			cookies_postfix: String::new(),
			cookies_ttl: None,
			selected_values: None,
			history_limits: HistoryLimits::default(),
		}
	}

	/// Build a controller from positional parts
	///
	/// `selected_values` defaults to the request query.
	///
	/// # Errors
	///
	/// Returns [`CalculatorError::SourceCodeUrlIsNotValid`](calculator_core::CalculatorError::SourceCodeUrlIsNotValid)
	/// when `source_code_url` is not an absolute URL.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		frontend: Box<dyn Frontend>,
		source_code_url: impl Into<String>,
		cookies: C,
		cookies_postfix: impl Into<String>,
		cookies_ttl: Option<Duration>,
		request: RequestContext,
		selected_values: Option<SelectedValues>,
	) -> Result<Self> {
		let mut builder = Self::builder(source_code_url, request, cookies)
			.frontend(frontend)
			.cookies_postfix(cookies_postfix)
			.cookies_ttl(cookies_ttl);
		if let Some(selected_values) = selected_values {
			builder = builder.selected_values(selected_values);
		}
		builder.build()
	}

	/// Build a controller configured by `settings`
	///
	/// Cookie attributes are not applied here, as `cookies` is already
	/// constructed; see [`cookie_options`].
	pub fn from_settings(settings: &Settings, request: RequestContext, cookies: C) -> Result<Self> {
		Self::builder(settings.source_code_url.clone(), request, cookies)
			.frontend(Box::new(StaticFrontend::from_settings(settings)))
			.cookies_postfix(settings.cookies_postfix.clone())
			.cookies_ttl(settings.cookies_ttl())
			.history_limits(
				HistoryLimits::new()
					.with_max_entries(settings.history_limit)
					.with_max_cookie_size(settings.history_max_cookie_size),
			)
			.build()
	}

	pub fn source_code_url(&self) -> &str {
		&self.source_code_url
	}

	pub fn frontend(&self) -> &dyn Frontend {
		self.frontend.as_ref()
	}

	pub fn request(&self) -> &RequestContext {
		&self.request
	}

	pub fn memory(&self) -> &Memory {
		&self.memory
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn current_values(&self) -> &CurrentValues {
		&self.current_values
	}

	/// Remembered values, i.e. what hidden inputs resubmit
	pub fn selected_values(&self) -> &SelectedValues {
		self.memory.values()
	}

	pub fn url_builder(&self) -> UrlBuilder<'_> {
		UrlBuilder::new(&self.request)
	}

	/// See [`UrlBuilder::request_url`]
	pub fn request_url(&self, extra: &SelectedValues) -> String {
		self.url_builder().request_url(extra)
	}

	/// See [`UrlBuilder::request_url_except`]
	pub fn request_url_except<S: AsRef<str>>(&self, names: &[S]) -> String {
		self.url_builder().request_url_except(names)
	}

	/// Hidden inputs for every remembered value not listed in `except`
	pub fn current_values_as_hidden_inputs<S: AsRef<str>>(&self, except: &[S]) -> String {
		render_hidden_inputs(self.memory.values(), except)
	}

	pub fn cookies(&self) -> &C {
		&self.cookies
	}

	/// Give back the cookie store, e.g. to write its pending changes
	pub fn into_cookies(self) -> C {
		self.cookies
	}
}

/// Builder for [`CalculatorController`]
#[derive(Debug)]
pub struct CalculatorControllerBuilder<C: CookieStore> {
	frontend: Option<Box<dyn Frontend>>,
	source_code_url: String,
	request: RequestContext,
	cookies: C,
	cookies_postfix: String,
	cookies_ttl: Option<Duration>,
	selected_values: Option<SelectedValues>,
	history_limits: HistoryLimits,
}

impl<C: CookieStore> CalculatorControllerBuilder<C> {
	/// Page hooks; [`StaticFrontend::default`] when not set
	pub fn frontend(mut self, frontend: Box<dyn Frontend>) -> Self {
		self.frontend = Some(frontend);
		self
	}

	/// Appended to the cookie names so calculators on one domain stay apart
	pub fn cookies_postfix(mut self, cookies_postfix: impl Into<String>) -> Self {
		self.cookies_postfix = cookies_postfix.into();
		self
	}

	/// Cookie lifetime; `None` keeps the state for the browser session
	pub fn cookies_ttl(mut self, cookies_ttl: Option<Duration>) -> Self {
		self.cookies_ttl = cookies_ttl;
		self
	}

	/// Values to work with instead of the request query
	pub fn selected_values(mut self, selected_values: SelectedValues) -> Self {
		self.selected_values = Some(selected_values);
		self
	}

	/// Bounds of the history cookie; [`HistoryLimits::default`] when not set
	pub fn history_limits(mut self, history_limits: HistoryLimits) -> Self {
		self.history_limits = history_limits;
		self
	}

	/// Validate the source code URL and load the state
	pub fn build(self) -> Result<CalculatorController<C>> {
		UrlValidator::new().validate_source_code_url(&self.source_code_url)?;

		let Self {
			frontend,
			source_code_url,
			request,
			mut cookies,
			cookies_postfix,
			cookies_ttl,
			selected_values,
			history_limits,
		} = self;

		let selected_values = selected_values.unwrap_or_else(|| request.query().clone());
		let delete_history = request.post().is_truthy(DELETE_HISTORY);
		let remember_current = selected_values.is_truthy(REMEMBER_CURRENT);
		tracing::debug!(
			delete_history,
			remember_current,
			cookies_postfix = %cookies_postfix,
			"Building calculator controller"
		);

		let memory = Memory::new(
			&mut cookies,
			delete_history,
			&selected_values,
			remember_current,
			&cookies_postfix,
			cookies_ttl,
		);
		let current_values = CurrentValues::new(&selected_values, &memory);
		let history = History::with_limits(
			&mut cookies,
			delete_history,
			&selected_values,
			remember_current,
			&cookies_postfix,
			cookies_ttl,
			history_limits,
		);

		Ok(CalculatorController {
			frontend: frontend.unwrap_or_else(|| Box::new(StaticFrontend::default())),
			source_code_url,
			request,
			cookies,
			memory,
			current_values,
			history,
		})
	}
}

/// Cookie attributes configured by `settings`
///
/// # Examples
///
/// ```
/// use calculator_conf::Settings;
/// use calculator_http::CookieJar;
/// use calculator_views::controller::cookie_options;
///
/// let mut settings = Settings::default();
/// settings.cookie_secure = true;
///
/// let jar = CookieJar::from_header("").with_options(cookie_options(&settings));
/// assert!(jar.options().secure);
/// ```
pub fn cookie_options(settings: &Settings) -> CookieOptions {
	CookieOptions::new()
		.with_path(settings.cookie_path.clone())
		.with_secure(settings.cookie_secure)
		.with_http_only(settings.cookie_http_only)
		.with_same_site(settings.cookie_same_site.clone())
}
