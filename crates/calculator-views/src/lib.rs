//! Calculator controller and the helpers pages are rendered with
//!
//! - [`controller`]: per-request state and the reserved form fields
//! - [`url_builder`]: links carrying form values in the query string
//! - [`hidden_inputs`]: hidden fields resubmitting remembered values
//! - [`frontend`]: analytics, document root and asset hooks

pub mod controller;
pub mod frontend;
pub mod hidden_inputs;
pub mod url_builder;

pub use controller::{
	CalculatorController, CalculatorControllerBuilder, DELETE_HISTORY, REMEMBER_CURRENT,
	cookie_options,
};
pub use frontend::{Frontend, StaticFrontend};
pub use hidden_inputs::render_hidden_inputs;
pub use url_builder::{UrlBuilder, to_query_string};
