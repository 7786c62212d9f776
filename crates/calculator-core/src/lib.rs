//! Core building blocks for the calculator skeleton
//!
//! - [`values`]: ordered, possibly nested form values and their flattening
//! - [`exception`]: error types
//! - [`security`]: HTML escaping
//! - [`validators`]: URL validation

pub mod exception;
pub mod security;
pub mod validators;
pub mod values;

pub use exception::{CalculatorError, Result};
pub use security::escape_html;
pub use validators::UrlValidator;
pub use values::{Leaf, SelectedValues, Value};
