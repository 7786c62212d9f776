//! Hidden form fields that resubmit remembered values

use calculator_core::security::escape_html;
use calculator_core::values::SelectedValues;

/// Render one `<input type="hidden">` per scalar in `values`
///
/// Names listed in `except` are skipped. Array values produce one tag per
/// scalar, named with a `[]` suffix per array level. Names and values are
/// HTML-escaped and tags are separated by newlines.
///
/// # Examples
///
/// ```
/// use calculator_core::values::{SelectedValues, Value};
/// use calculator_views::hidden_inputs::render_hidden_inputs;
///
/// let mut values = SelectedValues::new();
/// values.insert("color", "red");
/// values.insert("tags", Value::list(["x", "y"]));
///
/// assert_eq!(
/// 	render_hidden_inputs(&values, &["color"]),
/// 	"<input type=\"hidden\" name=\"tags[]\" value=\"x\">\n<input type=\"hidden\" name=\"tags[]\" value=\"y\">"
/// );
/// ```
pub fn render_hidden_inputs<S: AsRef<str>>(values: &SelectedValues, except: &[S]) -> String {
	values
		.flatten()
		.iter()
		.filter(|leaf| !except.iter().any(|name| name.as_ref() == leaf.name()))
		.map(|leaf| {
			format!(
				"<input type=\"hidden\" name=\"{}\" value=\"{}\">",
				escape_html(&leaf.bracketed_name()),
				escape_html(leaf.value())
			)
		})
		.collect::<Vec<_>>()
		.join("\n")
}
