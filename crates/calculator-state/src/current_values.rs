//! Request input layered over the remembered selection

use crate::memory::Memory;
use calculator_core::values::{SelectedValues, Value};

/// Values the calculator works with for the current request
///
/// Every name from the request or from [`Memory`] is present. When both
/// carry a name the request wins, and the value is taken as a whole: nested
/// arrays are never merged key by key.
///
/// # Examples
///
/// ```
/// use calculator_core::values::SelectedValues;
/// use calculator_http::cookies::CookieJar;
/// use calculator_state::{CurrentValues, Memory};
///
/// let mut cookies = CookieJar::new();
/// let remembered: SelectedValues = [("color", "red"), ("size", "2")].into_iter().collect();
/// let memory = Memory::new(&mut cookies, false, &remembered, true, "", None);
///
/// let selected: SelectedValues = [("color", "blue")].into_iter().collect();
/// let current = CurrentValues::new(&selected, &memory);
///
/// assert_eq!(current.current_value("color").and_then(|v| v.as_scalar()), Some("blue"));
/// assert_eq!(current.current_value("size").and_then(|v| v.as_scalar()), Some("2"));
/// assert_eq!(current.selected_value("size"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentValues {
	selected: SelectedValues,
	merged: SelectedValues,
}

impl CurrentValues {
	pub fn new(selected: &SelectedValues, memory: &Memory) -> Self {
		Self {
			selected: selected.clone(),
			merged: memory.values().merged_with(selected),
		}
	}

	/// Value from the request, falling back to the remembered one
	pub fn current_value(&self, name: &str) -> Option<&Value> {
		self.merged.get(name)
	}

	/// Value from the request only
	pub fn selected_value(&self, name: &str) -> Option<&Value> {
		self.selected.get(name)
	}

	pub fn values(&self) -> &SelectedValues {
		&self.merged
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.merged.iter()
	}

	pub fn len(&self) -> usize {
		self.merged.len()
	}

	pub fn is_empty(&self) -> bool {
		self.merged.is_empty()
	}
}

impl<'a> IntoIterator for &'a CurrentValues {
	type Item = (&'a String, &'a Value);
	type IntoIter = <&'a SelectedValues as IntoIterator>::IntoIter;

	fn into_iter(self) -> Self::IntoIter {
		self.merged.iter()
	}
}
