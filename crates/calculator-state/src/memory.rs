//! Single-snapshot memory of the last remembered selection

use crate::storage;
use calculator_core::values::{SelectedValues, Value};
use calculator_http::cookies::CookieStore;
use std::time::Duration;

/// Base name of the memory cookie; the configured postfix is appended
pub const MEMORY_COOKIE: &str = "memory";

/// Values remembered from the last request that asked for it
///
/// The state is decided once, when constructed:
///
/// 1. `delete_history` wipes the cookie and leaves the memory empty;
/// 2. otherwise `remember_current` replaces the memory with the incoming
///    values and writes them back;
/// 3. otherwise the previously remembered values are read back untouched.
///
/// # Examples
///
/// ```
/// use calculator_core::values::SelectedValues;
/// use calculator_http::cookies::{CookieJar, CookieStore};
/// use calculator_state::Memory;
///
/// let mut cookies = CookieJar::new();
/// let values: SelectedValues = [("color", "red")].into_iter().collect();
///
/// let memory = Memory::new(&mut cookies, false, &values, true, "-demo", None);
/// assert_eq!(memory.values(), &values);
/// assert_eq!(cookies.get("memory-demo"), Some(r#"{"color":"red"}"#));
///
/// // next request, nothing to remember
/// let memory = Memory::new(&mut cookies, false, &SelectedValues::new(), false, "-demo", None);
/// assert_eq!(memory.value("color").and_then(|v| v.as_scalar()), Some("red"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
	cookie_name: String,
	values: SelectedValues,
}

impl Memory {
	pub fn new<C>(
		cookies: &mut C,
		delete_history: bool,
		values: &SelectedValues,
		remember_current: bool,
		cookies_postfix: &str,
		ttl: Option<Duration>,
	) -> Self
	where
		C: CookieStore + ?Sized,
	{
		let cookie_name = Self::cookie_name_for(cookies_postfix);

		let values = if delete_history {
			tracing::debug!(cookie = %cookie_name, "Forgetting remembered values");
			cookies.delete(&cookie_name);
			SelectedValues::new()
		} else if remember_current {
			tracing::debug!(cookie = %cookie_name, count = values.len(), "Remembering current values");
			storage::save(cookies, &cookie_name, values, ttl);
			values.clone()
		} else {
			storage::load(&*cookies, &cookie_name).unwrap_or_default()
		};

		Self {
			cookie_name,
			values,
		}
	}

	/// Cookie name used for a given postfix
	pub fn cookie_name_for(cookies_postfix: &str) -> String {
		format!("{}{}", MEMORY_COOKIE, cookies_postfix)
	}

	pub fn cookie_name(&self) -> &str {
		&self.cookie_name
	}

	/// Remembered values, in the order they were submitted
	pub fn values(&self) -> &SelectedValues {
		&self.values
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.values.iter()
	}

	pub fn value(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn into_values(self) -> SelectedValues {
		self.values
	}
}

impl<'a> IntoIterator for &'a Memory {
	type Item = (&'a String, &'a Value);
	type IntoIter = <&'a SelectedValues as IntoIterator>::IntoIter;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}
