//! Cumulative record of remembered selections

use crate::storage;
use calculator_core::values::{SelectedValues, Value};
use calculator_http::cookies::CookieStore;
use std::time::Duration;

/// Base name of the history cookie; the configured postfix is appended
pub const HISTORY_COOKIE: &str = "history";

/// Number of snapshots kept unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Largest `name=value` pair browsers are guaranteed to store
pub const DEFAULT_MAX_COOKIE_SIZE: usize = 4096;

/// Bounds applied whenever the history cookie is written
///
/// # Examples
///
/// ```
/// use calculator_state::history::HistoryLimits;
///
/// let limits = HistoryLimits::new().with_max_entries(10).with_max_cookie_size(2048);
/// assert_eq!(limits.max_entries(), 10);
/// assert_eq!(limits.max_cookie_size(), 2048);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
	max_entries: usize,
	max_cookie_size: usize,
}

impl HistoryLimits {
	/// [`DEFAULT_HISTORY_LIMIT`] snapshots within [`DEFAULT_MAX_COOKIE_SIZE`] bytes
	pub fn new() -> Self {
		Self {
			max_entries: DEFAULT_HISTORY_LIMIT,
			max_cookie_size: DEFAULT_MAX_COOKIE_SIZE,
		}
	}

	/// Keep at most `max_entries` snapshots (at least one)
	pub fn with_max_entries(mut self, max_entries: usize) -> Self {
		self.max_entries = max_entries.max(1);
		self
	}

	/// Keep the encoded cookie, name included, within `max_cookie_size` bytes
	pub fn with_max_cookie_size(mut self, max_cookie_size: usize) -> Self {
		self.max_cookie_size = max_cookie_size;
		self
	}

	pub fn max_entries(&self) -> usize {
		self.max_entries
	}

	pub fn max_cookie_size(&self) -> usize {
		self.max_cookie_size
	}
}

impl Default for HistoryLimits {
	fn default() -> Self {
		Self::new()
	}
}

/// Every selection remembered so far, oldest first
///
/// Takes the same flags as [`Memory`](crate::Memory), but a remember event
/// appends the incoming values as a new snapshot instead of replacing the
/// stored ones. Only `delete_history` clears the record. Oldest snapshots
/// are dropped once there are more than the [`HistoryLimits`] allow, or once
/// the encoded cookie would outgrow them.
///
/// # Examples
///
/// ```
/// use calculator_core::values::SelectedValues;
/// use calculator_http::cookies::CookieJar;
/// use calculator_state::History;
///
/// let mut cookies = CookieJar::new();
/// let first: SelectedValues = [("color", "red"), ("size", "1")].into_iter().collect();
/// let second: SelectedValues = [("color", "blue")].into_iter().collect();
///
/// History::new(&mut cookies, false, &first, true, "", None);
/// let history = History::new(&mut cookies, false, &second, true, "", None);
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.value("color").and_then(|v| v.as_scalar()), Some("blue"));
/// assert_eq!(history.value("size").and_then(|v| v.as_scalar()), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
	cookie_name: String,
	entries: Vec<SelectedValues>,
	combined: SelectedValues,
	limits: HistoryLimits,
}

impl History {
	/// Build the history with the default [`HistoryLimits`]
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
		Self::with_limits(
			cookies,
			delete_history,
			values,
			remember_current,
			cookies_postfix,
			ttl,
			HistoryLimits::default(),
		)
	}

	/// Build the history, trimming it to `limits` when written
	#[allow(clippy::too_many_arguments)]
	pub fn with_limits<C>(
		cookies: &mut C,
		delete_history: bool,
		values: &SelectedValues,
		remember_current: bool,
		cookies_postfix: &str,
		ttl: Option<Duration>,
		limits: HistoryLimits,
	) -> Self
	where
		C: CookieStore + ?Sized,
	{
		let cookie_name = Self::cookie_name_for(cookies_postfix);

		let entries = if delete_history {
			tracing::debug!(cookie = %cookie_name, "Deleting history");
			cookies.delete(&cookie_name);
			Vec::new()
		} else {
			let mut entries: Vec<SelectedValues> =
				storage::load(&*cookies, &cookie_name).unwrap_or_default();
			if remember_current {
				entries.push(values.clone());
				let overflow = entries.len().saturating_sub(limits.max_entries);
				entries.drain(..overflow);
				let mut dropped = overflow;
				while !entries.is_empty()
					&& storage::cookie_size(&*cookies, &cookie_name, &entries)
						.is_some_and(|size| size > limits.max_cookie_size)
				{
					entries.remove(0);
					dropped += 1;
				}
				tracing::debug!(
					cookie = %cookie_name,
					entries = entries.len(),
					dropped,
					"Appending to history"
				);
				storage::save(cookies, &cookie_name, &entries, ttl);
			}
			entries
		};

		let combined = entries
			.iter()
			.fold(SelectedValues::new(), |combined, entry| combined.merged_with(entry));

		Self {
			cookie_name,
			entries,
			combined,
			limits,
		}
	}

	/// Cookie name used for a given postfix
	pub fn cookie_name_for(cookies_postfix: &str) -> String {
		format!("{}{}", HISTORY_COOKIE, cookies_postfix)
	}

	pub fn cookie_name(&self) -> &str {
		&self.cookie_name
	}

	/// Maximum number of snapshots kept
	pub fn limit(&self) -> usize {
		self.limits.max_entries
	}

	pub fn limits(&self) -> HistoryLimits {
		self.limits
	}

	/// Remembered snapshots, oldest first
	pub fn entries(&self) -> &[SelectedValues] {
		&self.entries
	}

	pub fn latest(&self) -> Option<&SelectedValues> {
		self.entries.last()
	}

	/// Most recent remembered value of every name ever remembered
	///
	/// Names are ordered by their first appearance in the history.
	pub fn values(&self) -> &SelectedValues {
		&self.combined
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.combined.iter()
	}

	/// Most recent remembered value of `name`
	pub fn value(&self, name: &str) -> Option<&Value> {
		self.combined.get(name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
