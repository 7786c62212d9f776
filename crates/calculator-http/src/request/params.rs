//! Selected-values extraction from `application/x-www-form-urlencoded` data
//!
//! Field names use the bracket convention of web forms:
//!
//! | raw pair            | result                          |
//! |---------------------|---------------------------------|
//! | `a=1`               | `a: "1"`                        |
//! | `a[]=x&a[]=y`       | `a: {"0": "x", "1": "y"}`       |
//! | `a[k]=v`            | `a: {"k": "v"}`                 |
//! | `a[k][]=v`          | `a: {"k": {"0": "v"}}`          |

use calculator_core::values::{SelectedValues, Value};
use indexmap::IndexMap;
use url::form_urlencoded;

/// Parse urlencoded text into ordered, possibly nested values
///
/// A name repeated without brackets keeps its last value. Names starting with
/// `[` are dropped; a name with an unclosed `[` is kept literally.
///
/// # Examples
///
/// ```
/// use calculator_http::request::params::parse_form;
///
/// let values = parse_form("color=red&tags[]=x&tags[]=y");
/// assert_eq!(values.get("color").and_then(|v| v.as_scalar()), Some("red"));
///
/// let tags = values.get("tags").and_then(|v| v.as_array()).unwrap();
/// assert_eq!(tags.get("0").and_then(|v| v.as_scalar()), Some("x"));
/// assert_eq!(tags.get("1").and_then(|v| v.as_scalar()), Some("y"));
/// ```
pub fn parse_form(raw: &str) -> SelectedValues {
	let mut values: IndexMap<String, Value> = IndexMap::new();
	for (name, value) in form_urlencoded::parse(raw.as_bytes()) {
		let Some((base, segments)) = split_name(&name) else {
			continue;
		};
		insert_at(&mut values, base, &segments, value.into_owned());
	}
	SelectedValues::from(values)
}

/// Merge query values with posted fields, posted fields winning on collision
pub fn extract_selected_values(query: &SelectedValues, post: Option<&SelectedValues>) -> SelectedValues {
	match post {
		Some(post) => query.merged_with(post),
		None => query.clone(),
	}
}

/// Split `base[seg1][seg2]` into the base name and its bracket segments.
///
/// `None` segments stand for `[]`, meaning "next free index".
fn split_name(name: &str) -> Option<(String, Vec<Option<String>>)> {
	let Some(open) = name.find('[') else {
		return (!name.is_empty()).then(|| (name.to_string(), Vec::new()));
	};
	if open == 0 {
		return None;
	}
	let base = &name[..open];
	let mut rest = &name[open..];
	let mut segments = Vec::new();
	while let Some(inner) = rest.strip_prefix('[') {
		let Some(close) = inner.find(']') else {
			break;
		};
		let segment = &inner[..close];
		segments.push((!segment.is_empty()).then(|| segment.to_string()));
		rest = &inner[close + 1..];
	}
	if segments.is_empty() {
		// unclosed first bracket
		return Some((name.to_string(), Vec::new()));
	}
	Some((base.to_string(), segments))
}

fn insert_at(
	target: &mut IndexMap<String, Value>,
	key: String,
	segments: &[Option<String>],
	value: String,
) {
	let Some((next, deeper)) = segments.split_first() else {
		target.insert(key, Value::Scalar(value));
		return;
	};
	let slot = target
		.entry(key)
		.or_insert_with(|| Value::Array(IndexMap::new()));
	if !slot.is_array() {
		*slot = Value::Array(IndexMap::new());
	}
	if let Value::Array(children) = slot {
		let child_key = match next {
			Some(explicit) => explicit.clone(),
			None => match next_index(children) {
				Some(index) => index,
				None => {
					tracing::debug!("Dropping array entry, no free index left");
					return;
				}
			},
		};
		insert_at(children, child_key, deeper, value);
	}
}

/// Index after the largest numeric key; `None` once `u64::MAX` is taken
fn next_index(children: &IndexMap<String, Value>) -> Option<String> {
	let next = match children.keys().filter_map(|key| key.parse::<u64>().ok()).max() {
		Some(largest) => largest.checked_add(1)?,
		None => 0,
	};
	Some(next.to_string())
}
