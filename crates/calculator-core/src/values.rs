//! Ordered form values
//!
//! Web forms submit either plain `name=value` pairs or array-shaped fields
//! (`name[]=a`, `name[key]=b`). [`Value`] models both shapes and
//! [`SelectedValues`] keeps them in submission order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single submitted value: a scalar string or a nested, ordered array.
///
/// # Examples
///
/// ```
/// use calculator_core::values::Value;
///
/// let color = Value::from("red");
/// assert_eq!(color.as_scalar(), Some("red"));
///
/// let tags = Value::list(["x", "y"]);
/// assert!(tags.is_array());
/// assert_eq!(tags.as_array().unwrap().get("1"), Some(&Value::from("y")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	Scalar(String),
	Array(IndexMap<String, Value>),
}

impl Value {
	/// Create a scalar value
	pub fn scalar(value: impl Into<String>) -> Self {
		Self::Scalar(value.into())
	}

	/// Create an array value keyed by position (`"0"`, `"1"`, ...)
	pub fn list<I, V>(items: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::Array(
			items
				.into_iter()
				.enumerate()
				.map(|(index, item)| (index.to_string(), item.into()))
				.collect(),
		)
	}

	/// Create an array value from explicit keys
	pub fn array<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		Self::Array(
			entries
				.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}

	pub fn as_scalar(&self) -> Option<&str> {
		match self {
			Self::Scalar(value) => Some(value),
			Self::Array(_) => None,
		}
	}

	pub fn as_array(&self) -> Option<&IndexMap<String, Value>> {
		match self {
			Self::Scalar(_) => None,
			Self::Array(items) => Some(items),
		}
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Self::Array(_))
	}

	/// Whether a form would consider this value "filled in"
	///
	/// Empty strings, `"0"` and empty arrays count as not set, matching how
	/// checkbox-like flags are submitted by browsers.
	///
	/// # Examples
	///
	/// ```
	/// use calculator_core::values::Value;
	///
	/// assert!(Value::from("1").is_truthy());
	/// assert!(Value::from("on").is_truthy());
	/// assert!(!Value::from("0").is_truthy());
	/// assert!(!Value::from("").is_truthy());
	/// assert!(!Value::list(Vec::<String>::new()).is_truthy());
	/// ```
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Scalar(value) => !(value.is_empty() || value == "0"),
			Self::Array(items) => !items.is_empty(),
		}
	}

	fn collect_leaves<'a>(&'a self, path: &mut Vec<&'a str>, leaves: &mut Vec<Leaf<'a>>) {
		match self {
			Self::Scalar(value) => leaves.push(Leaf {
				path: path.clone(),
				value: value.as_str(),
			}),
			Self::Array(items) => {
				for (key, item) in items {
					path.push(key.as_str());
					item.collect_leaves(path, leaves);
					path.pop();
				}
			}
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Scalar(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Scalar(value)
	}
}

impl From<IndexMap<String, Value>> for Value {
	fn from(items: IndexMap<String, Value>) -> Self {
		Self::Array(items)
	}
}

/// One scalar found while flattening values.
///
/// `path` starts with the top-level parameter name, followed by every array
/// key leading down to the scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'a> {
	path: Vec<&'a str>,
	value: &'a str,
}

impl<'a> Leaf<'a> {
	/// Top-level parameter name
	pub fn name(&self) -> &'a str {
		self.path[0]
	}

	pub fn path(&self) -> &[&'a str] {
		&self.path
	}

	pub fn value(&self) -> &'a str {
		self.value
	}

	/// Number of array levels between the parameter and the scalar
	pub fn depth(&self) -> usize {
		self.path.len() - 1
	}

	/// Parameter name with one `[]` per array level, as form parsers expect
	///
	/// # Examples
	///
	/// ```
	/// use calculator_core::values::{SelectedValues, Value};
	///
	/// let mut values = SelectedValues::new();
	/// values.insert("tags", Value::list(["x"]));
	///
	/// let leaves = values.flatten();
	/// assert_eq!(leaves[0].bracketed_name(), "tags[]");
	/// ```
	pub fn bracketed_name(&self) -> String {
		let mut name = String::with_capacity(self.name().len() + 2 * self.depth());
		name.push_str(self.name());
		for _ in 0..self.depth() {
			name.push_str("[]");
		}
		name
	}
}

/// Ordered mapping from parameter name to submitted [`Value`].
///
/// Inserting an existing name replaces its value in place, so the original
/// position is kept; new names are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedValues(IndexMap<String, Value>);

impl SelectedValues {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(name.into(), value.into())
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Remove a value, keeping the order of the remaining ones
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.0.shift_remove(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
		self.0.iter()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Whether the named value is present and filled in, see [`Value::is_truthy`]
	pub fn is_truthy(&self, name: &str) -> bool {
		self.get(name).is_some_and(Value::is_truthy)
	}

	/// Copy of `self` with `overrides` applied on top
	///
	/// Names already present keep their position and take the overriding
	/// value; unknown names are appended in the order of `overrides`.
	///
	/// # Examples
	///
	/// ```
	/// use calculator_core::values::SelectedValues;
	///
	/// let base: SelectedValues = [("a", "1"), ("b", "2")].into_iter().collect();
	/// let overrides: SelectedValues = [("c", "3"), ("a", "9")].into_iter().collect();
	///
	/// let merged = base.merged_with(&overrides);
	/// let pairs: Vec<_> = merged.iter().map(|(k, v)| (k.as_str(), v.as_scalar().unwrap())).collect();
	/// assert_eq!(pairs, vec![("a", "9"), ("b", "2"), ("c", "3")]);
	/// ```
	pub fn merged_with(&self, overrides: &SelectedValues) -> SelectedValues {
		let mut merged = self.clone();
		for (name, value) in overrides.iter() {
			merged.0.insert(name.clone(), value.clone());
		}
		merged
	}

	/// Copy of `self` without the listed names
	pub fn without<S: AsRef<str>>(&self, names: &[S]) -> SelectedValues {
		self.0
			.iter()
			.filter(|(name, _)| !names.iter().any(|excluded| excluded.as_ref() == name.as_str()))
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect()
	}

	/// Flatten every value into its scalar leaves, in insertion order
	///
	/// Empty arrays produce no leaves.
	pub fn flatten(&self) -> Vec<Leaf<'_>> {
		let mut leaves = Vec::new();
		let mut path = Vec::new();
		for (name, value) in &self.0 {
			path.push(name.as_str());
			value.collect_leaves(&mut path, &mut leaves);
			path.pop();
		}
		leaves
	}

	/// Scalar leaves only, without any names or array keys
	///
	/// # Examples
	///
	/// ```
	/// use calculator_core::values::{SelectedValues, Value};
	///
	/// let mut values = SelectedValues::new();
	/// values.insert("a", "1");
	/// values.insert("b", Value::array([("x", "2"), ("y", "3")]));
	///
	/// assert_eq!(values.leaf_values(), vec!["1", "2", "3"]);
	/// ```
	pub fn leaf_values(&self) -> Vec<&str> {
		self.flatten().into_iter().map(|leaf| leaf.value).collect()
	}

	/// Scalar leaves interleaved with the array keys that lead to them
	///
	/// Each array key appears once, right before the leaves nested under it.
	/// Top-level names of scalar values are not included.
	///
	/// # Examples
	///
	/// ```
	/// use calculator_core::values::{SelectedValues, Value};
	///
	/// let mut values = SelectedValues::new();
	/// values.insert("a", "1");
	/// values.insert("b", Value::array([("x", "2"), ("y", "3")]));
	///
	/// assert_eq!(values.leaf_values_with_indexes(), vec!["1", "b", "2", "3"]);
	/// ```
	pub fn leaf_values_with_indexes(&self) -> Vec<&str> {
		let leaves = self.flatten();
		let mut flat = Vec::new();
		let mut previous: &[&str] = &[];
		for leaf in &leaves {
			let branches = &leaf.path[..leaf.depth()];
			let shared = branches
				.iter()
				.zip(previous.iter())
				.take_while(|(current, before)| current == before)
				.count();
			flat.extend_from_slice(&branches[shared..]);
			flat.push(leaf.value);
			previous = branches;
		}
		flat
	}
}

impl FromIterator<(String, Value)> for SelectedValues {
	fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> FromIterator<(&'a str, &'a str)> for SelectedValues {
	fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, value)| (name.to_string(), Value::from(value)))
				.collect(),
		)
	}
}

impl<'a> IntoIterator for &'a SelectedValues {
	type Item = (&'a String, &'a Value);
	type IntoIter = indexmap::map::Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl IntoIterator for SelectedValues {
	type Item = (String, Value);
	type IntoIter = indexmap::map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl From<IndexMap<String, Value>> for SelectedValues {
	fn from(values: IndexMap<String, Value>) -> Self {
		Self(values)
	}
}
