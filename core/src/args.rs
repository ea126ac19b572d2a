//! The parse result.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Key, Value};

/// Result of [`parse`](crate::parse): named options and positional
/// arguments in a single map.
///
/// Every positional argument appears under its zero-based index. The full
/// ordered list of raw positional tokens is kept separately and is reachable
/// only through [`positionals`](ParsedArgs::positionals); it is never part of
/// [`iter`](ParsedArgs::iter), [`len`](ParsedArgs::len) or the serialized map.
///
/// # Examples
///
/// ```
/// use argmap_core::{Value, parse};
///
/// let args = parse(None, ["--name", "ada", "src", "-v"]).unwrap();
/// assert_eq!(args.get_str("name"), Some("ada"));
/// assert_eq!(args.get_bool("v"), Some(true));
/// assert_eq!(args.get_index(0), Some(&Value::from("src")));
/// assert_eq!(args.positionals(), ["src"]);
/// assert_eq!(args.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    values: BTreeMap<Key, Value>,
    positionals: Vec<String>,
}

impl ParsedArgs {
    pub(crate) fn from_parts(values: BTreeMap<Key, Value>, positionals: Vec<String>) -> Self {
        Self {
            values,
            positionals,
        }
    }

    pub(crate) fn take(&mut self, key: &Key) -> Option<Value> {
        self.values.remove(key)
    }

    pub(crate) fn set(&mut self, key: Key, value: Value) {
        self.values.insert(key, value);
    }

    /// Value stored under `key`, read the way manifest keys are: `"0"` is
    /// the first positional, anything else names an option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(&Key::parse(key))
    }

    /// Value of the positional argument at `index`.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(&Key::Positional(index))
    }

    pub fn get_key(&self, key: &Key) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Raw positional tokens in the order they were encountered.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Iterates entries: positional indices ascending, then names in
    /// lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flattens to a string-keyed map, with positional indices rendered as
    /// decimal strings.
    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.values
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

impl Serialize for ParsedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}
