//! Manifest and value type definitions.
//!
//! This module defines the data model shared by the consumption engine, the
//! manifest validator and the coercion step. The manifest types are designed
//! for serialization with [`serde`] so that they can be loaded from JSON or
//! YAML documents as well as built in code.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A captured or coerced option value.
///
/// Raw parsing only ever produces [`Value::Bool`] (a bare flag) and
/// [`Value::Str`] (a captured value). Coercion against a manifest can turn
/// strings into [`Value::Int`] or [`Value::Float`].
///
/// Serializes untagged, so a value renders as a plain JSON/YAML scalar.
///
/// # Examples
///
/// ```
/// use argmap_core::Value;
///
/// assert_eq!(Value::Int(3), Value::Float(3.0));
/// assert_ne!(Value::Str("3".into()), Value::Int(3));
/// assert_eq!(Value::from("json").to_string(), "json");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value. Infinities serialize as the strings
    /// `"Infinity"` and `"-Infinity"`.
    Float(#[serde(serialize_with = "serialize_float")] f64),
    /// String value.
    Str(String),
}

impl Value {
    /// Returns `true` for [`Value::Int`] and [`Value::Float`].
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Name of the value's kind as used in manifests (`boolean`, `int`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as `f64` for either numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

/// Numeric variants compare by value, so `Int(1) == Float(1.0)`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (a, b) if a.is_number() && b.is_number() => a.as_f64() == b.as_f64(),
            _ => false,
        }
    }
}

fn serialize_float<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_negative() {
        serializer.serialize_str("-Infinity")
    } else {
        serializer.serialize_str("Infinity")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

/// Declared type of a manifest entry.
///
/// Deserializes from any string. Names other than `boolean`, `string`, `int`
/// and `float` land in [`OptionKind::Unrecognized`] and are rejected by
/// [`validate_manifest`](crate::validate_manifest).
///
/// A document that omits `type` gets [`OptionKind::String`].
///
/// # Examples
///
/// ```
/// use argmap_core::OptionKind;
///
/// assert_eq!(OptionKind::from("int".to_string()), OptionKind::Int);
/// assert_eq!(OptionKind::default(), OptionKind::String);
/// assert!(matches!(OptionKind::from("number".to_string()), OptionKind::Unrecognized(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptionKind {
    /// Bare flag; never captures the following token.
    Boolean,
    /// Captured string (the default).
    #[default]
    String,
    /// Integer parsed from the captured string.
    Int,
    /// Float parsed from the captured string.
    Float,
    /// Any other type name found in a manifest document.
    Unrecognized(String),
}

impl OptionKind {
    pub fn as_str(&self) -> &str {
        match self {
            OptionKind::Boolean => "boolean",
            OptionKind::String => "string",
            OptionKind::Int => "int",
            OptionKind::Float => "float",
            OptionKind::Unrecognized(name) => name,
        }
    }

    /// Whether `value` is of a kind this type accepts in `default`/`allow`.
    ///
    /// `int` and `float` both accept any number.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            OptionKind::Boolean => matches!(value, Value::Bool(_)),
            OptionKind::String => matches!(value, Value::Str(_)),
            OptionKind::Int | OptionKind::Float => value.is_number(),
            OptionKind::Unrecognized(_) => false,
        }
    }
}

impl From<String> for OptionKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "boolean" => OptionKind::Boolean,
            "string" => OptionKind::String,
            "int" => OptionKind::Int,
            "float" => OptionKind::Float,
            _ => OptionKind::Unrecognized(name),
        }
    }
}

impl From<OptionKind> for String {
    fn from(kind: OptionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A manifest entry describing one option or positional argument.
///
/// Use the typed constructors ([`boolean`](OptionSpec::boolean),
/// [`string`](OptionSpec::string), [`int`](OptionSpec::int),
/// [`float`](OptionSpec::float)) and chain the builder methods.
///
/// # Examples
///
/// ```
/// use argmap_core::{OptionKind, OptionSpec, Value};
///
/// let format = OptionSpec::string()
///     .with_allow(["json", "yaml"])
///     .with_default("json")
///     .with_description("Output format");
/// assert_eq!(format.kind, OptionKind::String);
/// assert_eq!(format.default, Some(Value::from("json")));
/// assert!(!format.required);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionSpec {
    /// Declared type.
    #[serde(rename = "type", default)]
    pub kind: OptionKind,
    /// Value used when the option is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Whether the option must be supplied (when no default applies).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Accepted values, checked after coercion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<Value>>,
    /// Informational description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OptionSpec {
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn boolean() -> Self {
        Self::new(OptionKind::Boolean)
    }

    pub fn string() -> Self {
        Self::new(OptionKind::String)
    }

    pub fn int() -> Self {
        Self::new(OptionKind::Int)
    }

    pub fn float() -> Self {
        Self::new(OptionKind::Float)
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the allow list.
    pub fn with_allow<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allow = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// Key of a parsed value: a named option or a positional index.
///
/// Positional keys order before named keys, so iterating a result yields
/// positional arguments first.
///
/// # Examples
///
/// ```
/// use argmap_core::Key;
///
/// assert_eq!(Key::parse("0"), Key::Positional(0));
/// assert_eq!(Key::parse("12"), Key::Positional(12));
/// assert_eq!(Key::parse("verbose"), Key::Named("verbose".into()));
/// assert_eq!(Key::parse("01"), Key::Named("01".into()));
/// assert!(Key::Positional(5) < Key::Named("a".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Zero-based index of a positional argument.
    Positional(usize),
    /// Long option name or short flag character.
    Named(String),
}

impl Key {
    /// Interprets a manifest key. Canonical decimal indices (no sign, no
    /// leading zeros) are positional; anything else is a name.
    pub fn parse(raw: &str) -> Self {
        let canonical = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));
        match raw.parse::<usize>() {
            Ok(index) if canonical => Key::Positional(index),
            _ => Key::Named(raw.to_string()),
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Key::Positional(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Positional(index) => write!(f, "{index}"),
            Key::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Key::parse(raw)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Positional(index)
    }
}

/// Declarative option schema: an ordered mapping of keys to [`OptionSpec`].
///
/// Keys are long-option names, single-letter short flags, or stringified
/// positional indices (`"0"`, `"1"`, ...). Declaration order is preserved and
/// drives both coercion order and [`syntax`](crate::syntax) rendering.
///
/// # Examples
///
/// ```
/// use argmap_core::{Manifest, OptionSpec};
///
/// let manifest = Manifest::new()
///     .with_option("verbose", OptionSpec::boolean())
///     .with_option("jobs", OptionSpec::int().with_default(4))
///     .with_option("0", OptionSpec::string().required());
///
/// assert_eq!(manifest.len(), 3);
/// assert!(manifest.is_boolean_option("verbose"));
/// assert!(!manifest.is_boolean_option("jobs"));
/// assert!(!manifest.is_boolean_option("missing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    options: IndexMap<String, OptionSpec>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any previous entry with the same key.
    pub fn with_option(mut self, key: impl Into<String>, spec: OptionSpec) -> Self {
        self.insert(key, spec);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, spec: OptionSpec) -> Option<OptionSpec> {
        self.options.insert(key.into(), spec)
    }

    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.options.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// Capability check used by the consumption engine: a declared boolean
    /// option never captures the following token as its value.
    pub fn is_boolean_option(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|spec| spec.kind == OptionKind::Boolean)
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.options.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Collects `(key, spec)` pairs, keeping their order.
///
/// # Examples
///
/// ```
/// use argmap_core::{Manifest, OptionSpec};
///
/// let manifest: Manifest = [
///     ("verbose", OptionSpec::boolean()),
///     ("0", OptionSpec::string().required()),
/// ]
/// .into_iter()
/// .collect();
///
/// assert!(manifest.is_boolean_option("verbose"));
/// assert_eq!(manifest.iter().map(|(k, _)| k).collect::<Vec<_>>(), ["verbose", "0"]);
/// ```
impl<K: Into<String>> FromIterator<(K, OptionSpec)> for Manifest {
    fn from_iter<T: IntoIterator<Item = (K, OptionSpec)>>(iter: T) -> Self {
        Self {
            options: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
