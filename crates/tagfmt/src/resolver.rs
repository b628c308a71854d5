//! Key resolution for directives.
//!
//! The renderer never decides what a key means. It asks a [`Resolver`],
//! once per directive occurrence, left to right. Any closure
//! `FnMut(&str) -> String` is a resolver; [`MapResolver`] covers the common
//! case of a fixed set of variables.

use std::collections::HashMap;

use serde_json::Value;

/// Maps a directive key to its value.
///
/// Whatever is returned is used verbatim, including the empty string.
/// Unknown-key policy belongs to the implementation.
///
/// ```rust
/// use tagfmt::Resolver;
///
/// struct Upper;
///
/// impl Resolver for Upper {
///     fn resolve(&mut self, key: &str) -> String {
///         key.to_uppercase()
///     }
/// }
///
/// assert_eq!(tagfmt::render("[abc]", Upper), "ABC");
/// ```
pub trait Resolver {
    fn resolve(&mut self, key: &str) -> String;
}

impl<F> Resolver for F
where
    F: FnMut(&str) -> String,
{
    fn resolve(&mut self, key: &str) -> String {
        self(key)
    }
}

/// What a [`MapResolver`] returns for a key it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnknownKeyBehavior {
    /// Return the key itself.
    #[default]
    Passthrough,

    /// Return an empty string.
    Empty,

    /// Return the key prefixed with a marker (e.g., "(!?) ").
    Indicate(String),
}

/// Resolver backed by a map of variables.
///
/// ```rust
/// use tagfmt::{MapResolver, Renderer, UnknownKeyBehavior};
///
/// let mut vars = MapResolver::new()
///     .with("hp", "42")
///     .unknown_behavior(UnknownKeyBehavior::Empty);
///
/// let out = Renderer::new().render("HP [hp:Negate][missing]", &mut vars);
/// assert_eq!(out, "HP -42");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    values: HashMap<String, String>,
    unknown: UnknownKeyBehavior,
}

impl MapResolver {
    /// Creates an empty resolver with the default unknown-key behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver over an existing map.
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values,
            unknown: UnknownKeyBehavior::default(),
        }
    }

    /// Creates a resolver from a JSON document. See [`extend_json`](Self::extend_json).
    pub fn from_json(value: &Value) -> Self {
        let mut resolver = Self::new();
        resolver.extend_json(value);
        resolver
    }

    /// Sets the behavior for unknown keys.
    pub fn unknown_behavior(mut self, behavior: UnknownKeyBehavior) -> Self {
        self.unknown = behavior;
        self
    }

    /// Adds a variable, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a variable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Adds the variables of a JSON document, replacing existing keys.
    ///
    /// Objects and arrays are flattened into dotted keys: `{"user":
    /// {"name": "ada"}, "tags": ["x"]}` gives `user.name` and `tags.0`.
    /// Strings are taken verbatim, numbers and booleans as their JSON text,
    /// null as the empty string. A scalar at the root has no key and is
    /// ignored.
    pub fn extend_json(&mut self, value: &Value) {
        if matches!(value, Value::Object(_) | Value::Array(_)) {
            flatten_json("", value, &mut self.values);
        }
    }

    /// Looks up a variable without applying the unknown-key behavior.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of known variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Resolver for MapResolver {
    fn resolve(&mut self, key: &str) -> String {
        if let Some(value) = self.values.get(key) {
            return value.clone();
        }
        match &self.unknown {
            UnknownKeyBehavior::Passthrough => key.to_string(),
            UnknownKeyBehavior::Empty => String::new(),
            UnknownKeyBehavior::Indicate(marker) => format!("{}{}", marker, key),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for MapResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_map(values)
    }
}

fn flatten_json(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    let child = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                flatten_json(&child(key), inner, out);
            }
        }
        Value::Array(items) => {
            for (index, inner) in items.iter().enumerate() {
                flatten_json(&child(&index.to_string()), inner, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {
            out.insert(prefix.to_string(), String::new());
        }
        Value::Bool(_) | Value::Number(_) => {
            out.insert(prefix.to_string(), value.to_string());
        }
    }
}
