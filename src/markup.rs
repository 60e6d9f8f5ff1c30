//! Pure tag building: attribute maps, CSS class handling, and serialization.
//!
//! Nothing here keeps state between calls. Every helper takes plain data and
//! returns a new string or a new attribute map.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Attributes serialized first, in this order. The rest keep insertion order.
const ATTRIBUTE_ORDER: &[&str] = &[
    "type", "id", "class", "name", "value", "href", "src", "srcset", "for", "title", "alt",
    "role", "style",
];

/// Elements that never get a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Ordered HTML attribute map.
///
/// Read from JSON, scalar values are stringified, `true` becomes a boolean
/// attribute (`disabled="disabled"`), `false` and `null` drop the attribute,
/// lists are joined with spaces (`"class": ["a", "b"]`), and an object
/// expands into prefixed attributes (`"data": {"id": 1}` => `data-id="1"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attrs(IndexMap<String, String>);

impl<'de> Deserialize<'de> for Attrs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut attrs = Attrs::new();
        for (name, value) in raw {
            match value {
                Value::Object(nested) => {
                    for (key, value) in nested {
                        let prefixed = format!("{}-{}", name, key);
                        attrs.set_json(&prefixed, value).map_err(D::Error::custom)?;
                    }
                }
                Value::Array(items) => {
                    let mut parts = Vec::with_capacity(items.len());
                    for item in items {
                        match scalar_text(&item) {
                            Some(text) => parts.push(text),
                            None => {
                                return Err(D::Error::custom(format!(
                                    "attribute {:?}: list items must be scalars, got {}",
                                    name, item
                                )));
                            }
                        }
                    }
                    attrs.set(name, parts.join(" "));
                }
                scalar => attrs.set_json(&name, scalar).map_err(D::Error::custom)?,
            }
        }
        Ok(attrs)
    }
}

/// Text of a string or number; `None` for anything else.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set an attribute. An existing key keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Only sets the attribute when it is not already present.
    pub fn with_default(mut self, name: &str, value: impl Into<String>) -> Self {
        if !self.contains(name) {
            self.set(name, value);
        }
        self
    }

    /// Set an attribute from a scalar JSON value.
    fn set_json(&mut self, name: &str, value: Value) -> Result<(), String> {
        match value {
            Value::Null | Value::Bool(false) => {}
            Value::Bool(true) => self.set(name, name),
            other => match scalar_text(&other) {
                Some(text) => self.set(name, text),
                None => return Err(format!("attribute {:?}: unsupported value {}", name, other)),
            },
        }
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|existing| existing.split_whitespace().any(|c| c == class))
    }

    /// Append `class` to the `class` attribute unless it is empty or already there.
    pub fn add_class(&mut self, class: &str) {
        let class = class.trim();
        if class.is_empty() {
            return;
        }
        let mut classes: Vec<&str> = self
            .get("class")
            .map(|existing| existing.split_whitespace().collect())
            .unwrap_or_default();
        for c in class.split_whitespace() {
            if !classes.contains(&c) {
                classes.push(c);
            }
        }
        let joined = classes.join(" ");
        self.set("class", joined);
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Returns a new map holding `self` overlaid with `overrides`.
    /// Keys present in both take the value from `overrides`.
    pub fn merged(&self, overrides: &Attrs) -> Attrs {
        let mut out = self.clone();
        for (k, v) in overrides.iter() {
            out.set(k, v);
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// HTML-encode text for use in element content or attribute values.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize attributes as ` name="value"` pairs.
pub fn render_attrs(attrs: &Attrs) -> String {
    let mut out = String::new();
    for name in ATTRIBUTE_ORDER {
        if let Some(value) = attrs.get(name) {
            push_attr(&mut out, name, value);
        }
    }
    for (name, value) in attrs.iter() {
        if !ATTRIBUTE_ORDER.contains(&name) {
            push_attr(&mut out, name, value);
        }
    }
    out
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode(value));
    out.push('"');
}

pub fn begin_tag(name: &str, attrs: &Attrs) -> String {
    format!("<{}{}>", name, render_attrs(attrs))
}

pub fn end_tag(name: &str) -> String {
    format!("</{}>", name)
}

/// A complete element. `content` is inserted as-is; void elements ignore it.
pub fn tag(name: &str, content: &str, attrs: &Attrs) -> String {
    if VOID_ELEMENTS.contains(&name) {
        return begin_tag(name, attrs);
    }
    format!("{}{}{}", begin_tag(name, attrs), content, end_tag(name))
}
