//! The data-holding model whose attributes a fieldset renders.
//!
//! The composer only reads from a model. Values, labels, and validation state
//! belong to whoever owns it.

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_\-.]+").expect("static regex"));

/// A model that bound inputs can be rendered for.
pub trait BindableModel {
    /// Prefix used for input names, e.g. `Contact` in `Contact[email]`.
    fn form_name(&self) -> &str;

    fn attribute_value(&self, attribute: &str) -> Option<String>;

    fn attribute_label(&self, attribute: &str) -> String {
        humanize(attribute)
    }

    fn first_error(&self, _attribute: &str) -> Option<String> {
        None
    }

    fn is_attribute_required(&self, _attribute: &str) -> bool {
        false
    }
}

/// Turn `firstName` / `first_name` into `First Name`.
pub fn humanize(attribute: &str) -> String {
    let spaced = CAMEL_BOUNDARY.replace_all(attribute, "$1 $2");
    SEPARATORS
        .split(spaced.trim())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Model backed by plain data, as read from a fieldset JSON file.
///
/// JSON shape:
/// {
///   "formName": "Contact",
///   "values": { "email": "a@b.c" },
///   "labels": { "email": "E-mail" },
///   "errors": { "email": ["E-mail is invalid."] },
///   "required": ["email"]
/// }
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonModel {
    #[serde(default)]
    pub form_name: String,

    #[serde(default)]
    pub values: IndexMap<String, serde_json::Value>,

    #[serde(default)]
    pub labels: IndexMap<String, String>,

    #[serde(default)]
    pub errors: IndexMap<String, Vec<String>>,

    #[serde(default)]
    pub required: Vec<String>,
}

impl JsonModel {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, attribute: &str, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(attribute.to_string(), value.into());
        self
    }

    pub fn with_error(mut self, attribute: &str, message: &str) -> Self {
        self.errors
            .entry(attribute.to_string())
            .or_default()
            .push(message.to_string());
        self
    }
}

impl BindableModel for JsonModel {
    fn form_name(&self) -> &str {
        &self.form_name
    }

    fn attribute_value(&self, attribute: &str) -> Option<String> {
        match self.values.get(attribute)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            other => Some(other.to_string()),
        }
    }

    fn attribute_label(&self, attribute: &str) -> String {
        self.labels
            .get(attribute)
            .cloned()
            .unwrap_or_else(|| humanize(attribute))
    }

    fn first_error(&self, attribute: &str) -> Option<String> {
        self.errors.get(attribute)?.first().cloned()
    }

    fn is_attribute_required(&self, attribute: &str) -> bool {
        self.required.iter().any(|r| r == attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_splits_camel_case_and_separators() {
        assert_eq!(humanize("firstName"), "First Name");
        assert_eq!(humanize("street_address-line2"), "Street Address Line2");
        assert_eq!(humanize("email"), "Email");
    }

    #[test]
    fn json_model_reads_values_labels_and_errors() {
        let model: JsonModel = serde_json::from_str(
            r#"{
                "formName": "Contact",
                "values": { "email": "a@b.c", "age": 41, "subscribed": true, "nick": null },
                "labels": { "email": "E-mail" },
                "errors": { "email": ["Taken.", "Too short."] },
                "required": ["email"]
            }"#,
        )
        .unwrap();

        assert_eq!(model.form_name(), "Contact");
        assert_eq!(model.attribute_value("email").as_deref(), Some("a@b.c"));
        assert_eq!(model.attribute_value("age").as_deref(), Some("41"));
        assert_eq!(model.attribute_value("subscribed").as_deref(), Some("1"));
        assert_eq!(model.attribute_value("nick"), None);
        assert_eq!(model.attribute_label("email"), "E-mail");
        assert_eq!(model.attribute_label("phoneNumber"), "Phone Number");
        assert_eq!(model.first_error("email").as_deref(), Some("Taken."));
        assert!(model.is_attribute_required("email"));
        assert!(!model.is_attribute_required("age"));
    }
}
