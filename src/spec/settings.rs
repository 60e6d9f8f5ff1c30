//! Per-attribute render settings.
//!
//! JSON shape (one entry of the `attributes` object):
//! {
//!   "type": "textInput",            // "raw", "widget", or any input type
//!   "value": "<hr>",                // required for "raw"
//!   "options": { "placeholder": "" },// input HTML attributes
//!   "columnOptions": { "class": "" },// overrides the fieldset-level columnOptions
//!   ...                             // anything else is handed to the input renderer
//! }

use crate::Result;
use crate::diagnostics;
use crate::markup::Attrs;
use crate::model::BindableModel;
use crate::render::GridFieldsetComposer;

use anyhow::bail;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub const INPUT_RAW: &str = "raw";
pub const INPUT_WIDGET: &str = "widget";
pub const INPUT_TEXT: &str = "textInput";

/// Produces raw markup for an attribute at render time.
///
/// Called with the model, the attribute's position in the attribute map, and
/// the composer doing the rendering.
pub type ValueGenerator = Arc<
    dyn Fn(&dyn BindableModel, usize, &GridFieldsetComposer<'_>) -> anyhow::Result<String>
        + Send
        + Sync,
>;

/// Where raw markup comes from.
#[derive(Clone)]
pub enum ValueSource {
    Literal(String),
    Computed(ValueGenerator),
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            ValueSource::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Settings handed to an input renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSettings {
    /// Input type discriminator, e.g. `textInput`, `dropdownList`, `widget`.
    pub input_type: String,

    /// HTML attributes for the input element.
    pub options: Attrs,

    /// Renderer-specific keys (`items`, `prompt`, `widgetClass`, ...).
    pub extra: IndexMap<String, Value>,
}

impl FieldSettings {
    pub fn new(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            options: Attrs::new(),
            extra: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, name: &str, value: impl Into<String>) -> Self {
        self.options.set(name, value);
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Which rendering strategy an attribute uses.
#[derive(Debug, Clone)]
pub enum InputSettings {
    /// Markup emitted verbatim, never escaped.
    Raw(ValueSource),
    /// Passed to the input renderer untouched.
    Widget(FieldSettings),
    /// Passed to the input renderer with clone hooks added to its options.
    Default(FieldSettings),
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub input: InputSettings,

    /// Column container attributes for this attribute only.
    pub column_options: Option<Attrs>,
}

impl RenderSettings {
    pub fn raw(value: impl Into<String>) -> Self {
        Self::from_input(InputSettings::Raw(ValueSource::Literal(value.into())))
    }

    pub fn computed<F>(generator: F) -> Self
    where
        F: Fn(&dyn BindableModel, usize, &GridFieldsetComposer<'_>) -> anyhow::Result<String>
            + Send
            + Sync
            + 'static,
    {
        Self::from_input(InputSettings::Raw(ValueSource::Computed(Arc::new(generator))))
    }

    pub fn widget(settings: FieldSettings) -> Self {
        Self::from_input(InputSettings::Widget(settings))
    }

    pub fn input(settings: FieldSettings) -> Self {
        Self::from_input(InputSettings::Default(settings))
    }

    pub fn text() -> Self {
        Self::input(FieldSettings::new(INPUT_TEXT))
    }

    pub fn with_column_options(mut self, options: Attrs) -> Self {
        self.column_options = Some(options);
        self
    }

    fn from_input(input: InputSettings) -> Self {
        Self {
            input,
            column_options: None,
        }
    }
}

/// Raw attribute entry as it appears in the fieldset JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttribute {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub value: Option<Value>,

    #[serde(default)]
    pub options: Attrs,

    #[serde(default)]
    pub column_options: Option<Attrs>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl RawAttribute {
    /// Resolve the `type` discriminator. Anything other than `raw` or `widget`
    /// is an ordinary bound input and keeps its type for the renderer.
    pub fn into_settings(self, attribute: &str) -> Result<RenderSettings> {
        let RawAttribute {
            kind,
            value,
            options,
            column_options,
            mut extra,
        } = self;

        let input = match kind.as_deref() {
            Some(INPUT_RAW) => match value {
                Some(Value::String(markup)) => InputSettings::Raw(ValueSource::Literal(markup)),
                Some(_) => bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "attribute {:?}: raw value must be a string",
                        attribute
                    ))
                ),
                None => bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "attribute {:?}: raw input requires a value",
                        attribute
                    ))
                ),
            },
            other => {
                if let Some(value) = value {
                    extra.insert("value".to_string(), value);
                }
                let settings = FieldSettings {
                    input_type: other.unwrap_or(INPUT_TEXT).to_string(),
                    options,
                    extra,
                };
                if settings.input_type == INPUT_WIDGET {
                    InputSettings::Widget(settings)
                } else {
                    InputSettings::Default(settings)
                }
            }
        };

        Ok(RenderSettings {
            input,
            column_options,
        })
    }
}
