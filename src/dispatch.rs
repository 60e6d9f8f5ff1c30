//! Input dispatcher: pick the rendering strategy for one attribute.

use crate::error::ComposeResult;
use crate::model::BindableModel;
use crate::render::GridFieldsetComposer;
use crate::spec::{FieldSettings, InputSettings, RenderSettings, ValueSource};

/// The form an input is rendered into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormContext {
    pub id: String,
    /// Class of the wrapper each bound field is rendered in.
    pub field_class: String,
}

impl Default for FormContext {
    fn default() -> Self {
        Self {
            id: "w0".to_string(),
            field_class: "form-group".to_string(),
        }
    }
}

impl FormContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Renders a model-bound input. Settings always carry an input type.
///
/// Errors are passed through to the caller of the fieldset render untouched.
pub trait InputRenderer {
    fn render_bound_input(
        &self,
        form: &FormContext,
        model: &dyn BindableModel,
        attribute: &str,
        settings: &FieldSettings,
    ) -> anyhow::Result<String>;
}

/// Produce the markup for one attribute.
///
/// - raw: the literal, or the generator's output, verbatim (no escaping)
/// - widget: the renderer, with settings as given
/// - anything else: the renderer, with `data-attribute` and `data-groupname`
///   added to the input options so the clone script can re-index the field
pub fn dispatch(
    composer: &GridFieldsetComposer<'_>,
    form: &FormContext,
    renderer: &dyn InputRenderer,
    attribute: &str,
    settings: &RenderSettings,
    index: usize,
) -> ComposeResult<String> {
    let model = composer.model();
    match &settings.input {
        InputSettings::Raw(ValueSource::Literal(markup)) => Ok(markup.clone()),
        InputSettings::Raw(ValueSource::Computed(generator)) => {
            log::debug!("generating raw markup for {} at index {}", attribute, index);
            Ok(generator(model, index, composer)?)
        }
        InputSettings::Widget(field) => {
            Ok(renderer.render_bound_input(form, model, attribute, field)?)
        }
        InputSettings::Default(field) => {
            let hooked = with_clone_hooks(field, attribute, &composer.clone_config().row_group_name);
            Ok(renderer.render_bound_input(form, model, attribute, &hooked)?)
        }
    }
}

/// Copy of `field` whose options identify the attribute and its row group.
pub fn with_clone_hooks(field: &FieldSettings, attribute: &str, group_name: &str) -> FieldSettings {
    let mut hooked = field.clone();
    hooked.options.set("data-attribute", attribute);
    hooked.options.set("data-groupname", group_name);
    hooked
}
