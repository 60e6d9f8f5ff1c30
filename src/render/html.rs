//! Bundled HTML collaborators: a bound-input renderer in the form-group layout
//! and a standalone page wrapper for previews.

use crate::dispatch::{FormContext, InputRenderer};
use crate::markup::{Attrs, begin_tag, encode, end_tag, tag};
use crate::model::BindableModel;
use crate::render::assets::CLONE_ASSET_BUNDLE;
use crate::spec::FieldSettings;

use anyhow::bail;
use serde_json::Value;

/// Renders a model-bound field:
///
/// ```text
/// <div class="form-group field-contact-email required has-error">
/// <label class="control-label" for="contact-email">Email</label>
/// <input type="text" id="contact-email" class="form-control" name="Contact[email]" value="...">
/// <div class="help-block">first error</div>
/// </div>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlInputRenderer;

impl InputRenderer for HtmlInputRenderer {
    fn render_bound_input(
        &self,
        form: &FormContext,
        model: &dyn BindableModel,
        attribute: &str,
        settings: &FieldSettings,
    ) -> anyhow::Result<String> {
        let input_id = settings
            .options
            .get("id")
            .map(str::to_string)
            .unwrap_or_else(|| input_id(model.form_name(), attribute));
        let name = format!("{}[{}]", model.form_name(), attribute);
        let value = model.attribute_value(attribute);
        let label = model.attribute_label(attribute);

        let element_options = settings.options.clone().with("id", input_id.as_str());
        // Controls name the form they submit with, so a cloned row moved
        // outside the form element still posts to it.
        let control_options = element_options
            .clone()
            .with_default("name", name.as_str())
            .with_default("form", form.id.as_str());
        let form_control = control_options.clone().with_default("class", "form-control");

        let (control, show_label) = match settings.input_type.as_str() {
            "textInput" => (input("text", form_control, value.as_deref()), true),
            "passwordInput" => (input("password", form_control, None), true),
            "fileInput" => (input("file", control_options, None), true),
            "hiddenInput" => (input("hidden", control_options, value.as_deref()), false),
            "input" => {
                let kind = settings.extra_str("inputType").unwrap_or("text");
                (input(kind, form_control, value.as_deref()), true)
            }
            "textarea" => (
                tag("textarea", &encode(value.as_deref().unwrap_or("")), &form_control),
                true,
            ),
            "staticInput" => (
                tag(
                    "p",
                    &encode(value.as_deref().unwrap_or("")),
                    &element_options.with_class("form-control-static"),
                ),
                true,
            ),
            "checkbox" => (
                checkbox(&name, &form.id, control_options, value.as_deref(), &label),
                false,
            ),
            "dropdownList" => (dropdown(settings, form_control, value.as_deref())?, true),
            "widget" => {
                let Some(widget) = settings.extra_str("widgetClass") else {
                    bail!("attribute {:?}: widget input requires a widgetClass", attribute);
                };
                let options = form_control.with("data-widget", widget);
                (input("text", options, value.as_deref()), true)
            }
            other => bail!("attribute {:?}: unsupported input type {:?}", attribute, other),
        };

        let error = model.first_error(attribute);
        let mut wrapper = Attrs::new().with_class(&form.field_class);
        wrapper.add_class(&format!("field-{}", input_id));
        if model.is_attribute_required(attribute) {
            wrapper.add_class("required");
        }
        if error.is_some() {
            wrapper.add_class("has-error");
        }

        let mut out = begin_tag("div", &wrapper);
        out.push('\n');
        if show_label {
            let label_options = Attrs::new()
                .with("class", "control-label")
                .with("for", input_id.as_str());
            out.push_str(&tag("label", &encode(&label), &label_options));
            out.push('\n');
        }
        out.push_str(&control);
        out.push('\n');
        out.push_str(&tag(
            "div",
            &encode(error.as_deref().unwrap_or("")),
            &Attrs::new().with("class", "help-block"),
        ));
        out.push('\n');
        out.push_str(&end_tag("div"));
        Ok(out)
    }
}

/// `Contact` + `firstName` => `contact-firstname`.
fn input_id(form_name: &str, attribute: &str) -> String {
    format!("{}-{}", form_name, attribute)
        .to_lowercase()
        .replace(['[', ']', ' ', '.'], "-")
}

fn input(kind: &str, options: Attrs, value: Option<&str>) -> String {
    let mut options = options.with("type", kind);
    if let Some(value) = value {
        options = options.with_default("value", value);
    }
    tag("input", "", &options)
}

/// Unchecked boxes still submit `0` through the hidden twin input.
fn checkbox(name: &str, form_id: &str, options: Attrs, value: Option<&str>, label: &str) -> String {
    let hidden = input(
        "hidden",
        Attrs::new().with("name", name).with("form", form_id),
        Some("0"),
    );
    let mut options = options.with_default("value", "1");
    if value.is_some_and(|v| Some(v) == options.get("value")) {
        options.set("checked", "checked");
    }
    let boxed = input("checkbox", options, None);
    format!(
        "{}{}",
        hidden,
        tag("label", &format!("{} {}", boxed, encode(label)), &Attrs::new())
    )
}

/// `items` is either `{ "value": "label" }` or a list used as both.
fn dropdown(settings: &FieldSettings, options: Attrs, selected: Option<&str>) -> anyhow::Result<String> {
    let items: Vec<(String, String)> = match settings.extra.get("items") {
        None => Vec::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (k.clone(), scalar(v)))
            .collect(),
        Some(Value::Array(list)) => list.iter().map(|v| (scalar(v), scalar(v))).collect(),
        Some(other) => bail!("dropdownList items must be an object or a list, got {}", other),
    };

    let mut body = String::from("\n");
    if let Some(prompt) = settings.extra_str("prompt") {
        body.push_str(&tag("option", &encode(prompt), &Attrs::new().with("value", "")));
        body.push('\n');
    }
    for (value, label) in items {
        let mut option = Attrs::new().with("value", value.as_str());
        if selected == Some(value.as_str()) {
            option.set("selected", "selected");
        }
        body.push_str(&tag("option", &encode(&label), &option));
        body.push('\n');
    }
    Ok(tag("select", &body, &options))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Wrap a rendered fieldset in a standalone HTML document.
///
/// Like the other templates we avoid `format!()` and substitute markers,
/// so braces in inline script are left alone.
pub fn render_page(title: &str, form_id: &str, fieldset: &str, with_assets: bool) -> String {
    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@3.4.1/dist/css/bootstrap.min.css">
__ASSETS__</head>
<body>
<div class="container">
<form id="__FORM_ID__">
__FIELDSET__
</form>
</div>
</body>
</html>
"#;

    let assets = if with_assets {
        format!(
            "<link rel=\"stylesheet\" href=\"{0}.css\">\n<script src=\"{0}.js\"></script>\n",
            CLONE_ASSET_BUNDLE
        )
    } else {
        String::new()
    };

    TEMPLATE
        .replace("__TITLE__", &encode(title))
        .replace("__ASSETS__", &assets)
        .replace("__FORM_ID__", &encode(form_id))
        .replace("__FIELDSET__", fieldset)
}
