//! Container decorator and fieldset assembler.
//!
//! Output shape in grid mode (one block per row):
//!
//! ```text
//! <fieldset id="clonnable-field-widget-w0" class="clonnable-field-widget" data-...>
//! <div class="row ROW_NAME">
//! 	<div class="col-sm-6">
//! 		INPUT
//! 	</div>
//! </div>
//! </fieldset>
//! ```
//!
//! The clone script finds row templates by position inside the outer
//! container, so the open/close order must not change. In single-column mode
//! the dispatched inputs are concatenated without row or column wrappers.

use crate::dispatch::{FormContext, InputRenderer, dispatch};
use crate::error::{ComposeError, ComposeResult};
use crate::layout::{self, Row};
use crate::markup::{Attrs, begin_tag, end_tag};
use crate::model::BindableModel;
use crate::render::assets::AssetRegistry;
use crate::spec::{CloneConfig, FieldsetConfig, GridConfig, RenderSettings};

use indexmap::IndexMap;

pub const DEFAULT_TAG: &str = "fieldset";
pub const DEFAULT_WIDGET_ID: &str = "w0";
pub const WIDGET_ID_PREFIX: &str = "clonnable-field-widget-";
pub const WIDGET_CSS_CLASS: &str = "clonnable-field-widget";

/// Renders one clonable fieldset for a model.
///
/// Built fresh for every render and never mutated afterwards; the model is
/// only read.
pub struct GridFieldsetComposer<'a> {
    model: &'a dyn BindableModel,
    attributes: IndexMap<String, RenderSettings>,
    grid: GridConfig,
    clone: CloneConfig,
    tag: String,
    widget_id: String,
    container_options: Attrs,
}

impl<'a> GridFieldsetComposer<'a> {
    /// Fails when there is no model, or the model has no form name to bind
    /// inputs with.
    pub fn new(
        config: FieldsetConfig,
        model: Option<&'a dyn BindableModel>,
    ) -> ComposeResult<Self> {
        let Some(model) = model else {
            return Err(ComposeError::Configuration(
                "the 'model' property must be set".to_string(),
            ));
        };
        if model.form_name().trim().is_empty() {
            return Err(ComposeError::Configuration(
                "the 'model' property must be a bindable model with a form name".to_string(),
            ));
        }

        let FieldsetConfig {
            attributes,
            grid,
            clone,
            mut options,
        } = config;
        let clone = clone.normalized();

        let tag = options
            .remove("tag")
            .unwrap_or_else(|| DEFAULT_TAG.to_string());
        let widget_id = format!(
            "{}{}",
            WIDGET_ID_PREFIX,
            options
                .remove("id")
                .unwrap_or_else(|| DEFAULT_WIDGET_ID.to_string())
        );
        let container_options = container_options(options, &widget_id, &clone);

        Ok(Self {
            model,
            attributes,
            grid,
            clone,
            tag,
            widget_id,
            container_options,
        })
    }

    pub fn model(&self) -> &'a dyn BindableModel {
        self.model
    }

    pub fn attributes(&self) -> &IndexMap<String, RenderSettings> {
        &self.attributes
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Clone settings with `start_rows` already raised to `min_clone_rows`.
    pub fn clone_config(&self) -> &CloneConfig {
        &self.clone
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    pub fn container_options(&self) -> &Attrs {
        &self.container_options
    }

    /// The grid this fieldset lays its attributes out on.
    pub fn rows(&self) -> Vec<Row<'_>> {
        layout::partition(&self.attributes, self.grid.columns)
    }

    /// Render the whole fieldset: outer tag, rows, closing tag.
    ///
    /// Either the complete fragment is returned or the first renderer or
    /// generator error is.
    pub fn render(
        &self,
        form: &FormContext,
        renderer: &dyn InputRenderer,
        assets: &mut dyn AssetRegistry,
    ) -> ComposeResult<String> {
        // 1) Register client assets. Happens before any input is dispatched,
        //    so a failed render has still asked for them once.
        assets.register_clone_assets();

        // 2) Rows and columns.
        let body = self.render_fieldset(form, renderer)?;

        // 3) Outer container.
        let mut out = begin_tag(&self.tag, &self.container_options);
        out.push_str(&body);
        out.push_str(&end_tag(&self.tag));
        Ok(out)
    }

    fn render_fieldset(
        &self,
        form: &FormContext,
        renderer: &dyn InputRenderer,
    ) -> ComposeResult<String> {
        let rows = self.rows();
        let mut content = String::new();

        if self.grid.columns <= 1 {
            for cell in rows.iter().flatten() {
                content.push_str(&dispatch(
                    self,
                    form,
                    renderer,
                    cell.name,
                    cell.settings,
                    cell.index,
                )?);
            }
            return Ok(content);
        }

        let row_options = layout::row_options(&self.grid, &self.clone);
        for row in &rows {
            content.push_str(&begin_tag("div", &row_options));
            content.push('\n');
            for cell in row {
                let column_options = layout::column_options(&self.grid, cell);
                let input = dispatch(self, form, renderer, cell.name, cell.settings, cell.index)?;

                content.push('\t');
                content.push_str(&begin_tag("div", &column_options));
                content.push('\n');
                content.push_str("\t\t");
                content.push_str(&input);
                content.push('\n');
                content.push('\t');
                content.push_str(&end_tag("div"));
                content.push('\n');
            }
            content.push_str(&end_tag("div"));
        }
        Ok(content)
    }
}

/// Outer container attributes: widget id, marker class, and the clone bounds
/// the client script reads.
fn container_options(options: Attrs, widget_id: &str, clone: &CloneConfig) -> Attrs {
    options
        .with("id", widget_id)
        .with_class(WIDGET_CSS_CLASS)
        .with("data-min-rows", clone.min_clone_rows.to_string())
        .with("data-max-rows", clone.max_clone_rows.to_string())
        .with("data-start-rows", clone.start_rows.to_string())
        .with("data-row-name", clone.row_name.as_str())
        .with("data-group-name", clone.row_group_name.as_str())
        .with("data-add-label", clone.add_button_label.as_str())
        .with("data-remove-label", clone.remove_button_label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JsonModel;
    use crate::render::assets::RecordingAssets;
    use crate::spec::{ColumnSize, FieldSettings};
    use pretty_assertions::assert_eq;

    /// Renders `<in name>` so layout is easy to read in assertions.
    struct Stub;

    impl InputRenderer for Stub {
        fn render_bound_input(
            &self,
            _form: &FormContext,
            _model: &dyn BindableModel,
            attribute: &str,
            settings: &FieldSettings,
        ) -> anyhow::Result<String> {
            Ok(format!(
                "<in {} {}>",
                attribute,
                settings.options.get("data-attribute").unwrap_or("-")
            ))
        }
    }

    fn two_column_config() -> FieldsetConfig {
        FieldsetConfig::new()
            .attribute("name", RenderSettings::text())
            .attribute("email", RenderSettings::text())
            .attribute("sep", RenderSettings::raw("<hr>"))
            .with_grid(GridConfig::new(2).with_column_size(ColumnSize::Medium))
            .with_clone(CloneConfig {
                row_name: "contact-row".to_string(),
                row_group_name: "contacts".to_string(),
                ..CloneConfig::default()
            })
    }

    #[test]
    fn missing_model_is_a_configuration_error() {
        let err = GridFieldsetComposer::new(two_column_config(), None)
            .err()
            .unwrap();
        assert!(matches!(err, ComposeError::Configuration(_)));

        let nameless = JsonModel::default();
        let err = GridFieldsetComposer::new(two_column_config(), Some(&nameless))
            .err()
            .unwrap();
        assert!(matches!(err, ComposeError::Configuration(_)));
    }

    #[test]
    fn grid_markup_nests_rows_columns_inputs() {
        let model = JsonModel::new("Contact");
        let composer = GridFieldsetComposer::new(two_column_config(), Some(&model)).unwrap();
        let mut assets = RecordingAssets::default();
        let html = composer
            .render(&FormContext::default(), &Stub, &mut assets)
            .unwrap();

        let expected = concat!(
            r#"<fieldset id="clonnable-field-widget-w0" class="clonnable-field-widget" data-min-rows="0" data-max-rows="0" data-start-rows="1" data-row-name="contact-row" data-group-name="contacts" data-add-label="Add" data-remove-label="Remove">"#,
            "<div class=\"row contact-row\">\n",
            "\t<div class=\"col-md-6\">\n",
            "\t\t<in name name>\n",
            "\t</div>\n",
            "\t<div class=\"col-md-6\">\n",
            "\t\t<in email email>\n",
            "\t</div>\n",
            "</div>",
            "<div class=\"row contact-row\">\n",
            "\t<div class=\"col-md-6\">\n",
            "\t\t<hr>\n",
            "\t</div>\n",
            "</div>",
            "</fieldset>",
        );
        assert_eq!(html, expected);
        assert_eq!(assets.registrations, 1);
    }

    #[test]
    fn single_column_concatenates_inputs() {
        let model = JsonModel::new("Contact");
        let config = FieldsetConfig::new()
            .attribute("name", RenderSettings::text())
            .attribute("sep", RenderSettings::raw("<hr>"))
            .with_options(Attrs::new().with("tag", "div").with("id", "contacts"));
        let composer = GridFieldsetComposer::new(config, Some(&model)).unwrap();
        let html = composer
            .render(&FormContext::default(), &Stub, &mut RecordingAssets::default())
            .unwrap();

        assert!(html.starts_with(r#"<div id="clonnable-field-widget-contacts" class="clonnable-field-widget""#));
        assert!(html.ends_with("><in name name><hr></div>"));
        assert!(!html.contains("class=\"row"));
        assert!(!composer.container_options().contains("tag"));
    }

    #[test]
    fn start_rows_surface_after_min_clone_rows() {
        let model = JsonModel::new("Contact");
        let config = two_column_config().with_clone(CloneConfig {
            min_clone_rows: 3,
            start_rows: 1,
            max_clone_rows: 6,
            ..CloneConfig::default()
        });
        let composer = GridFieldsetComposer::new(config, Some(&model)).unwrap();
        assert_eq!(composer.clone_config().start_rows, 3);
        assert_eq!(composer.container_options().get("data-start-rows"), Some("3"));
        assert_eq!(composer.container_options().get("data-max-rows"), Some("6"));
    }

    #[test]
    fn generator_index_ignores_grid_position() {
        let model = JsonModel::new("Contact");
        let config = FieldsetConfig::new()
            .attribute("a", RenderSettings::text())
            .attribute("b", RenderSettings::text())
            .attribute("c", RenderSettings::text())
            .attribute(
                "d",
                RenderSettings::computed(|_, index, composer| {
                    Ok(format!("[{} of {}]", index, composer.attributes().len()))
                }),
            )
            .with_grid(GridConfig::new(3));
        let composer = GridFieldsetComposer::new(config, Some(&model)).unwrap();
        let html = composer
            .render(&FormContext::default(), &Stub, &mut RecordingAssets::default())
            .unwrap();
        assert!(html.contains("\t\t[3 of 4]\n"));
        assert!(html.contains("col-sm-4"));
    }

    #[test]
    fn generator_error_aborts_the_render() {
        let model = JsonModel::new("Contact");
        let config = FieldsetConfig::new()
            .attribute("a", RenderSettings::text())
            .attribute(
                "b",
                RenderSettings::computed(|_, _, _| Err(anyhow::anyhow!("generator failed"))),
            );
        let composer = GridFieldsetComposer::new(config, Some(&model)).unwrap();
        let err = composer
            .render(&FormContext::default(), &Stub, &mut RecordingAssets::default())
            .unwrap_err();
        assert!(matches!(err, ComposeError::Delegation(_)));
        assert_eq!(err.to_string(), "generator failed");
    }
}
