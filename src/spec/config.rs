//! Fieldset configuration: grid shape, clone bounds, and the JSON document
//! they are read from.
//!
//! JSON shape:
//! {
//!   "model": { "formName": "Contact", ... },
//!   "attributes": { "name": {}, "email": { "type": "input", "inputType": "email" } },
//!   "columns": 2,
//!   "columnSize": "md",
//!   "columnOptions": {}, "rowOptions": {},
//!   "options": { "tag": "div", "id": "contacts" },
//!   "minCloneRows": 1, "maxCloneRows": 5, "startRows": 1,
//!   "rowName": "contact-row", "rowGroupName": "contacts",
//!   "addButtonLabel": "Add", "removeButtonLabel": "Remove"
//! }

use crate::Result;
use crate::diagnostics;
use crate::markup::Attrs;
use crate::model::JsonModel;
use crate::spec::settings::{RawAttribute, RenderSettings};

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Total column units available to one grid row.
pub const GRID_WIDTH: usize = 12;

/// Device size used in generated column classes (`col-<size>-<width>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ColumnSize {
    #[serde(rename = "lg", alias = "large")]
    Large,
    #[serde(rename = "md", alias = "medium")]
    Medium,
    #[default]
    #[serde(rename = "sm", alias = "small")]
    Small,
    #[serde(rename = "xs", alias = "tiny")]
    Tiny,
}

impl ColumnSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnSize::Large => "lg",
            ColumnSize::Medium => "md",
            ColumnSize::Small => "sm",
            ColumnSize::Tiny => "xs",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Always at least 1.
    pub columns: usize,
    pub column_size: ColumnSize,
    /// Default column container attributes; per-attribute options are laid over these.
    pub column_options: Attrs,
    pub row_options: Attrs,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 1,
            column_size: ColumnSize::default(),
            column_options: Attrs::new(),
            row_options: Attrs::new(),
        }
    }
}

impl GridConfig {
    /// Any count below 1 means a single column.
    pub fn new(columns: i64) -> Self {
        Self {
            columns: usize::try_from(columns).ok().filter(|c| *c >= 1).unwrap_or(1),
            ..Self::default()
        }
    }

    pub fn with_column_size(mut self, size: ColumnSize) -> Self {
        self.column_size = size;
        self
    }

    pub fn with_column_options(mut self, options: Attrs) -> Self {
        self.column_options = options;
        self
    }

    pub fn with_row_options(mut self, options: Attrs) -> Self {
        self.row_options = options;
        self
    }
}

/// Grid units per column for `columns` columns, rounded down. Every column
/// gets this width, however full its row is.
pub fn column_width(columns: usize) -> usize {
    GRID_WIDTH / columns.max(1)
}

/// Read a `columns` value of any JSON type. Only integers >= 1 are honoured.
pub fn columns_from_value(value: &Value) -> usize {
    match value.as_i64() {
        Some(c) if c >= 1 => c as usize,
        _ => {
            diagnostics::warn(format!("columns value {} is not a positive integer, using 1", value));
            1
        }
    }
}

/// Bounds and labels read by the client-side clone script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneConfig {
    pub min_clone_rows: u32,
    /// 0 means unbounded.
    pub max_clone_rows: u32,
    pub start_rows: u32,
    /// Marker class put on every grid row.
    pub row_name: String,
    /// Group name stamped on default inputs as `data-groupname`.
    pub row_group_name: String,
    pub add_button_label: String,
    pub remove_button_label: String,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            min_clone_rows: 0,
            max_clone_rows: 0,
            start_rows: 1,
            row_name: String::new(),
            row_group_name: String::new(),
            add_button_label: "Add".to_string(),
            remove_button_label: "Remove".to_string(),
        }
    }
}

impl CloneConfig {
    pub fn effective_start_rows(&self) -> u32 {
        self.start_rows.max(self.min_clone_rows)
    }

    /// Copy with `start_rows` raised to `min_clone_rows` where needed.
    pub fn normalized(&self) -> Self {
        if self.max_clone_rows != 0 && self.max_clone_rows < self.min_clone_rows {
            diagnostics::warn(format!(
                "maxCloneRows ({}) is below minCloneRows ({})",
                self.max_clone_rows, self.min_clone_rows
            ));
        }
        if self.start_rows == 0 {
            diagnostics::warn("startRows is 0, no row will be shown initially");
        }
        Self {
            start_rows: self.effective_start_rows(),
            ..self.clone()
        }
    }
}

/// Everything a composer needs apart from the model.
#[derive(Debug, Clone, Default)]
pub struct FieldsetConfig {
    /// Insertion order decides grid placement.
    pub attributes: IndexMap<String, RenderSettings>,
    pub grid: GridConfig,
    pub clone: CloneConfig,
    /// Outer container attributes. `tag` picks the element, `id` the widget id.
    pub options: Attrs,
}

impl FieldsetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: &str, settings: RenderSettings) -> Self {
        self.attributes.insert(name.to_string(), settings);
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_clone(mut self, clone: CloneConfig) -> Self {
        self.clone = clone;
        self
    }

    pub fn with_options(mut self, options: Attrs) -> Self {
        self.options = options;
        self
    }
}

fn default_start_rows() -> u32 {
    1
}

fn default_add_label() -> String {
    "Add".to_string()
}

fn default_remove_label() -> String {
    "Remove".to_string()
}

/// The fieldset JSON document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsetSpec {
    #[serde(default)]
    pub model: Option<Value>,

    #[serde(default)]
    pub attributes: IndexMap<String, RawAttribute>,

    #[serde(default)]
    pub columns: Option<Value>,

    #[serde(default)]
    pub column_size: ColumnSize,

    #[serde(default)]
    pub column_options: Attrs,

    #[serde(default)]
    pub row_options: Attrs,

    #[serde(default)]
    pub options: Attrs,

    #[serde(default)]
    pub max_clone_rows: u32,

    #[serde(default)]
    pub min_clone_rows: u32,

    #[serde(default = "default_start_rows")]
    pub start_rows: u32,

    #[serde(default)]
    pub row_name: String,

    #[serde(default)]
    pub row_group_name: String,

    #[serde(default = "default_add_label")]
    pub add_button_label: String,

    #[serde(default = "default_remove_label")]
    pub remove_button_label: String,
}

/// A parsed document: configuration plus the model it carried, if any.
#[derive(Debug, Clone)]
pub struct ValidatedFieldset {
    pub config: FieldsetConfig,
    pub model: Option<JsonModel>,
}

impl FieldsetSpec {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .with_context(|| diagnostics::error_message("parse fieldset configuration"))
    }

    /// Resolve attribute types, normalize `columns`, and read the model.
    ///
    /// A missing model is not rejected here; the composer refuses to render
    /// without one.
    pub fn validate_and_build(self) -> Result<ValidatedFieldset> {
        let mut attributes = IndexMap::with_capacity(self.attributes.len());
        for (name, raw) in self.attributes {
            let settings = raw.into_settings(&name)?;
            attributes.insert(name, settings);
        }

        let columns = self.columns.as_ref().map(columns_from_value).unwrap_or(1);
        let grid = GridConfig {
            columns,
            column_size: self.column_size,
            column_options: self.column_options,
            row_options: self.row_options,
        };

        let clone = CloneConfig {
            min_clone_rows: self.min_clone_rows,
            max_clone_rows: self.max_clone_rows,
            start_rows: self.start_rows,
            row_name: self.row_name,
            row_group_name: self.row_group_name,
            add_button_label: self.add_button_label,
            remove_button_label: self.remove_button_label,
        };

        let model = match self.model {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value::<JsonModel>(value).with_context(|| {
                diagnostics::error_message("the 'model' property must be an object with a formName")
            })?),
        };

        Ok(ValidatedFieldset {
            config: FieldsetConfig {
                attributes,
                grid,
                clone,
                options: self.options,
            },
            model,
        })
    }
}
