//! Spec layer: JSON configuration shapes + validated in-memory structures.
//!
//! This module is intentionally separate from layout and rendering.
//! It owns:
//! - per-attribute render settings (raw / widget / bound input)
//! - grid and clone configuration, and the fieldset document they come from

pub mod config;
pub mod settings;

pub use config::{
    CloneConfig, ColumnSize, FieldsetConfig, FieldsetSpec, GRID_WIDTH, GridConfig,
    ValidatedFieldset, column_width,
};
pub use settings::{
    FieldSettings, INPUT_RAW, INPUT_TEXT, INPUT_WIDGET, InputSettings, RawAttribute,
    RenderSettings, ValueGenerator, ValueSource,
};
