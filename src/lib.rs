//! Grid-laid-out form fieldsets whose rows can be cloned in the browser.
//!
//! Attributes are partitioned onto a grid ([`layout`]), each one is rendered
//! through a raw, widget, or bound-input strategy ([`dispatch`]), and the
//! result is wrapped in row/column containers and an outer tag carrying the
//! clone bounds ([`render::GridFieldsetComposer`]).

pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod markup;
pub mod model;
pub mod render;
pub mod spec;

pub type Result<T> = anyhow::Result<T>;

pub use dispatch::{FormContext, InputRenderer};
pub use error::{ComposeError, ComposeResult};
pub use model::{BindableModel, JsonModel};
pub use render::{AssetRegistry, GridFieldsetComposer, HtmlInputRenderer};
pub use spec::{CloneConfig, FieldsetConfig, FieldsetSpec, GridConfig, RenderSettings};
