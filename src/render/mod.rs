//! Rendering: the fieldset composer and the bundled HTML collaborators.

pub mod assets;
pub mod fieldset;
pub mod html;

pub use assets::{AssetRegistry, CLONE_ASSET_BUNDLE, NoopAssets, RecordingAssets};
pub use fieldset::GridFieldsetComposer;
pub use html::{HtmlInputRenderer, render_page};
