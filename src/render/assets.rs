/// Name of the client bundle holding the clone/remove script and its styles.
pub const CLONE_ASSET_BUNDLE: &str = "cloneform";

/// Hosting page hook for the client-side clone assets.
pub trait AssetRegistry {
    /// Called once per fieldset render.
    fn register_clone_assets(&mut self);
}

/// Ignores registrations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAssets;

impl AssetRegistry for NoopAssets {
    fn register_clone_assets(&mut self) {}
}

/// Counts registrations so a page can decide whether to link the bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingAssets {
    pub registrations: usize,
}

impl RecordingAssets {
    pub fn is_registered(&self) -> bool {
        self.registrations > 0
    }
}

impl AssetRegistry for RecordingAssets {
    fn register_clone_assets(&mut self) {
        self.registrations += 1;
        log::debug!("registered asset bundle {}", CLONE_ASSET_BUNDLE);
    }
}
