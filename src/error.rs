use thiserror::Error;

/// Failures surfaced by a fieldset render.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// The fieldset cannot be built from its configuration; nothing was rendered.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An input renderer or a raw value generator failed. Passed through as-is.
    #[error(transparent)]
    Delegation(#[from] anyhow::Error),
}

pub type ComposeResult<T> = std::result::Result<T, ComposeError>;
