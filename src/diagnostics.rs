//! Message helpers shared by errors and warnings.

use std::fmt::Display;

/// Format an error message for display on stderr.
pub fn error_message(message: impl Display) -> String {
    format!("cloneform: {}", message)
}

/// Emit a warning for configuration that is accepted but probably not intended.
pub fn warn(message: impl Display) {
    log::warn!("cloneform: {}", message);
}
