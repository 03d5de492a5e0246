use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::storage::StorageError;

/// Errors raised while mounting or running page subsystems.
///
/// None of these escape the [`Page`](crate::ui::app::Page) runtime: each one is
/// recovered at the subsystem boundary (logged, defaulted, or turned into an
/// error notification).
#[derive(Debug, Error)]
pub enum FolioError {
    /// The preference store could not be read or written.
    #[error("preference storage unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),

    /// An anchor element a subsystem needs at mount time is absent.
    #[error("{subsystem}: required element '{target}' not found")]
    TargetNotFound {
        subsystem: &'static str,
        target: String,
    },

    /// A counter's text is not a number, so it cannot be animated.
    #[error("counter '{element}' has non-numeric target '{text}'")]
    InvalidNumericTarget { element: String, text: String },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl FolioError {
    pub fn not_found(subsystem: &'static str, target: impl Into<String>) -> Self {
        Self::TargetNotFound {
            subsystem,
            target: target.into(),
        }
    }
}
