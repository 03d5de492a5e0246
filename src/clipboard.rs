//! Clipboard access for copying contact details.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to set clipboard text: {0}")]
    Write(String),
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard, opened lazily on first use.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a successful write has opened the platform clipboard.
    pub fn is_open(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl ClipboardError {
    fn open(err: arboard::Error) -> Self {
        Self::Unavailable(err.to_string())
    }

    fn write(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ClipboardNotSupported | arboard::Error::ClipboardOccupied => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Write(other.to_string()),
        }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(ClipboardError::open)?,
        };
        self.clipboard
            .insert(clipboard)
            .set_text(text.to_string())
            .map_err(ClipboardError::write)
    }
}

/// In-memory clipboard. Clones share contents; `failing` never accepts text.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
    failing: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.failing {
            return Err(ClipboardError::Unavailable("clipboard access denied".into()));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Write through `primary`, falling back to `fallback` when it is absent or
/// fails. The error is the fallback's.
pub fn copy_with_fallback(
    primary: Option<&mut (dyn Clipboard + 'static)>,
    fallback: &mut dyn Clipboard,
    text: &str,
) -> Result<(), ClipboardError> {
    if let Some(primary) = primary {
        match primary.write_text(text) {
            Ok(()) => return Ok(()),
            Err(err) => debug!(error = %err, "Primary clipboard failed, trying fallback"),
        }
    }
    fallback.write_text(text)
}

/// Text worth copying from a contact item: an address or a phone number.
pub fn is_copyable(text: &str) -> bool {
    text.contains('@') || text.contains('+')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_wins_when_it_works() {
        let mut primary = MemoryClipboard::new();
        let mut fallback = MemoryClipboard::new();
        copy_with_fallback(Some(&mut primary), &mut fallback, "a@b.c").unwrap();
        assert_eq!(primary.contents().as_deref(), Some("a@b.c"));
        assert_eq!(fallback.contents(), None);
    }

    #[test]
    fn falls_back_on_failure_or_absence() {
        let mut primary = MemoryClipboard::failing();
        let mut fallback = MemoryClipboard::new();
        copy_with_fallback(Some(&mut primary), &mut fallback, "x").unwrap();
        assert_eq!(fallback.contents().as_deref(), Some("x"));

        let mut fallback = MemoryClipboard::new();
        copy_with_fallback(None, &mut fallback, "y").unwrap();
        assert_eq!(fallback.contents().as_deref(), Some("y"));
    }

    #[test]
    fn both_failing_reports_error() {
        let mut primary = MemoryClipboard::failing();
        let mut fallback = MemoryClipboard::failing();
        assert!(copy_with_fallback(Some(&mut primary), &mut fallback, "z").is_err());
    }

    #[test]
    fn system_clipboard_opens_lazily() {
        assert!(!SystemClipboard::new().is_open());
    }

    #[test]
    fn arboard_errors_map_to_clipboard_errors() {
        let err = ClipboardError::open(arboard::Error::ClipboardNotSupported);
        assert!(matches!(err, ClipboardError::Unavailable(_)));

        let err = ClipboardError::write(arboard::Error::ClipboardOccupied);
        assert!(matches!(err, ClipboardError::Unavailable(_)));

        let err = ClipboardError::write(arboard::Error::ConversionFailure);
        assert!(matches!(err, ClipboardError::Write(_)));
        assert!(err.to_string().starts_with("failed to set clipboard text"));
    }

    #[test]
    fn copyable_text() {
        assert!(is_copyable("me@example.com"));
        assert!(is_copyable("+1 555 0100"));
        assert!(!is_copyable("Berlin, Germany"));
    }
}
