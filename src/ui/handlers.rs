//! Which subsystem reacts to which event, in registration order.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Scroll,
    Resize,
    Click,
    Intersection,
    KeyDown,
    Submit,
    Focus,
    Blur,
    BeforePrint,
    AfterPrint,
    Load,
    Error,
}

/// A subsystem reaction. Registered only when its subsystem mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    NavigationClick,
    NavigationKey,
    ScrollState,
    RevealDebounce,
    RevealIntersection,
    CounterIntersection,
    ContactSubmit,
    ScrollProgress,
    ThemeToggle,
    NotificationClose,
    SkipLinkFocus,
    SkipLinkBlur,
    LoadTiming,
    PrintStart,
    PrintEnd,
    LazyImage,
    ClipboardCopy,
    ErrorLog,
}

#[derive(Debug, Default)]
pub struct HandlerRegistry {
    entries: Vec<(EventKind, Handler)>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: EventKind, handler: Handler) {
        self.entries.push((kind, handler));
    }

    /// Handlers for `kind`, in the order they were registered.
    pub fn handlers_for(&self, kind: EventKind) -> Vec<Handler> {
        self.entries
            .iter()
            .filter(|(registered, _)| *registered == kind)
            .map(|(_, handler)| *handler)
            .collect()
    }

    pub fn is_registered(&self, handler: Handler) -> bool {
        self.entries.iter().any(|(_, registered)| *registered == handler)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_keep_registration_order_per_kind() {
        let mut registry = HandlerRegistry::new();
        registry.register(EventKind::Scroll, Handler::ScrollState);
        registry.register(EventKind::Click, Handler::ThemeToggle);
        registry.register(EventKind::Scroll, Handler::RevealDebounce);
        registry.register(EventKind::Scroll, Handler::ScrollProgress);

        assert_eq!(
            registry.handlers_for(EventKind::Scroll),
            vec![Handler::ScrollState, Handler::RevealDebounce, Handler::ScrollProgress]
        );
        assert!(registry.handlers_for(EventKind::Load).is_empty());
        assert!(registry.is_registered(Handler::ThemeToggle));
        assert!(!registry.is_registered(Handler::ClipboardCopy));
        assert_eq!(registry.len(), 4);
    }
}
