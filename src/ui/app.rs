use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clipboard::{copy_with_fallback, is_copyable, Clipboard, MemoryClipboard};
use crate::config::Config;
use crate::dom;
use crate::error::FolioError;
use crate::mail::{MailComposer, Outbox};
use crate::scheduler::{Scheduler, TimerId};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::surface::Surface;
use crate::ui::contact::{ContactForm, SubmitOutcome, PREPARED};
use crate::ui::counter::CounterBoard;
use crate::ui::events::{EventSource, PageEvent};
use crate::ui::extras::{self, LazyImages, SkipLink};
use crate::ui::handlers::{EventKind, Handler, HandlerRegistry};
use crate::ui::navigation::Navigation;
use crate::ui::notification::{Notification, NotificationCenter, NotificationKind, NotificationState};
use crate::ui::reveal::RevealEngine;
use crate::ui::scroll::{ScrollState, ScrollTracker};
use crate::ui::task::Task;
use crate::ui::theme::{Theme, ThemeStore};
use crate::ui::typing::TypingEffect;
use crate::ui::Ctx;

/// Borrow what subsystems may touch, leaving the rest of the page free.
macro_rules! page_cx {
    ($self:expr) => {
        Ctx::new(&mut $self.surface, &mut $self.scheduler, &$self.config)
    };
}

/// Unwrap a mount result, logging why a subsystem stays off.
fn mounted<T>(subsystem: &str, result: Result<T, FolioError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(subsystem, error = %err, "Subsystem not mounted");
            None
        }
    }
}

/// Serialisable summary of the page state.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub now_ms: u128,
    pub theme: Option<Theme>,
    pub scroll: ScrollState,
    pub menu_open: bool,
    pub revealed: Vec<String>,
    pub notification: Option<Notification>,
    pub pending_timers: usize,
    pub handlers: usize,
}

/// A mounted portfolio page: every subsystem, the timer queue and the event
/// routing between them.
pub struct Page<S: Surface> {
    config: Config,
    surface: S,
    scheduler: Scheduler<Task>,
    store: Box<dyn KeyValueStore>,
    clipboard: Option<Box<dyn Clipboard>>,
    fallback_clipboard: Box<dyn Clipboard>,
    mail: Box<dyn MailComposer>,
    handlers: HandlerRegistry,
    theme: Option<ThemeStore>,
    scroll: ScrollTracker,
    reveal: RevealEngine,
    counters: Option<CounterBoard>,
    notifications: NotificationCenter,
    navigation: Option<Navigation>,
    typing: Option<TypingEffect>,
    contact: Option<ContactForm>,
    skip_link: Option<SkipLink>,
    lazy_images: LazyImages,
    mounted: bool,
}

impl<S: Surface> Page<S> {
    /// Unmounted page with in-memory collaborators.
    pub fn new(surface: S, config: Config) -> Self {
        let scroll = ScrollTracker::new(&config.scroll);
        Self {
            config,
            surface,
            scheduler: Scheduler::new(),
            store: Box::new(MemoryStore::new()),
            clipboard: None,
            fallback_clipboard: Box::new(MemoryClipboard::new()),
            mail: Box::new(Outbox::new()),
            handlers: HandlerRegistry::new(),
            theme: None,
            scroll,
            reveal: RevealEngine::default(),
            counters: None,
            notifications: NotificationCenter::new(),
            navigation: None,
            typing: None,
            contact: None,
            skip_link: None,
            lazy_images: LazyImages::default(),
            mounted: false,
        }
    }

    pub fn with_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_clipboards(
        mut self,
        primary: Option<Box<dyn Clipboard>>,
        fallback: Box<dyn Clipboard>,
    ) -> Self {
        self.clipboard = primary;
        self.fallback_clipboard = fallback;
        self
    }

    pub fn with_mail(mut self, mail: Box<dyn MailComposer>) -> Self {
        self.mail = mail;
        self
    }

    /// Mount every subsystem the markup supports and register its handlers.
    /// A subsystem whose anchors are missing stays off; the rest still mount.
    pub fn mount(mut self) -> Self {
        if self.mounted {
            return self;
        }
        self.mounted = true;
        let mut cx = page_cx!(self);

        self.navigation = mounted("navigation", Navigation::mount(&mut cx));
        if self.navigation.is_some() {
            self.handlers.register(EventKind::Click, Handler::NavigationClick);
            self.handlers.register(EventKind::KeyDown, Handler::NavigationKey);
        }

        self.handlers.register(EventKind::Scroll, Handler::ScrollState);
        self.handlers.register(EventKind::Resize, Handler::ScrollState);

        self.reveal = RevealEngine::mount(&mut cx);
        self.handlers.register(EventKind::Intersection, Handler::RevealIntersection);
        self.handlers.register(EventKind::Scroll, Handler::RevealDebounce);
        self.handlers.register(EventKind::Resize, Handler::RevealDebounce);

        self.counters = CounterBoard::mount(&mut cx);
        if self.counters.is_some() {
            self.handlers.register(EventKind::Intersection, Handler::CounterIntersection);
        }

        self.contact = mounted("contact", ContactForm::mount(&mut cx));
        if self.contact.is_some() {
            self.handlers.register(EventKind::Submit, Handler::ContactSubmit);
        }

        self.typing = TypingEffect::mount(&mut cx);

        let progress = mounted("progress", ScrollTracker::mount_progress(&mut cx)).is_some();
        if progress {
            self.handlers.register(EventKind::Scroll, Handler::ScrollProgress);
            self.handlers.register(EventKind::Resize, Handler::ScrollProgress);
        }

        self.theme = mounted("theme", ThemeStore::mount(&mut cx, self.store.as_ref()));
        if self.theme.is_some() {
            self.handlers.register(EventKind::Click, Handler::ThemeToggle);
        }

        self.skip_link = mounted("skip-link", SkipLink::mount(&mut cx));
        if self.skip_link.is_some() {
            self.handlers.register(EventKind::Focus, Handler::SkipLinkFocus);
            self.handlers.register(EventKind::Blur, Handler::SkipLinkBlur);
        }

        self.handlers.register(EventKind::Load, Handler::LoadTiming);
        extras::respect_reduced_motion(&mut cx);
        self.handlers.register(EventKind::BeforePrint, Handler::PrintStart);
        self.handlers.register(EventKind::AfterPrint, Handler::PrintEnd);

        self.lazy_images = LazyImages::mount(&mut cx);
        self.handlers.register(EventKind::Intersection, Handler::LazyImage);
        extras::load_smooth_scroll_polyfill(&mut cx);
        extras::preload_critical_images(&mut cx);

        self.handlers.register(EventKind::Click, Handler::NotificationClose);
        self.handlers.register(EventKind::Click, Handler::ClipboardCopy);
        self.handlers.register(EventKind::Error, Handler::ErrorLog);

        self.update_scroll();
        if progress {
            let mut cx = page_cx!(self);
            self.scroll.paint_progress(&mut cx);
        }
        info!(handlers = self.handlers.len(), "Portfolio page initialized");
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme.as_ref().map(ThemeStore::theme)
    }

    pub fn scroll_state(&self) -> &ScrollState {
        self.scroll.state()
    }

    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.reveal.is_visible(id)
    }

    pub fn counters(&self) -> Option<&CounterBoard> {
        self.counters.as_ref()
    }

    pub fn notification(&self) -> &NotificationState {
        self.notifications.state()
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref()
    }

    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            now_ms: self.now().as_millis(),
            theme: self.theme(),
            scroll: self.scroll.state().clone(),
            menu_open: self.navigation.as_ref().is_some_and(Navigation::is_menu_open),
            revealed: self
                .reveal
                .elements()
                .iter()
                .filter(|e| self.reveal.is_visible(&e.id))
                .map(|e| e.id.clone())
                .collect(),
            notification: self.notifications.state().current().cloned(),
            pending_timers: self.scheduler.pending(),
            handlers: self.handlers.len(),
        }
    }

    /// Display a notification, evicting the current one.
    pub fn show_notification(&mut self, message: &str, kind: NotificationKind) -> u64 {
        let mut cx = page_cx!(self);
        self.notifications.show(&mut cx, message, kind)
    }

    /// Route `event` to every handler registered for its kind.
    pub fn dispatch(&mut self, event: PageEvent) {
        let handlers = self.handlers.handlers_for(event.kind());
        if handlers.is_empty() {
            debug!(?event, "No handler for event");
        }
        for handler in handlers {
            self.run_handler(handler, &event);
        }
    }

    /// Run every task due within the next `by`.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        self.advance_to(until);
    }

    /// Run every task due at or before `until`, including ones scheduled
    /// along the way, then move the clock there.
    pub fn advance_to(&mut self, until: Duration) {
        while let Some((id, task)) = self.scheduler.pop_due(until) {
            self.run_task(id, task);
        }
        self.scheduler.settle_at(until);
    }

    /// Replay `source` to the end, running timers between events.
    pub fn run<E: EventSource<S>>(&mut self, source: &mut E) {
        while let Some(at) = source.next_at() {
            self.advance_to(at);
            if let Some(event) = source.next_event(&mut self.surface) {
                self.dispatch(event);
            }
        }
    }

    fn run_handler(&mut self, handler: Handler, event: &PageEvent) {
        match (handler, event) {
            (Handler::ScrollState, _) => self.update_scroll(),
            (Handler::RevealDebounce, _) => {
                let mut cx = page_cx!(self);
                self.scroll.debounce_reveal(&mut cx);
            }
            (Handler::ScrollProgress, _) => {
                let mut cx = page_cx!(self);
                self.scroll.paint_progress(&mut cx);
            }
            (Handler::NavigationClick, PageEvent::Click { target }) => {
                if let Some(navigation) = self.navigation.as_mut() {
                    let mut cx = page_cx!(self);
                    navigation.on_click(&mut cx, target);
                }
            }
            (Handler::NavigationKey, PageEvent::KeyDown { key }) => {
                if let Some(navigation) = self.navigation.as_mut() {
                    let mut cx = page_cx!(self);
                    navigation.on_key(&mut cx, key);
                }
            }
            (Handler::ThemeToggle, PageEvent::Click { target }) => {
                let on_toggle = target == dom::THEME_TOGGLE
                    || self.surface.is_descendant(target, dom::THEME_TOGGLE);
                if let (true, Some(theme)) = (on_toggle, self.theme.as_mut()) {
                    let mut cx = page_cx!(self);
                    let now = theme.toggle(&mut cx, self.store.as_mut());
                    debug!(theme = now.as_str(), "Theme toggled");
                }
            }
            (Handler::NotificationClose, PageEvent::Click { target }) => {
                let mut cx = page_cx!(self);
                self.notifications.close_clicked(&mut cx, target);
            }
            (Handler::ClipboardCopy, PageEvent::Click { target }) => self.copy_contact(target),
            (Handler::RevealIntersection, PageEvent::Intersection { target }) => {
                let mut cx = page_cx!(self);
                self.reveal.reveal(&mut cx, target);
            }
            (Handler::CounterIntersection, PageEvent::Intersection { target }) => {
                if let Some(counters) = self.counters.as_mut() {
                    let mut cx = page_cx!(self);
                    counters.on_intersection(&mut cx, target);
                }
            }
            (Handler::LazyImage, PageEvent::Intersection { target }) => {
                let mut cx = page_cx!(self);
                self.lazy_images.on_intersection(&mut cx, target);
            }
            (Handler::ContactSubmit, PageEvent::Submit { form, fields }) => {
                self.submit_contact(form, fields.as_ref());
            }
            (Handler::SkipLinkFocus, PageEvent::Focus { target }) => {
                if let Some(link) = self.skip_link.as_ref() {
                    let mut cx = page_cx!(self);
                    link.on_focus(&mut cx, target);
                }
            }
            (Handler::SkipLinkBlur, PageEvent::Blur { target }) => {
                if let Some(link) = self.skip_link.as_ref() {
                    let mut cx = page_cx!(self);
                    link.on_blur(&mut cx, target);
                }
            }
            (Handler::PrintStart, _) => {
                let mut cx = page_cx!(self);
                extras::set_printing(&mut cx, true);
            }
            (Handler::PrintEnd, _) => {
                let mut cx = page_cx!(self);
                extras::set_printing(&mut cx, false);
            }
            (Handler::LoadTiming, PageEvent::Load { load_time_ms }) => {
                extras::report_load_time(*load_time_ms, &self.config.performance);
            }
            (Handler::ErrorLog, PageEvent::Error { message }) => extras::report_page_error(message),
            (handler, event) => debug!(?handler, ?event, "Handler does not apply to event"),
        }
    }

    fn run_task(&mut self, id: TimerId, task: Task) {
        let mut cx = page_cx!(self);
        match task {
            Task::ThemePulseRelease => {
                if let Some(theme) = self.theme.as_mut() {
                    theme.release_pulse(&mut cx);
                }
            }
            Task::ThemeTransitionEnd => {
                if let Some(theme) = self.theme.as_mut() {
                    theme.close_transition(&mut cx);
                }
            }
            Task::RevealSweep => {
                self.scroll.reveal_fired(id);
                let revealed = self.reveal.sweep(&mut cx);
                if revealed > 0 {
                    debug!(revealed, "Reveal sweep");
                }
            }
            Task::CounterTick { index } => {
                if let Some(counters) = self.counters.as_mut() {
                    counters.tick(&mut cx, index);
                }
            }
            Task::Notification(intent) => self.notifications.dispatch(&mut cx, intent),
            Task::TypeNextChar => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.type_next(&mut cx);
                }
            }
            Task::DeliverContact(message) => {
                let Some(contact) = self.contact.as_mut() else {
                    return;
                };
                let link = contact.deliver(&mut cx, &message);
                self.mail.open(&link);
                self.notifications
                    .show(&mut cx, PREPARED, NotificationKind::Success);
            }
        }
    }

    fn update_scroll(&mut self) {
        let mut cx = page_cx!(self);
        self.scroll.observe(&mut cx);
        self.scroll.compact_navbar(&mut cx);
        self.scroll.highlight_nav(&mut cx);
    }

    fn submit_contact(
        &mut self,
        form: &str,
        fields: Option<&std::collections::BTreeMap<String, String>>,
    ) {
        let Some(contact) = self.contact.as_mut() else {
            return;
        };
        if form != contact.form() {
            debug!(form, "Submit for another form");
            return;
        }
        let mut cx = page_cx!(self);
        let fields = match fields {
            Some(fields) => fields.clone(),
            None => contact.read_fields(&cx),
        };
        match contact.submit(&mut cx, &fields) {
            SubmitOutcome::Invalid(err) => {
                self.notifications
                    .show(&mut cx, &err.to_string(), NotificationKind::Error);
            }
            SubmitOutcome::Sending => info!("Contact message sending"),
            SubmitOutcome::Busy => {}
        }
    }

    fn copy_contact(&mut self, target: &str) {
        let Some(item) = self.surface.closest_with_class(target, dom::CONTACT_ITEM) else {
            return;
        };
        let Some(text) = self
            .surface
            .descendants(&item)
            .into_iter()
            .find(|id| self.surface.tag(id).as_deref() == Some("p"))
            .and_then(|p| self.surface.text(&p))
        else {
            return;
        };
        if !is_copyable(&text) {
            return;
        }

        let result = copy_with_fallback(
            self.clipboard.as_deref_mut(),
            self.fallback_clipboard.as_mut(),
            &text,
        );
        let (message, kind) = match result {
            Ok(()) => ("Copied to clipboard!", NotificationKind::Success),
            Err(err) => {
                warn!(error = %FolioError::from(err), "Copy failed");
                ("Failed to copy to clipboard", NotificationKind::Error)
            }
        };
        self.show_notification(message, kind);
    }
}
