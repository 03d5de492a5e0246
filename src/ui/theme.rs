//! Colour theme: the persisted dark/light flag and the toggle control.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dom;
use crate::error::FolioError;
use crate::scheduler::TimerId;
use crate::storage::KeyValueStore;
use crate::ui::task::Task;
use crate::ui::Ctx;

pub const SUCCESS_GREEN: &str = "#10b981";
pub const ERROR_RED: &str = "#ef4444";
pub const INFO_BLUE: &str = "#3b82f6";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Stored and rendered form (`data-theme` value).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Icon on the toggle: it shows where a click takes you.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Self::Dark => "fas fa-sun",
            Self::Light => "fas fa-moon",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Dark => "Switch to light mode",
            Self::Light => "Switch to dark mode",
        }
    }
}

/// Read the persisted theme, falling back to `default` when storage is
/// unavailable or holds something unexpected.
pub fn load_theme(store: &dyn KeyValueStore, key: &str, default: Theme) -> Theme {
    match store.get(key) {
        Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
            warn!(stored = %value, "Ignoring unknown stored theme");
            default
        }),
        Ok(None) => default,
        Err(err) => {
            debug!(error = %FolioError::from(err), "Theme preference unreadable, using default");
            default
        }
    }
}

/// Persist `theme`. Failures are logged and swallowed.
pub fn save_theme(store: &mut dyn KeyValueStore, key: &str, theme: Theme) -> bool {
    match store.set(key, theme.as_str()) {
        Ok(()) => true,
        Err(err) => {
            debug!(error = %FolioError::from(err), "Theme preference not persisted");
            false
        }
    }
}

/// Owns the active theme and the toggle button.
#[derive(Debug)]
pub struct ThemeStore {
    theme: Theme,
    toggle: String,
    icon: String,
    pulse: Option<TimerId>,
    transition: Option<TimerId>,
}

impl ThemeStore {
    /// Restore the persisted theme and render it.
    pub fn mount(cx: &mut Ctx<'_>, store: &dyn KeyValueStore) -> Result<Self, FolioError> {
        if !cx.surface.exists(dom::THEME_TOGGLE) {
            return Err(FolioError::not_found("theme", dom::THEME_TOGGLE));
        }
        let icon = cx
            .surface
            .children(dom::THEME_TOGGLE)
            .into_iter()
            .find(|child| cx.surface.tag(child).as_deref() == Some("i"))
            .ok_or_else(|| FolioError::not_found("theme", format!("{} > i", dom::THEME_TOGGLE)))?;

        let theme = load_theme(store, &cx.config.theme.storage_key, cx.config.theme.default);
        let this = Self {
            theme,
            toggle: dom::THEME_TOGGLE.to_string(),
            icon,
            pulse: None,
            transition: None,
        };
        this.render(cx);
        Ok(this)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme, persist it and play the toggle feedback.
    pub fn toggle(&mut self, cx: &mut Ctx<'_>, store: &mut dyn KeyValueStore) -> Theme {
        let transition = cx.config.theme.transition();
        let seconds = transition.as_secs_f64();
        cx.surface.set_style(
            dom::BODY,
            "transition",
            &format!("background-color {seconds}s ease, color {seconds}s ease"),
        );

        self.theme = self.theme.toggled();
        self.render(cx);
        save_theme(store, &cx.config.theme.storage_key, self.theme);

        cx.surface.set_style(&self.toggle, "transform", "scale(0.9)");
        if let Some(previous) = self.pulse.take() {
            cx.scheduler.cancel(previous);
        }
        self.pulse = Some(cx.scheduler.schedule(cx.config.theme.pulse(), Task::ThemePulseRelease));

        if let Some(previous) = self.transition.take() {
            cx.scheduler.cancel(previous);
        }
        self.transition = Some(cx.scheduler.schedule(transition, Task::ThemeTransitionEnd));

        self.theme
    }

    pub fn release_pulse(&mut self, cx: &mut Ctx<'_>) {
        self.pulse = None;
        cx.surface.set_style(&self.toggle, "transform", "scale(1)");
    }

    pub fn close_transition(&mut self, cx: &mut Ctx<'_>) {
        self.transition = None;
        cx.surface.remove_style(dom::BODY, "transition");
    }

    fn render(&self, cx: &mut Ctx<'_>) {
        cx.surface
            .set_attribute(dom::ROOT, "data-theme", self.theme.as_str());
        cx.surface
            .set_class_name(&self.icon, self.theme.toggle_icon());
        cx.surface
            .set_attribute(&self.toggle, "aria-label", self.theme.toggle_label());
    }
}
