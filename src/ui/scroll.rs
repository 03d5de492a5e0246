//! Scroll-derived state: compact navbar, active section, progress bar.

use serde::Serialize;

use crate::config::ScrollConfig;
use crate::dom;
use crate::error::FolioError;
use crate::scheduler::{Debouncer, TimerId};
use crate::surface::{Placement, SectionBox, Viewport};
use crate::ui::task::Task;
use crate::ui::Ctx;

/// Snapshot recomputed from the viewport on every scroll or resize.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScrollState {
    pub scroll_y: f64,
    pub active_section: Option<String>,
    /// Always within `[0, 100]`.
    pub scroll_percent: f64,
    pub scrolled_past_threshold: bool,
}

impl ScrollState {
    pub fn compute(viewport: &Viewport, sections: &[SectionBox], config: &ScrollConfig) -> Self {
        let scroll_y = viewport.scroll_y.max(0.0);
        Self {
            scroll_y,
            active_section: active_section(scroll_y, sections, config.section_offset),
            scroll_percent: scroll_percent(viewport),
            scrolled_past_threshold: scroll_y > config.navbar_threshold,
        }
    }
}

/// The section whose offset-adjusted span contains `scroll_y`. When spans
/// overlap, the last one in document order wins.
pub fn active_section(scroll_y: f64, sections: &[SectionBox], offset: f64) -> Option<String> {
    sections
        .iter()
        .filter(|section| {
            let top = section.top - offset;
            scroll_y >= top && scroll_y <= top + section.height
        })
        .last()
        .map(|section| section.id.clone())
}

/// How far down the document the viewport is, in percent. Zero when the
/// document does not overflow the viewport.
pub fn scroll_percent(viewport: &Viewport) -> f64 {
    let max_scroll = viewport.max_scroll();
    if max_scroll <= 0.0 || !viewport.scroll_y.is_finite() {
        return 0.0;
    }
    (viewport.scroll_y / max_scroll * 100.0).clamp(0.0, 100.0)
}

/// Applies [`ScrollState`] to the navbar, nav links and progress bar, and
/// debounces the reveal sweep that rides on the same event stream.
#[derive(Debug)]
pub struct ScrollTracker {
    state: ScrollState,
    reveal: Debouncer,
}

impl ScrollTracker {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            state: ScrollState::default(),
            reveal: Debouncer::new(config.reveal_debounce()),
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Recompute from the live surface.
    pub fn observe(&mut self, cx: &mut Ctx<'_>) -> &ScrollState {
        let viewport = cx.surface.viewport();
        let sections = cx.surface.sections();
        self.state = ScrollState::compute(&viewport, &sections, &cx.config.scroll);
        &self.state
    }

    /// Append the progress bar to the body.
    pub fn mount_progress(cx: &mut Ctx<'_>) -> Result<(), FolioError> {
        if !cx.surface.exists(dom::PROGRESS_BAR)
            && !cx
                .surface
                .create_element(dom::BODY, dom::PROGRESS_BAR, "div", Placement::Last)
        {
            return Err(FolioError::not_found("progress", dom::BODY));
        }
        cx.surface.set_class_name(dom::PROGRESS_BAR, dom::PROGRESS_BAR);
        Ok(())
    }

    pub fn compact_navbar(&self, cx: &mut Ctx<'_>) {
        if self.state.scrolled_past_threshold {
            cx.surface.add_class(dom::NAVBAR, dom::SCROLLED);
        } else {
            cx.surface.remove_class(dom::NAVBAR, dom::SCROLLED);
        }
    }

    /// Mark exactly the link pointing at the active section.
    pub fn highlight_nav(&self, cx: &mut Ctx<'_>) {
        let target = self.state.active_section.as_ref().map(|id| format!("#{id}"));
        for link in cx.surface.find_by_class(dom::NAV_LINK) {
            cx.surface.remove_class(&link, dom::ACTIVE);
            if target.is_some() && cx.surface.attribute(&link, "href") == target {
                cx.surface.add_class(&link, dom::ACTIVE);
            }
        }
    }

    pub fn paint_progress(&self, cx: &mut Ctx<'_>) {
        let width = format!("{}%", self.state.scroll_percent);
        cx.surface.set_style(dom::PROGRESS_BAR, "width", &width);
    }

    pub fn debounce_reveal(&mut self, cx: &mut Ctx<'_>) {
        self.reveal.trigger(cx.scheduler, Task::RevealSweep);
    }

    pub fn reveal_fired(&mut self, id: TimerId) {
        self.reveal.fired(id);
    }
}
