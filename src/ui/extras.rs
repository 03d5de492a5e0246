//! Accessibility and performance conveniences that are not tied to any
//! other subsystem.

use std::collections::BTreeSet;

use tracing::{debug, error, info, warn};

use crate::config::PerformanceConfig;
use crate::dom;
use crate::error::FolioError;
use crate::surface::Placement;
use crate::ui::Ctx;

const REDUCED_MOTION_CSS: &str = "*, *::before, *::after {
    animation-duration: 0.01ms !important;
    animation-iteration-count: 1 !important;
    transition-duration: 0.01ms !important;
    scroll-behavior: auto !important;
}";

const SKIP_LINK_HIDDEN: &str = "-40px";
const SKIP_LINK_SHOWN: &str = "6px";

/// Keyboard shortcut to the top of the page, shown only while focused.
#[derive(Debug)]
pub struct SkipLink {
    id: String,
}

impl SkipLink {
    pub fn mount(cx: &mut Ctx<'_>) -> Result<Self, FolioError> {
        let id = dom::SKIP_LINK;
        if !cx.surface.exists(id)
            && !cx.surface.create_element(dom::BODY, id, "a", Placement::First)
        {
            return Err(FolioError::not_found("skip-link", dom::BODY));
        }
        cx.surface.set_attribute(id, "href", "#home");
        cx.surface.set_text(id, "Skip to main content");
        cx.surface.set_class_name(id, dom::SKIP_LINK);
        let styles = [
            ("position", "absolute"),
            ("top", SKIP_LINK_HIDDEN),
            ("left", "6px"),
            ("background", "var(--primary-color)"),
            ("color", "white"),
            ("padding", "8px"),
            ("text-decoration", "none"),
            ("border-radius", "4px"),
            ("z-index", "10001"),
            ("transition", "top 0.3s"),
        ];
        for (property, value) in styles {
            cx.surface.set_style(id, property, value);
        }
        Ok(Self { id: id.to_string() })
    }

    pub fn on_focus(&self, cx: &mut Ctx<'_>, target: &str) -> bool {
        self.place(cx, target, SKIP_LINK_SHOWN)
    }

    pub fn on_blur(&self, cx: &mut Ctx<'_>, target: &str) -> bool {
        self.place(cx, target, SKIP_LINK_HIDDEN)
    }

    fn place(&self, cx: &mut Ctx<'_>, target: &str, top: &str) -> bool {
        if target != self.id {
            return false;
        }
        cx.surface.set_style(&self.id, "top", top);
        true
    }
}

/// Images whose real source waits in `data-src` until they scroll in.
#[derive(Debug, Default)]
pub struct LazyImages {
    observed: BTreeSet<String>,
}

impl LazyImages {
    pub fn mount(cx: &mut Ctx<'_>) -> Self {
        let observed: BTreeSet<String> = cx
            .surface
            .find_by_tag("img")
            .into_iter()
            .filter(|id| cx.surface.attribute(id, "data-src").is_some())
            .collect();
        debug!(count = observed.len(), "Observing lazy images");
        Self { observed }
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    /// Swap in the real source and stop observing. Returns false for
    /// anything not observed.
    pub fn on_intersection(&mut self, cx: &mut Ctx<'_>, target: &str) -> bool {
        if !self.observed.remove(target) {
            return false;
        }
        if let Some(src) = cx.surface.attribute(target, "data-src") {
            cx.surface.set_attribute(target, "src", &src);
        }
        cx.surface.remove_class(target, dom::LAZY);
        true
    }
}

/// Shorten every animation when the user asked for less motion.
pub fn respect_reduced_motion(cx: &mut Ctx<'_>) -> bool {
    if !cx.surface.prefers_reduced_motion() {
        return false;
    }
    inject_head_element(cx, dom::REDUCED_MOTION_STYLE, "style", |cx, id| {
        cx.surface.set_text(id, REDUCED_MOTION_CSS);
    })
}

/// Load the smooth-scroll polyfill when the host lacks native support.
pub fn load_smooth_scroll_polyfill(cx: &mut Ctx<'_>) -> bool {
    if cx.surface.supports_smooth_scroll() {
        return false;
    }
    let src = cx.config.assets.smooth_scroll_polyfill.clone();
    inject_head_element(cx, dom::SMOOTH_SCROLL_POLYFILL, "script", |cx, id| {
        cx.surface.set_attribute(id, "src", &src);
    })
}

pub fn preload_critical_images(cx: &mut Ctx<'_>) {
    for src in &cx.config.assets.critical_images {
        cx.surface.preload_image(src);
    }
}

pub fn set_printing(cx: &mut Ctx<'_>, printing: bool) {
    if printing {
        cx.surface.add_class(dom::BODY, dom::PRINTING);
    } else {
        cx.surface.remove_class(dom::BODY, dom::PRINTING);
    }
}

/// Log the page load time. Returns true when it counts as slow.
pub fn report_load_time(load_time_ms: u64, config: &PerformanceConfig) -> bool {
    info!(load_time_ms, "Page load time: {load_time_ms}ms");
    let slow = load_time_ms > config.slow_load_ms;
    if slow {
        warn!(
            load_time_ms,
            threshold_ms = config.slow_load_ms,
            "Page load time is above the threshold. Consider optimizing resources."
        );
    }
    slow
}

pub fn report_page_error(message: &str) {
    error!(error = message, "An error occurred");
}

/// Append `id` to the head once. False when it already exists or cannot be
/// created.
fn inject_head_element(
    cx: &mut Ctx<'_>,
    id: &str,
    tag: &str,
    fill: impl FnOnce(&mut Ctx<'_>, &str),
) -> bool {
    if cx.surface.exists(id) || !cx.surface.create_element(dom::HEAD, id, tag, Placement::Last) {
        return false;
    }
    fill(cx, id);
    true
}
