//! Reveal-on-scroll: one-way Hidden → Visible transitions for tagged elements.

use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use crate::dom;
use crate::ui::Ctx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimatableElement {
    pub id: String,
    pub visibility: Visibility,
    pub reveal_delay: Duration,
}

/// Tracks every animatable element on the page.
///
/// Visibility only ever moves forward: nothing in here turns a visible
/// element back into a hidden one.
#[derive(Debug, Default)]
pub struct RevealEngine {
    elements: Vec<AnimatableElement>,
}

impl RevealEngine {
    /// Tag cards with a staggered fade-in, then register every animatable
    /// element in document order.
    pub fn mount(cx: &mut Ctx<'_>) -> Self {
        let mut delays = Vec::new();
        for section in cx.surface.find_by_tag("section") {
            let cards = cx
                .surface
                .descendants(&section)
                .into_iter()
                .filter(|id| dom::CARDS.iter().any(|class| cx.surface.has_class(id, class)));
            let cards: Vec<String> = cards.collect();
            for (index, card) in cards.into_iter().enumerate() {
                let delay = cx.config.reveal.stagger(index);
                cx.surface.add_class(&card, dom::FADE_IN);
                cx.surface.set_style(
                    &card,
                    "animation-delay",
                    &format!("{}s", delay.as_secs_f64()),
                );
                delays.push((card, delay));
            }
        }

        let elements = cx
            .surface
            .descendants(dom::BODY)
            .into_iter()
            .filter(|id| dom::ANIMATABLE.iter().any(|class| cx.surface.has_class(id, class)))
            .map(|id| {
                let reveal_delay = delays
                    .iter()
                    .find(|(card, _)| *card == id)
                    .map(|(_, delay)| *delay)
                    .unwrap_or_default();
                let visibility = if cx.surface.has_class(&id, dom::VISIBLE) {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
                AnimatableElement {
                    id,
                    visibility,
                    reveal_delay,
                }
            })
            .collect();

        Self { elements }
    }

    pub fn elements(&self) -> &[AnimatableElement] {
        &self.elements
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.elements
            .iter()
            .any(|e| e.id == id && e.visibility == Visibility::Visible)
    }

    /// Elements still waiting to be revealed.
    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.elements
            .iter()
            .filter(|e| e.visibility == Visibility::Hidden)
            .map(|e| e.id.as_str())
    }

    /// Reveal `id`. Returns true only on the Hidden → Visible transition.
    pub fn reveal(&mut self, cx: &mut Ctx<'_>, id: &str) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if element.visibility == Visibility::Visible {
            return false;
        }
        element.visibility = Visibility::Visible;
        cx.surface.add_class(id, dom::VISIBLE);
        trace!(element = id, "Revealed");
        true
    }

    /// Reveal every hidden element whose top edge is above the viewport
    /// bottom minus the reveal margin. Returns how many were revealed.
    pub fn sweep(&mut self, cx: &mut Ctx<'_>) -> usize {
        let limit = cx.surface.viewport().viewport_height - cx.config.reveal.viewport_margin;
        let due: Vec<String> = self
            .hidden()
            .filter(|id| cx.surface.bounding_top(id).is_some_and(|top| top < limit))
            .map(str::to_string)
            .collect();
        due.iter().filter(|id| self.reveal(cx, id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scheduler::Scheduler;
    use crate::surface::{Element, MemorySurface, Surface};

    fn page() -> MemorySurface {
        let mut surface = MemorySurface::new(800.0, 3000.0);
        surface
            .insert(Element::new("skills", "section").layout(0.0, 1000.0))
            .insert(Element::new("s1", "div").under("skills").class("skill-category").layout(100.0, 50.0))
            .insert(Element::new("s2", "div").under("skills").class("skill-category").layout(700.0, 50.0))
            .insert(Element::new("s3", "div").under("skills").class("skill-category").layout(900.0, 50.0))
            .insert(Element::new("projects", "section").layout(1000.0, 2000.0))
            .insert(Element::new("p1", "div").under("projects").class("project-card").layout(1100.0, 50.0))
            .insert(Element::new("hero-img", "img").class("slide-in-left").layout(2500.0, 50.0));
        surface
    }

    #[test]
    fn cards_get_fade_in_and_per_section_stagger() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        let engine = RevealEngine::mount(&mut cx);

        assert_eq!(engine.elements().len(), 5);
        assert!(surface.has_class("s1", "fade-in"));
        assert_eq!(surface.style("s1", "animation-delay").as_deref(), Some("0s"));
        assert_eq!(surface.style("s3", "animation-delay").as_deref(), Some("0.2s"));
        // index restarts in the next section
        assert_eq!(surface.style("p1", "animation-delay").as_deref(), Some("0s"));
        assert_eq!(surface.style("hero-img", "animation-delay"), None);
        assert_eq!(engine.elements()[2].reveal_delay, Duration::from_millis(200));
    }

    #[test]
    fn sweep_reveals_only_elements_above_margin() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        let mut engine = RevealEngine::mount(&mut cx);

        // limit is 800 - 150 = 650
        assert_eq!(engine.sweep(&mut cx), 1);
        assert!(engine.is_visible("s1"));
        assert!(!engine.is_visible("s2"));
    }

    #[test]
    fn visibility_is_monotonic() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut engine = {
            let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
            RevealEngine::mount(&mut cx)
        };

        surface.set_scroll_y(2000.0);
        {
            let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
            engine.sweep(&mut cx);
        }
        let revealed: Vec<String> = engine
            .elements()
            .iter()
            .filter(|e| e.visibility == Visibility::Visible)
            .map(|e| e.id.clone())
            .collect();
        assert!(!revealed.is_empty());

        surface.set_scroll_y(0.0);
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        engine.sweep(&mut cx);
        assert!(!engine.reveal(&mut cx, &revealed[0]));
        for id in &revealed {
            assert!(engine.is_visible(id));
        }
        assert!(surface.has_class(&revealed[0], "visible"));
    }

    #[test]
    fn reveal_of_untracked_element_is_ignored() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        let mut engine = RevealEngine::mount(&mut cx);
        assert!(!engine.reveal(&mut cx, "skills"));
        assert!(!engine.is_tracked("skills"));
    }
}
