//! Mobile menu and in-page link scrolling.

use tracing::debug;

use crate::dom;
use crate::error::FolioError;
use crate::ui::Ctx;

#[derive(Debug)]
pub struct Navigation {
    menu_open: bool,
}

impl Navigation {
    pub fn mount(cx: &mut Ctx<'_>) -> Result<Self, FolioError> {
        for required in [dom::HAMBURGER, dom::NAV_MENU, dom::NAVBAR] {
            if !cx.surface.exists(required) {
                return Err(FolioError::not_found("navigation", required));
            }
        }
        Ok(Self {
            menu_open: cx.surface.has_class(dom::NAV_MENU, dom::ACTIVE),
        })
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self, cx: &mut Ctx<'_>) {
        self.menu_open = !self.menu_open;
        self.render(cx);
    }

    pub fn close_menu(&mut self, cx: &mut Ctx<'_>) {
        self.menu_open = false;
        self.render(cx);
    }

    /// Click anywhere on the page. Returns true when navigation handled it.
    pub fn on_click(&mut self, cx: &mut Ctx<'_>, target: &str) -> bool {
        if target == dom::HAMBURGER || cx.surface.is_descendant(target, dom::HAMBURGER) {
            self.toggle_menu(cx);
            return true;
        }
        let Some(link) = cx.surface.closest_with_class(target, dom::NAV_LINK) else {
            return false;
        };
        self.close_menu(cx);
        self.follow(cx, &link);
        true
    }

    /// Escape closes an open menu.
    pub fn on_key(&mut self, cx: &mut Ctx<'_>, key: &str) -> bool {
        if key != "Escape" || !self.menu_open {
            return false;
        }
        self.close_menu(cx);
        true
    }

    fn follow(&self, cx: &mut Ctx<'_>, link: &str) {
        let href = cx.surface.attribute(link, "href").unwrap_or_default();
        let Some(section) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            debug!(link, href = %href, "Link does not point inside the page");
            return;
        };
        let Some(top) = cx.surface.offset_top(section) else {
            debug!(link, section, "Link target not found");
            return;
        };
        let offset = cx.config.scroll.nav_scroll_offset;
        cx.surface.scroll_to(top - offset);
    }

    fn render(&self, cx: &mut Ctx<'_>) {
        for id in [dom::HAMBURGER, dom::NAV_MENU] {
            if self.menu_open {
                cx.surface.add_class(id, dom::ACTIVE);
            } else {
                cx.surface.remove_class(id, dom::ACTIVE);
            }
        }
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
            .insert(Element::new("navbar", "nav"))
            .insert(Element::new("hamburger", "div").under("navbar").class("hamburger"))
            .insert(Element::new("bar", "span").under("hamburger").class("bar"))
            .insert(Element::new("nav-menu", "ul").under("navbar").class("nav-menu"))
            .insert(
                Element::new("link-about", "a")
                    .under("nav-menu")
                    .class("nav-link")
                    .attr("href", "#about"),
            )
            .insert(
                Element::new("link-blog", "a")
                    .under("nav-menu")
                    .class("nav-link")
                    .attr("href", "#blog"),
            )
            .insert(Element::new("about", "section").layout(900.0, 600.0));
        surface
    }

    #[test]
    fn mount_requires_all_anchors() {
        let mut surface = MemorySurface::new(800.0, 800.0);
        surface.insert(Element::new("navbar", "nav"));
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        let err = Navigation::mount(&mut cx).unwrap_err();
        assert!(matches!(err, FolioError::TargetNotFound { subsystem: "navigation", .. }));
    }

    #[test]
    fn hamburger_toggles_menu_and_escape_closes_it() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        let mut nav = Navigation::mount(&mut cx).unwrap();

        assert!(nav.on_click(&mut cx, "bar"));
        assert!(nav.is_menu_open());
        assert!(cx.surface.has_class("hamburger", "active"));
        assert!(cx.surface.has_class("nav-menu", "active"));

        assert!(!nav.on_key(&mut cx, "Enter"));
        assert!(nav.on_key(&mut cx, "Escape"));
        assert!(!nav.is_menu_open());
        assert!(!cx.surface.has_class("nav-menu", "active"));
        assert!(!nav.on_key(&mut cx, "Escape"));
    }

    #[test]
    fn link_closes_menu_and_scrolls_below_navbar() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        {
            let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
            let mut nav = Navigation::mount(&mut cx).unwrap();
            nav.toggle_menu(&mut cx);
            assert!(nav.on_click(&mut cx, "link-about"));
            assert!(!nav.is_menu_open());
            // unresolvable target is consumed but does not scroll
            assert!(nav.on_click(&mut cx, "link-blog"));
        }
        assert_eq!(surface.scroll_requests(), &[820.0]);
        assert!(!surface.has_class("hamburger", "active"));
    }
}
