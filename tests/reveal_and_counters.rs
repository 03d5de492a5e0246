mod common;

use common::{harness, ms};
use folio::surface::Surface;
use folio::ui::events::PageEvent;
use folio::ui::reveal::Visibility;

fn intersect(target: &str) -> PageEvent {
    PageEvent::Intersection {
        target: target.into(),
    }
}

fn text(h: &common::Harness, id: &str) -> String {
    h.page.surface().text(id).unwrap_or_default()
}

/// Cards get a fade-in class and a per-section stagger at mount.
#[test]
fn test_cards_tagged_with_stagger() {
    let h = harness();
    let surface = h.page.surface();
    for (id, delay) in [("project-0", "0s"), ("project-1", "0.1s"), ("project-2", "0.2s")] {
        assert!(surface.has_class(id, "fade-in"));
        assert_eq!(surface.style(id, "animation-delay").as_deref(), Some(delay));
    }
    assert_eq!(surface.style("contact-city", "animation-delay").as_deref(), Some("0.1s"));
    assert!(h
        .page
        .reveal()
        .elements()
        .iter()
        .all(|e| e.visibility == Visibility::Hidden));
}

/// An intersection reveals the element for good.
#[test]
fn test_reveal_is_monotonic() {
    let mut h = harness();
    h.page.dispatch(intersect("project-2"));
    assert!(h.page.is_revealed("project-2"));

    h.page.surface_mut().set_scroll_y(0.0);
    h.page.dispatch(PageEvent::Scroll);
    h.page.advance(ms(50));
    h.page.dispatch(intersect("project-2"));
    assert!(h.page.is_revealed("project-2"));
    assert!(h.page.surface().has_class("project-2", "visible"));
}

/// "150+" counts 3+, 6+, ... every 30 ms and ends on the exact original text.
#[test]
fn test_counter_plus_suffix_scenario() {
    let mut h = harness();
    h.page.dispatch(intersect("stats"));

    h.page.advance(ms(30));
    assert_eq!(text(&h, "stat-projects"), "3+");
    h.page.advance(ms(30));
    assert_eq!(text(&h, "stat-projects"), "6+");

    h.page.advance(ms(49 * 30 - 60));
    assert_eq!(text(&h, "stat-projects"), "147+");
    h.page.advance(ms(30));
    assert_eq!(text(&h, "stat-projects"), "150+");
}

/// "4.80" shows two decimals while counting and lands exactly on "4.80".
#[test]
fn test_counter_float_scenario() {
    let mut h = harness();
    h.page.dispatch(intersect("stats"));

    h.page.advance(ms(30));
    assert_eq!(text(&h, "stat-gpa"), "0.10");
    h.page.advance(ms(30));
    assert_eq!(text(&h, "stat-gpa"), "0.19");

    h.page.advance(ms(2000));
    assert_eq!(text(&h, "stat-gpa"), "4.80");
    assert_eq!(text(&h, "stat-years"), "25");
}

/// A non-numeric counter is skipped and keeps its text.
#[test]
fn test_invalid_counter_left_alone() {
    let mut h = harness();
    h.page.dispatch(intersect("stats"));
    h.page.advance(ms(2000));
    assert_eq!(text(&h, "stat-broken"), "n/a");
    assert_eq!(h.page.counters().unwrap().counters().len(), 3);
}

/// The region animates once; later intersections change nothing.
#[test]
fn test_counter_runs_at_most_once() {
    let mut h = harness();
    h.page.dispatch(intersect("stats"));
    assert!(!h.page.counters().unwrap().is_observing());
    h.page.advance(ms(2000));

    h.page.dispatch(intersect("stats"));
    h.page.advance(ms(30));
    assert_eq!(text(&h, "stat-projects"), "150+");
    assert_eq!(h.page.counters().unwrap().counters().len(), 3);
    assert_eq!(h.page.pending_timers(), 0);
}

/// Counters do not start before the region is seen.
#[test]
fn test_counter_waits_for_intersection() {
    let mut h = harness();
    h.page.advance(ms(500));
    assert_eq!(text(&h, "stat-projects"), "150+");
    h.page.dispatch(intersect("stat-projects"));
    h.page.advance(ms(30));
    assert_eq!(text(&h, "stat-projects"), "150+");
}

/// Lazy images swap in their real source once.
#[test]
fn test_lazy_image_loads_on_intersection() {
    let mut h = harness();
    assert_eq!(h.page.surface().attribute("project-shot", "src"), None);
    h.page.dispatch(intersect("project-shot"));
    assert_eq!(
        h.page.surface().attribute("project-shot", "src").as_deref(),
        Some("shots/project.png")
    );
    assert!(!h.page.surface().has_class("project-shot", "lazy"));
}
