//! Shared fixtures: a small but complete portfolio page.

#![allow(dead_code, unused_imports)]

use folio::clipboard::MemoryClipboard;
use folio::config::Config;
use folio::mail::Outbox;
use folio::storage::MemoryStore;
use folio::surface::{Element, MemorySurface};
use folio::Page;
use std::collections::BTreeMap;
use std::time::Duration;

pub const VIEWPORT: f64 = 800.0;
pub const DOCUMENT: f64 = 4000.0;

/// Handles the test keeps after the page takes ownership of its collaborators.
pub struct Harness {
    pub page: Page<MemorySurface>,
    pub store: MemoryStore,
    pub outbox: Outbox,
    pub clipboard: MemoryClipboard,
}

/// Navbar, five sections, stats, cards, a contact form and a lazy image.
pub fn portfolio() -> MemorySurface {
    let mut surface = MemorySurface::new(VIEWPORT, DOCUMENT);
    surface
        .insert(Element::new("navbar", "nav").class("navbar"))
        .insert(Element::new("hamburger", "div").under("navbar").class("hamburger"))
        .insert(Element::new("hamburger-bar", "span").under("hamburger").class("bar"))
        .insert(Element::new("nav-menu", "ul").under("navbar").class("nav-menu"));
    for (id, section) in [
        ("link-home", "home"),
        ("link-about", "about"),
        ("link-projects", "projects"),
        ("link-contact", "contact"),
    ] {
        surface.insert(
            Element::new(id, "a")
                .under("nav-menu")
                .class("nav-link")
                .attr("href", &format!("#{section}")),
        );
    }
    surface
        .insert(Element::new("theme-toggle", "button").under("navbar"))
        .insert(Element::new("theme-icon", "i").under("theme-toggle").class("fas"));

    surface
        .insert(Element::new("home", "section").layout(0.0, 800.0))
        .insert(
            Element::new("hero-title", "span")
                .under("home")
                .class("typing-text")
                .text("Hi!")
                .layout(300.0, 40.0),
        )
        .insert(
            Element::new("hero-image", "img")
                .under("home")
                .class("slide-in-right")
                .layout(200.0, 300.0),
        );

    surface
        .insert(Element::new("about", "section").layout(800.0, 900.0))
        .insert(Element::new("stats", "div").under("about").class("about-stats").layout(1200.0, 200.0))
        .insert(Element::new("stat-projects", "h3").under("stats").class("stat-number").text("150+"))
        .insert(Element::new("stat-gpa", "h3").under("stats").class("stat-number").text("4.80"))
        .insert(Element::new("stat-years", "h3").under("stats").class("stat-number").text("25"))
        .insert(Element::new("stat-broken", "h3").under("stats").class("stat-number").text("n/a"));

    surface.insert(Element::new("projects", "section").layout(1700.0, 1200.0));
    for (index, top) in [1750.0, 1900.0, 2300.0].into_iter().enumerate() {
        surface.insert(
            Element::new(&format!("project-{index}"), "div")
                .under("projects")
                .class("project-card")
                .layout(top, 120.0),
        );
    }
    surface.insert(
        Element::new("project-shot", "img")
            .under("projects")
            .class("lazy")
            .attr("data-src", "shots/project.png")
            .layout(2500.0, 200.0),
    );

    surface
        .insert(Element::new("contact", "section").layout(2900.0, 1100.0))
        .insert(Element::new("contact-email", "div").under("contact").class("contact-item").layout(2950.0, 60.0))
        .insert(Element::new("contact-email-icon", "i").under("contact-email").class("fas"))
        .insert(Element::new("contact-email-text", "p").under("contact-email").text("me@example.com"))
        .insert(Element::new("contact-city", "div").under("contact").class("contact-item").layout(3020.0, 60.0))
        .insert(Element::new("contact-city-text", "p").under("contact-city").text("Berlin, Germany"))
        .insert(Element::new("contactForm", "form").under("contact").layout(3100.0, 500.0));
    for field in ["name", "email", "subject"] {
        surface.insert(
            Element::new(&format!("form-{field}"), "input")
                .under("contactForm")
                .attr("name", field),
        );
    }
    surface
        .insert(Element::new("form-message", "textarea").under("contactForm").attr("name", "message"))
        .insert(
            Element::new("form-send", "button")
                .under("contactForm")
                .attr("type", "submit")
                .text("Send Message"),
        );
    surface
}

/// Mount `surface` with shared in-memory collaborators.
pub fn harness_for(surface: MemorySurface, store: MemoryStore, primary: Option<MemoryClipboard>) -> Harness {
    let outbox = Outbox::new();
    let clipboard = MemoryClipboard::new();
    let page = Page::new(surface, Config::default())
        .with_store(Box::new(store.clone()))
        .with_mail(Box::new(outbox.clone()))
        .with_clipboards(
            primary.map(|c| Box::new(c) as Box<dyn folio::clipboard::Clipboard>),
            Box::new(clipboard.clone()),
        )
        .mount();
    Harness {
        page,
        store,
        outbox,
        clipboard,
    }
}

pub fn harness() -> Harness {
    harness_for(portfolio(), MemoryStore::new(), None)
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn form_fields(name: &str, email: &str, subject: &str, message: &str) -> BTreeMap<String, String> {
    [("name", name), ("email", email), ("subject", subject), ("message", message)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
