//! Element ids and class names the page markup is expected to use.

pub const ROOT: &str = "html";
pub const HEAD: &str = "head";
pub const BODY: &str = "body";

pub const NAVBAR: &str = "navbar";
pub const HAMBURGER: &str = "hamburger";
pub const NAV_MENU: &str = "nav-menu";
pub const NAV_LINK: &str = "nav-link";

pub const THEME_TOGGLE: &str = "theme-toggle";
pub const PROGRESS_BAR: &str = "scroll-progress";

pub const STATS_REGION: &str = "about-stats";
pub const STAT_NUMBER: &str = "stat-number";
pub const TYPING_TEXT: &str = "typing-text";
pub const TYPING_STYLE: &str = "typing-animation-style";
pub const REDUCED_MOTION_STYLE: &str = "reduced-motion-style";
pub const SMOOTH_SCROLL_POLYFILL: &str = "smooth-scroll-polyfill";

pub const CONTACT_FORM: &str = "contactForm";
pub const CONTACT_ITEM: &str = "contact-item";
pub const SKIP_LINK: &str = "skip-link";
pub const LAZY: &str = "lazy";

pub const ACTIVE: &str = "active";
pub const SCROLLED: &str = "scrolled";
pub const VISIBLE: &str = "visible";
pub const PRINTING: &str = "printing";
pub const FADE_IN: &str = "fade-in";

/// Classes that mark an element for reveal-on-scroll.
pub const ANIMATABLE: [&str; 3] = ["fade-in", "slide-in-left", "slide-in-right"];

/// Card-like roles that cascade in with a per-section stagger.
pub const CARDS: [&str; 6] = [
    "education-card",
    "skill-category",
    "experience-card",
    "project-card",
    "achievement-card",
    "contact-item",
];
