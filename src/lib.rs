//! Headless interaction controller for a single-page portfolio.
//!
//! The page behaviour (theme, scroll tracking, reveal animations, counters,
//! notifications, navigation, contact form) runs against a [`surface::Surface`]
//! and a virtual-time [`scheduler::Scheduler`], so it can be driven by a
//! browser host, a test, or the `folio` CLI alike.

pub mod clipboard;
pub mod config;
pub mod dom;
pub mod error;
pub mod logging;
pub mod mail;
pub mod scenario;
pub mod scheduler;
pub mod storage;
pub mod surface;
pub mod ui;

pub use error::FolioError;
pub use ui::app::Page;
