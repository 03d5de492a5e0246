//! Page behaviour.
//!
//! Each subsystem owns its own state and mutates the page only through the
//! [`Ctx`] it is handed. [`app::Page`] owns every subsystem, routes events to
//! them and runs scheduled work.

pub mod app;
pub mod contact;
pub mod counter;
pub mod events;
pub mod extras;
pub mod handlers;
pub mod mvi;
pub mod navigation;
pub mod notification;
pub mod reveal;
pub mod scroll;
pub mod task;
pub mod theme;
pub mod typing;

use crate::config::Config;
use crate::scheduler::Scheduler;
use crate::surface::Surface;

use self::task::Task;

/// What a subsystem may touch while handling an event.
pub struct Ctx<'a> {
    pub surface: &'a mut dyn Surface,
    pub scheduler: &'a mut Scheduler<Task>,
    pub config: &'a Config,
}

impl<'a> Ctx<'a> {
    pub fn new(
        surface: &'a mut dyn Surface,
        scheduler: &'a mut Scheduler<Task>,
        config: &'a Config,
    ) -> Self {
        Self {
            surface,
            scheduler,
            config,
        }
    }
}
