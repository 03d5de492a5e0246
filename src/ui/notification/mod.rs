//! Transient user-facing messages.
//!
//! One notification at a time. Its lifecycle is an MVI state machine driven by
//! user clicks and scheduler timers; [`NotificationCenter`] renders each
//! transition onto the surface.

mod center;
mod intent;
mod reducer;
mod state;

pub use center::NotificationCenter;
pub use intent::NotificationIntent;
pub use reducer::NotificationReducer;
pub use state::{Notification, NotificationKind, NotificationPhase, NotificationState};
