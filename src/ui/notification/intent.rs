use crate::ui::mvi::Intent;

use super::state::Notification;

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationIntent {
    /// Replace whatever is displayed with a freshly created notification.
    Show(Notification),
    /// Next render tick after creation: start sliding in.
    Enter { id: u64 },
    /// Slide-in transition finished.
    Settle { id: u64 },
    /// Dwell time elapsed or the close button was clicked.
    Dismiss { id: u64 },
    /// Slide-out transition finished.
    Remove { id: u64 },
}

impl Intent for NotificationIntent {}

impl NotificationIntent {
    /// Notification this intent was issued for.
    pub fn target(&self) -> u64 {
        match self {
            Self::Show(notification) => notification.id,
            Self::Enter { id } | Self::Settle { id } | Self::Dismiss { id } | Self::Remove { id } => {
                *id
            }
        }
    }
}
