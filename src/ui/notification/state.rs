use std::time::Duration;

use serde::Serialize;

use crate::ui::mvi::UiState;
use crate::ui::theme::{ERROR_RED, INFO_BLUE, SUCCESS_GREEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::Info => INFO_BLUE,
            Self::Success => SUCCESS_GREEN,
            Self::Error => ERROR_RED,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "fas fa-info-circle",
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    /// Scheduler time at creation.
    pub created_at: Duration,
}

impl Notification {
    /// Surface id of the notification's root element.
    pub fn element_id(&self) -> String {
        format!("notification-{}", self.id)
    }

    pub fn close_button_id(&self) -> String {
        format!("notification-{}-close", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    Created,
    Entering,
    Visible,
    Exiting,
}

/// What the notification slot currently holds. `Idle` doubles as "Removed".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NotificationState {
    #[default]
    Idle,
    Created(Notification),
    Entering(Notification),
    Visible(Notification),
    Exiting(Notification),
}

impl UiState for NotificationState {}

impl NotificationState {
    pub fn current(&self) -> Option<&Notification> {
        match self {
            Self::Idle => None,
            Self::Created(n) | Self::Entering(n) | Self::Visible(n) | Self::Exiting(n) => Some(n),
        }
    }

    pub fn phase(&self) -> Option<NotificationPhase> {
        match self {
            Self::Idle => None,
            Self::Created(_) => Some(NotificationPhase::Created),
            Self::Entering(_) => Some(NotificationPhase::Entering),
            Self::Visible(_) => Some(NotificationPhase::Visible),
            Self::Exiting(_) => Some(NotificationPhase::Exiting),
        }
    }

    pub fn is_displayed(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// True when the slot holds notification `id`.
    pub fn is_for(&self, id: u64) -> bool {
        self.current().is_some_and(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Notification {
        Notification {
            id: 7,
            message: "hi".into(),
            kind: NotificationKind::Info,
            created_at: Duration::ZERO,
        }
    }

    #[test]
    fn idle_is_default_and_empty() {
        let state = NotificationState::default();
        assert_eq!(state, NotificationState::Idle);
        assert!(state.current().is_none());
        assert!(state.phase().is_none());
        assert!(!state.is_displayed());
    }

    #[test]
    fn phase_matches_variant() {
        assert_eq!(
            NotificationState::Exiting(sample()).phase(),
            Some(NotificationPhase::Exiting)
        );
        assert_eq!(
            NotificationState::Visible(sample()).current().map(|n| n.id),
            Some(7)
        );
    }

    #[test]
    fn element_ids_embed_notification_id() {
        assert_eq!(sample().element_id(), "notification-7");
        assert_eq!(sample().close_button_id(), "notification-7-close");
    }

    #[test]
    fn kinds_have_distinct_visuals() {
        assert_eq!(NotificationKind::Success.background(), "#10b981");
        assert_eq!(NotificationKind::Error.background(), "#ef4444");
        assert_eq!(NotificationKind::Info.icon(), "fas fa-info-circle");
    }
}
