//! Reducer for the notification slot.

use crate::ui::mvi::Reducer;

use super::intent::NotificationIntent;
use super::state::NotificationState;

/// Lifecycle: `Created → Entering → Visible → Exiting → Idle`.
///
/// `Show` always wins. Every other intent names a notification id and is a
/// no-op unless that notification is the one currently held, which is how
/// timers left over from an evicted notification get ignored.
pub struct NotificationReducer;

impl Reducer for NotificationReducer {
    type State = NotificationState;
    type Intent = NotificationIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        if let NotificationIntent::Show(notification) = intent {
            return NotificationState::Created(notification);
        }
        if !state.is_for(intent.target()) {
            return state;
        }

        match (intent, state) {
            (NotificationIntent::Enter { .. }, NotificationState::Created(n)) => {
                NotificationState::Entering(n)
            }
            (NotificationIntent::Settle { .. }, NotificationState::Entering(n)) => {
                NotificationState::Visible(n)
            }
            (
                NotificationIntent::Dismiss { .. },
                NotificationState::Created(n)
                | NotificationState::Entering(n)
                | NotificationState::Visible(n),
            ) => NotificationState::Exiting(n),
            (NotificationIntent::Remove { .. }, NotificationState::Exiting(_)) => {
                NotificationState::Idle
            }
            (_, other) => other,
        }
    }
}
