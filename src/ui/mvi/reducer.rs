//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place state transitions happen.
///
/// Reducers never touch the surface or the scheduler; the caller diffs the
/// old and new state and renders the difference.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
