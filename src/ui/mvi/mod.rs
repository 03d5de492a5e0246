//! Model-View-Intent primitives shared by the page's state machines.
//!
//! ```text
//! Event / Timer ──→ Intent ──→ Reducer ──→ State ──→ Surface
//!       ↑                                              │
//!       └──────────────── scheduled follow-ups ────────┘
//! ```
//!
//! - **State**: plain data describing what is on screen
//! - **Intent**: something that happened (click, elapsed timer)
//! - **Reducer**: pure `(State, Intent) -> State`; rendering happens outside

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
