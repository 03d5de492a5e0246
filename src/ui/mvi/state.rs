//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// `Default` is the "nothing shown" state; `PartialEq` lets callers skip
/// rendering when an intent changed nothing.
pub trait UiState: Clone + PartialEq + Default + std::fmt::Debug + 'static {}
