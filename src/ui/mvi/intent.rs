//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents come from user input (a close button click) or from the
/// scheduler (a dwell timer running out). Timer-borne intents carry the id of
/// the thing they were scheduled for, so reducers can drop stale ones.
pub trait Intent: std::fmt::Debug + 'static {}
