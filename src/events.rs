// src/events.rs
// =============================================================================
// Notifications from the search core to whatever renders it.
//
// The core never draws anything. It tells a SearchEvents implementation when
// the displayed list changed, when a fetch failed, and when a fetch starts or
// stops, and the presentation layer reacts however it likes.
// =============================================================================

use crate::github::Repository;

pub trait SearchEvents: Send + Sync {
    /// The displayed (filtered) list changed
    fn on_results_changed(&self, displayed: &[Repository]);

    /// A fetch or filter failed; `message` is meant for the user
    fn on_fetch_error(&self, message: &str);

    /// A page request started (`true`) or finished (`false`)
    fn on_fetch_state_changed(&self, is_fetching: bool);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl SearchEvents for NoopEvents {
    fn on_results_changed(&self, _displayed: &[Repository]) {}

    fn on_fetch_error(&self, _message: &str) {}

    fn on_fetch_state_changed(&self, _is_fetching: bool) {}
}
