use crate::session::SessionTracker;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Progress of the current (or last) session
    pub tracker: SessionTracker,
}

impl AppState {
    pub fn new(tracker: SessionTracker) -> Self {
        Self { tracker }
    }
}
