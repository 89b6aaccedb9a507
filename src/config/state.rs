// Application state module
// Immutable runtime state shared across connection tasks

use crate::redirect::RequestHandler;

use super::types::Config;

/// Application state
///
/// Assembled once at startup, before the listener accepts traffic, and
/// never mutated afterwards; sharing it across connection tasks needs no
/// synchronization.
pub struct AppState {
    pub config: Config,
    pub handler: RequestHandler,
}

impl AppState {
    pub fn new(config: Config, handler: RequestHandler) -> Self {
        Self { config, handler }
    }
}
