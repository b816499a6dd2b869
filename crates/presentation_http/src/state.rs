//! Application state shared across handlers

use std::sync::Arc;

use application::TurnService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Turn service running bot conversations
    pub turn_service: Arc<TurnService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("turn_service", &self.turn_service)
            .finish_non_exhaustive()
    }
}
