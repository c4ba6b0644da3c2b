use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// The service keeps no per-user data; every request carries its own resume.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}
