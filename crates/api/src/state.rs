use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and bus are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: bookmyshoot_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Booking and review events; consumed by the notification writer.
    pub event_bus: Arc<bookmyshoot_events::EventBus>,
}
