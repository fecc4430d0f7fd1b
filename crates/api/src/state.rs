use std::sync::Arc;

use famifarm_core::reporting::store::EventStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Read side the reports are generated from.
    pub store: Arc<dyn EventStore>,
    pub config: Arc<ServerConfig>,
}
