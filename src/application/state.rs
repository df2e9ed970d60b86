// src/application/state.rs

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::error::AppResult;
use crate::events::{register_logging_handlers, EventBus};
use crate::integrations::http::ReqwestHttpClient;
use crate::services::ListService;

/// Application state shared with the host.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub list_service: Arc<ListService>,
}

impl AppState {
    /// Production wiring: one HTTP transport, logging subscribers attached
    pub fn new(config: PipelineConfig) -> AppResult<Self> {
        let event_bus = Arc::new(EventBus::new());
        register_logging_handlers(&event_bus);

        let http = Arc::new(ReqwestHttpClient::new(
            config.request_timeout(),
            &config.user_agent,
        )?);
        let list_service = ListService::new(config, http, Arc::clone(&event_bus));

        Ok(Self::from_service(list_service, event_bus))
    }

    pub fn from_service(list_service: ListService, event_bus: Arc<EventBus>) -> Self {
        Self {
            event_bus,
            list_service: Arc::new(list_service),
        }
    }
}
