//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context and configuration.

use std::sync::Arc;

use vidshare_common::{AppConfig, JwtService};
use vidshare_service::ServiceContext;
use vidshare_storage::LocalMediaStorage;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    /// Set when media lives on the local filesystem and is served by this process
    local_media: Option<Arc<LocalMediaStorage>>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            local_media: None,
        }
    }

    pub fn with_local_media(mut self, storage: Arc<LocalMediaStorage>) -> Self {
        self.local_media = Some(storage);
        self
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    pub fn local_media(&self) -> Option<&LocalMediaStorage> {
        self.local_media.as_deref()
    }

    /// Upload limit in whole megabytes, as reported to clients
    pub fn upload_limit_mb(&self) -> u32 {
        self.config.storage.max_file_size_mb
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("local_media", &self.local_media.is_some())
            .finish()
    }
}
