use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::DocumentStore;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn DocumentStore>,
}

impl AppContext {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self { config, store }
    }
}
