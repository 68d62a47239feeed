use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::IntakeService;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub intake: Arc<dyn IntakeService>,
}

impl AppContext {
    pub fn new(config: AppConfig, intake: Arc<dyn IntakeService>) -> Self {
        Self { config, intake }
    }
}
