use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{generation_client::GeminiClient, session_service::SessionService},
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let generator = Arc::new(GeminiClient::new(&config)?);
        let session_service =
            Arc::new(SessionService::new(generator).with_session_ttl(config.session_ttl));

        Ok(Self::with_service(config, session_service))
    }

    pub fn with_service(config: Config, session_service: Arc<SessionService>) -> Self {
        Self {
            session_service,
            config: Arc::new(config),
        }
    }
}
