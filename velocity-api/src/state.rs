use std::sync::Arc;
use velocity_core::repository::Repositories;
use velocity_revenue::RevenuePipeline;
use velocity_store::app_config::Config;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub pipeline: Arc<RevenuePipeline>,
}

impl AppState {
    pub fn new(repos: Repositories, config: &Config) -> Self {
        let pipeline = RevenuePipeline::new(
            repos.clone(),
            config.forecasting.clone(),
            config.allocation.clone(),
            config.rates.clone(),
        );

        Self {
            repos,
            pipeline: Arc::new(pipeline),
        }
    }
}
