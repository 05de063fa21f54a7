use crate::cli::ServeArgs;
use crate::services::{ProcessRegistry, SystemSampler};
use std::sync::Arc;
use std::time::Instant;

pub struct AppStateInner {
    pub port: u16,
    pub environment: String,
    pub database_uri: Option<String>,
    pub started_at: Instant,
    pub registry: ProcessRegistry,
    pub sampler: SystemSampler,
}

pub type AppState = Arc<AppStateInner>;

pub fn new_state(args: &ServeArgs) -> AppState {
    Arc::new(AppStateInner {
        port: args.port,
        environment: args.environment.clone(),
        database_uri: args.database_uri.clone(),
        started_at: Instant::now(),
        registry: ProcessRegistry::new(args.registry.clone()),
        sampler: SystemSampler::new(),
    })
}
