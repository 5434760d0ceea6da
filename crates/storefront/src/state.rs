use crate::{
    di::{DependenciesInject, DependenciesInjectDeps},
    middleware::jwt::CookiePolicy,
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynJwtService,
    config::{Config, ConnectionPool, JwtConfig},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub cookie_policy: CookiePolicy,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cookie_policy", &self.cookie_policy)
            .field("di_container", &self.di_container)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    /// Production wiring: Postgres stores plus the background process-metrics collector.
    pub fn new(pool: ConnectionPool, config: &Config) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let cookie_policy = CookiePolicy {
            secure: config.is_production,
        };

        let state = Self::with_deps(
            DependenciesInjectDeps::postgres(pool),
            jwt_config,
            cookie_policy,
        );

        tokio::spawn(run_metrics_collector(state.system_metrics.clone()));
        info!("✅ Application state ready");

        state
    }

    pub fn with_deps(
        deps: DependenciesInjectDeps,
        jwt_config: DynJwtService,
        cookie_policy: CookiePolicy,
    ) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps, &mut registry);

        system_metrics.register(&mut registry);

        Self {
            jwt_config,
            cookie_policy,
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        }
    }
}
