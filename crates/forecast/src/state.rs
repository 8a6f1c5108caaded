//! Application state: the frozen service graph plus configuration.
//!
//! `AppState::new` is the composition root. It registers every service
//! with a [`ServiceRegistry`], finalizes the registry into an immutable
//! [`ServiceProvider`], and hands the provider to the router. Which
//! storage backend gets registered is decided at compile time by the
//! `inmemory`/`postgres` features.

use std::sync::Arc;

use forecast_core::{
    registry::{ServiceProvider, ServiceRegistry},
    storage::ForecastRepository,
};

use crate::{config::Config, service::ForecastService};

/// Trait-object handle to the active storage backend.
pub type DynForecastRepository = Arc<dyn ForecastRepository>;

#[derive(Clone)]
pub struct AppState {
    pub provider: ServiceProvider,
    pub config: Config,
}

/// Register the services every backend shares.
///
/// `ForecastService` is scoped: each request scope builds its own
/// instance on first resolve, wired to whatever repository the active
/// backend registered under [`DynForecastRepository`].
fn register_services(registry: &mut ServiceRegistry) -> anyhow::Result<()> {
    registry.register_scoped(|scope| {
        let repository = scope.resolve::<DynForecastRepository>()?;
        Ok(Arc::new(ForecastService::new((*repository).clone())))
    })?;
    Ok(())
}

#[cfg(all(feature = "inmemory", feature = "postgres"))]
compile_error!(
    "Multiple storage backends enabled! Please enable only one of: inmemory, postgres"
);

#[cfg(not(any(feature = "inmemory", feature = "postgres")))]
compile_error!("No storage backend enabled! Please enable one of: inmemory, postgres");

#[cfg(feature = "inmemory")]
mod backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Wire the service graph against the in-memory backend.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            tracing::info!("Using in-memory storage backend");

            // One store for the process; scopes share it through the
            // trait-object registration below.
            let store = InMemoryRepository::new();

            let mut registry = ServiceRegistry::new();
            registry.register_scoped(move |_scope| {
                let repository: DynForecastRepository = Arc::new(store.clone());
                Ok(Arc::new(repository))
            })?;
            register_services(&mut registry)?;

            Ok(Self {
                provider: registry.finalize(),
                config: config.clone(),
            })
        }
    }
}

#[cfg(feature = "postgres")]
mod backend {
    use super::*;
    use crate::storage::{PgContext, PostgresForecastRepository};

    impl AppState {
        /// Wire the service graph against the Postgres backend.
        pub async fn new(config: &Config) -> anyhow::Result<Self> {
            tracing::info!("Using Postgres storage backend");

            let context = PgContext::connect(config.connection_string()?).await?;
            context.init_schema().await?;

            let mut registry = ServiceRegistry::new();
            registry.register_singleton(Arc::new(context))?;
            registry.register_scoped(|scope| {
                let context = scope.resolve::<PgContext>()?;
                let repository: DynForecastRepository =
                    Arc::new(PostgresForecastRepository::new((*context).clone()));
                Ok(Arc::new(repository))
            })?;
            register_services(&mut registry)?;

            Ok(Self {
                provider: registry.finalize(),
                config: config.clone(),
            })
        }
    }
}
