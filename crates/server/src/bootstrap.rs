use std::sync::Arc;

use outfitter_core::config::{AppConfig, ConfigError, LoadOptions};
use outfitter_core::service::{CatalogManagementService, OutfitQueryService};
use outfitter_db::{
    connect_with_settings, migrations, CatalogSeed, DbPool, RepositoryError, SeedOutcome,
    SqlCatalogRepository,
};
use thiserror::Error;
use tracing::info;

use crate::api::ApiState;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub api: ApiState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("catalog seeding failed: {0}")]
    Seed(#[source] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    if config.seed.on_startup {
        let outcome = CatalogSeed::load(&db_pool).await.map_err(BootstrapError::Seed)?;
        info!(
            event_name = "system.bootstrap.seeded",
            correlation_id = "bootstrap",
            already_seeded = matches!(outcome, SeedOutcome::AlreadySeeded { .. }),
            "startup seeding finished"
        );
    }

    let repository = Arc::new(SqlCatalogRepository::new(db_pool.clone()));
    let api = ApiState::new(
        OutfitQueryService::new(repository.clone()),
        CatalogManagementService::new(repository),
    );

    Ok(Application { config, db_pool, api })
}

#[cfg(test)]
mod tests {
    use outfitter_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::{bootstrap, BootstrapError};

    fn overrides(database_url: &str, seed: bool) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some(database_url.to_string()),
                seed_on_startup: Some(seed),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_rejects_non_sqlite_database_urls() {
        let result = bootstrap(overrides("postgres://localhost/outfitter", false)).await;

        let Err(BootstrapError::Config(error)) = result else {
            panic!("expected config error");
        };
        assert!(error.to_string().contains("database.url"));
    }

    #[tokio::test]
    async fn bootstrap_with_seed_serves_the_seed_outfit() {
        let app = bootstrap(overrides("sqlite::memory:", true))
            .await
            .expect("bootstrap should succeed with valid overrides");

        let outfit = app.api.queries.lowest_by_category().await.expect("outfit");
        assert_eq!(outfit.total_price, 34100);

        app.db_pool.close().await;
    }

    #[tokio::test]
    async fn bootstrap_without_seed_leaves_catalog_empty() {
        let app = bootstrap(overrides("sqlite::memory:", false)).await.expect("bootstrap");

        let categories = app.api.management.list_categories().await.expect("categories");
        assert!(categories.is_empty());

        app.db_pool.close().await;
    }
}
