use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::sitemap::SitemapGenerator;
use crate::infra::storage::fs_sitemap_storage::FsSitemapStorage;
use crate::infra::repositories::{
    postgres_tenant_repo::PostgresTenantRepo, postgres_seo_url_repo::PostgresSeoUrlRepo,
    postgres_sitemap_config_repo::PostgresSitemapConfigRepo, postgres_vehicle_repo::PostgresVehicleRepo,
    postgres_lead_repo::PostgresLeadRepo,
    sqlite_tenant_repo::SqliteTenantRepo, sqlite_seo_url_repo::SqliteSeoUrlRepo,
    sqlite_sitemap_config_repo::SqliteSitemapConfigRepo, sqlite_vehicle_repo::SqliteVehicleRepo,
    sqlite_lead_repo::SqliteLeadRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let sitemap_storage = Arc::new(FsSitemapStorage::new(config.sitemap_storage_dir.clone()));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let tenant_repo = Arc::new(PostgresTenantRepo::new(pool.clone()));
        let seo_url_repo = Arc::new(PostgresSeoUrlRepo::new(pool.clone()));
        let sitemap_config_repo = Arc::new(PostgresSitemapConfigRepo::new(pool.clone()));
        let vehicle_repo = Arc::new(PostgresVehicleRepo::new(pool.clone()));
        let lead_repo = Arc::new(PostgresLeadRepo::new(pool.clone()));

        let sitemap_generator = Arc::new(SitemapGenerator::new(
            vehicle_repo.clone(),
            sitemap_config_repo.clone(),
            sitemap_storage.clone(),
            config.app_url.clone(),
            config.base_domain.clone(),
            config.asset_host.clone(),
        ));

        AppState {
            config: config.clone(),
            tenant_repo,
            seo_url_repo,
            sitemap_config_repo,
            vehicle_repo,
            lead_repo,
            sitemap_storage,
            sitemap_generator,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let tenant_repo = Arc::new(SqliteTenantRepo::new(pool.clone()));
        let seo_url_repo = Arc::new(SqliteSeoUrlRepo::new(pool.clone()));
        let sitemap_config_repo = Arc::new(SqliteSitemapConfigRepo::new(pool.clone()));
        let vehicle_repo = Arc::new(SqliteVehicleRepo::new(pool.clone()));
        let lead_repo = Arc::new(SqliteLeadRepo::new(pool.clone()));

        let sitemap_generator = Arc::new(SitemapGenerator::new(
            vehicle_repo.clone(),
            sitemap_config_repo.clone(),
            sitemap_storage.clone(),
            config.app_url.clone(),
            config.base_domain.clone(),
            config.asset_host.clone(),
        ));

        AppState {
            config: config.clone(),
            tenant_repo,
            seo_url_repo,
            sitemap_config_repo,
            vehicle_repo,
            lead_repo,
            sitemap_storage,
            sitemap_generator,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
