use autosite_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::services::sitemap::SitemapGenerator,
    infra::repositories::{
        sqlite_tenant_repo::SqliteTenantRepo,
        sqlite_seo_url_repo::SqliteSeoUrlRepo,
        sqlite_sitemap_config_repo::SqliteSitemapConfigRepo,
        sqlite_vehicle_repo::SqliteVehicleRepo,
        sqlite_lead_repo::SqliteLeadRepo,
    },
    infra::storage::fs_sitemap_storage::FsSitemapStorage,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_TOKEN: &str = "test-admin-token";

#[allow(dead_code)]
pub struct TestTenant {
    pub tenant_id: String,
    pub subdomain: String,
    pub api_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub sitemap_dir: PathBuf,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);
        let sitemap_dir = std::env::temp_dir().join(format!("sitemaps_{}", Uuid::new_v4()));

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            app_url: "http://localhost:3000".to_string(),
            base_domain: "autosite.test".to_string(),
            asset_host: "https://api.autosite.test".to_string(),
            admin_api_token: ADMIN_TOKEN.to_string(),
            sitemap_storage_dir: sitemap_dir.to_string_lossy().to_string(),
        };

        let tenant_repo = Arc::new(SqliteTenantRepo::new(pool.clone()));
        let seo_url_repo = Arc::new(SqliteSeoUrlRepo::new(pool.clone()));
        let sitemap_config_repo = Arc::new(SqliteSitemapConfigRepo::new(pool.clone()));
        let vehicle_repo = Arc::new(SqliteVehicleRepo::new(pool.clone()));
        let lead_repo = Arc::new(SqliteLeadRepo::new(pool.clone()));
        let sitemap_storage = Arc::new(FsSitemapStorage::new(sitemap_dir.clone()));

        let sitemap_generator = Arc::new(SitemapGenerator::new(
            vehicle_repo.clone(),
            sitemap_config_repo.clone(),
            sitemap_storage.clone(),
            config.app_url.clone(),
            config.base_domain.clone(),
            config.asset_host.clone(),
        ));

        let state = Arc::new(AppState {
            config: config.clone(),
            tenant_repo,
            seo_url_repo,
            sitemap_config_repo,
            vehicle_repo,
            lead_repo,
            sitemap_storage,
            sitemap_generator,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            sitemap_dir,
            state,
        }
    }

    pub async fn create_tenant(&self, name: &str, subdomain: &str) -> TestTenant {
        let payload = serde_json::json!({
            "name": name,
            "subdomain": subdomain
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tenants")
                .header("X-Admin-Token", ADMIN_TOKEN)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Tenant creation failed in test helper: status {}", response.status());
        }

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();

        TestTenant {
            tenant_id: body_json["tenant_id"].as_str().expect("No tenant_id in body").to_string(),
            subdomain: body_json["subdomain"].as_str().expect("No subdomain in body").to_string(),
            api_token: body_json["api_token"].as_str().expect("No api_token in body").to_string(),
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_dir_all(&self.sitemap_dir);
    }
}
