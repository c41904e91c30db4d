use crate::domain::{models::sitemap::TenantSitemapConfig, ports::SitemapConfigRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresSitemapConfigRepo {
    pool: PgPool,
}

impl PostgresSitemapConfigRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SitemapConfigRepository for PostgresSitemapConfigRepo {
    async fn create(&self, config: &TenantSitemapConfig) -> Result<TenantSitemapConfig, AppError> {
        sqlx::query_as::<_, TenantSitemapConfig>(
            "INSERT INTO sitemap_configs (id, tenant_id, sitemap_type, url, is_active, priority, change_frequency, config_data_json, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *"
        )
            .bind(&config.id)
            .bind(&config.tenant_id)
            .bind(&config.sitemap_type)
            .bind(&config.url)
            .bind(config.is_active)
            .bind(config.priority)
            .bind(&config.change_frequency)
            .bind(&config.config_data_json)
            .bind(config.created_at)
            .bind(config.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<TenantSitemapConfig>, AppError> {
        sqlx::query_as::<_, TenantSitemapConfig>(
            "SELECT * FROM sitemap_configs WHERE tenant_id = $1 AND id = $2",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_type(&self, tenant_id: &str, sitemap_type: &str) -> Result<Option<TenantSitemapConfig>, AppError> {
        sqlx::query_as::<_, TenantSitemapConfig>(
            "SELECT * FROM sitemap_configs WHERE tenant_id = $1 AND sitemap_type = $2 AND is_active = TRUE LIMIT 1",
        )
            .bind(tenant_id)
            .bind(sitemap_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<TenantSitemapConfig>, AppError> {
        sqlx::query_as::<_, TenantSitemapConfig>(
            "SELECT * FROM sitemap_configs WHERE tenant_id = $1 ORDER BY created_at",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active(&self, tenant_id: &str) -> Result<Vec<TenantSitemapConfig>, AppError> {
        sqlx::query_as::<_, TenantSitemapConfig>(
            "SELECT * FROM sitemap_configs WHERE tenant_id = $1 AND is_active = TRUE ORDER BY created_at",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, config: &TenantSitemapConfig) -> Result<TenantSitemapConfig, AppError> {
        sqlx::query_as::<_, TenantSitemapConfig>(
            "UPDATE sitemap_configs SET sitemap_type=$1, url=$2, is_active=$3, priority=$4, change_frequency=$5, config_data_json=$6, updated_at=$7 \
             WHERE tenant_id=$8 AND id=$9 RETURNING *"
        )
            .bind(&config.sitemap_type)
            .bind(&config.url)
            .bind(config.is_active)
            .bind(config.priority)
            .bind(&config.change_frequency)
            .bind(&config.config_data_json)
            .bind(Utc::now())
            .bind(&config.tenant_id)
            .bind(&config.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sitemap_configs WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }
}
