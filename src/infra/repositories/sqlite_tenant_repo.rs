use crate::domain::{models::tenant::Tenant, ports::TenantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTenantRepo {
    pool: SqlitePool,
}

impl SqliteTenantRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for SqliteTenantRepo {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (id, name, subdomain, custom_domain, logo_url, phone, email, address, city, state, postal_code, robots_txt, api_token, is_active, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&tenant.id)
            .bind(&tenant.name)
            .bind(&tenant.subdomain)
            .bind(&tenant.custom_domain)
            .bind(&tenant.logo_url)
            .bind(&tenant.phone)
            .bind(&tenant.email)
            .bind(&tenant.address)
            .bind(&tenant.city)
            .bind(&tenant.state)
            .bind(&tenant.postal_code)
            .bind(&tenant.robots_txt)
            .bind(&tenant.api_token)
            .bind(tenant.is_active)
            .bind(tenant.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE subdomain = ?",
        )
            .bind(subdomain)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_api_token(&self, api_token: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE api_token = ?",
        )
            .bind(api_token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET name=?, custom_domain=?, logo_url=?, phone=?, email=?, address=?, city=?, state=?, postal_code=?, robots_txt=?, is_active=? WHERE id=? RETURNING *"
        )
            .bind(&tenant.name)
            .bind(&tenant.custom_domain)
            .bind(&tenant.logo_url)
            .bind(&tenant.phone)
            .bind(&tenant.email)
            .bind(&tenant.address)
            .bind(&tenant.city)
            .bind(&tenant.state)
            .bind(&tenant.postal_code)
            .bind(&tenant.robots_txt)
            .bind(tenant.is_active)
            .bind(&tenant.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
