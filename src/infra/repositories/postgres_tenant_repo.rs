use crate::domain::{models::tenant::Tenant, ports::TenantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTenantRepo {
    pool: PgPool,
}

impl PostgresTenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for PostgresTenantRepo {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (id, name, subdomain, custom_domain, logo_url, phone, email, address, city, state, postal_code, robots_txt, api_token, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *"
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
            "SELECT * FROM tenants WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE subdomain = $1",
        )
            .bind(subdomain)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_api_token(&self, api_token: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE api_token = $1",
        )
            .bind(api_token)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET name=$1, custom_domain=$2, logo_url=$3, phone=$4, email=$5, address=$6, city=$7, state=$8, postal_code=$9, robots_txt=$10, is_active=$11 WHERE id=$12 RETURNING *"
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
