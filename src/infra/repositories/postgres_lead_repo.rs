use crate::domain::{models::lead::Lead, ports::LeadRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresLeadRepo {
    pool: PgPool,
}

impl PostgresLeadRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for PostgresLeadRepo {
    async fn create(&self, lead: &Lead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (id, tenant_id, vehicle_id, name, email, phone, message, source, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *"
        )
            .bind(&lead.id)
            .bind(&lead.tenant_id)
            .bind(lead.vehicle_id)
            .bind(&lead.name)
            .bind(&lead.email)
            .bind(&lead.phone)
            .bind(&lead.message)
            .bind(&lead.source)
            .bind(lead.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<Lead>, AppError> {
        sqlx::query_as::<_, Lead>(
            "SELECT * FROM leads WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
