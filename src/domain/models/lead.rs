use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Lead {
    pub id: String,
    pub tenant_id: String,
    pub vehicle_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(tenant_id: String, name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            vehicle_id: None,
            name,
            email,
            phone: None,
            message: None,
            source: None,
            created_at: Utc::now(),
        }
    }
}
