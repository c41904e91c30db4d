use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::models::seo_url::CHANGE_FREQUENCIES;

pub const SITEMAP_TYPES: [&str; 6] = ["index", "images", "videos", "articles", "vehicles", "pages"];

/// Tenant-declared sitemap: which document exists, where it is published
/// and with what refresh hints.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TenantSitemapConfig {
    pub id: String,
    pub tenant_id: String,
    pub sitemap_type: String,
    pub url: String,
    pub is_active: bool,
    pub priority: f64,
    pub change_frequency: String,
    pub config_data_json: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantSitemapConfig {
    pub fn new(tenant_id: String, sitemap_type: String, url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            sitemap_type,
            url,
            is_active: true,
            priority: 0.5,
            change_frequency: "weekly".to_string(),
            config_data_json: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

pub fn is_valid_sitemap_type(value: &str) -> bool {
    SITEMAP_TYPES.contains(&value)
}

pub fn is_valid_changefreq(value: &str) -> bool {
    CHANGE_FREQUENCIES.contains(&value)
}
