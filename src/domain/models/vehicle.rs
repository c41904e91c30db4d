use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::services::slug::{slugify, vehicle_slug};

pub const VEHICLE_STATUSES: [&str; 3] = ["active", "sold", "inactive"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VehicleModel {
    pub id: i64,
    pub brand_id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Vehicle {
    pub id: i64,
    pub tenant_id: String,
    pub brand_id: i64,
    pub model_id: i64,
    pub version: Option<String>,
    pub fuel: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub mileage: Option<i32>,
    pub color: Option<String>,
    pub transmission: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Detail-page slug: the persisted `url` field when set, otherwise
    /// derived from brand, model, version, fuel, year and id.
    pub fn detail_slug(&self, brand_name: &str, model_name: &str) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => slugify(url),
            _ => vehicle_slug(
                brand_name,
                model_name,
                self.version.as_deref(),
                self.fuel.as_deref(),
                self.year,
                self.id,
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VehicleImage {
    pub id: i64,
    pub vehicle_id: i64,
    pub path: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Row shape used by the vehicles sitemap builder: the vehicle joined
/// with its brand and model names.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VehicleSitemapRow {
    pub id: i64,
    pub url: Option<String>,
    pub version: Option<String>,
    pub fuel: Option<String>,
    pub year: Option<i32>,
    pub updated_at: DateTime<Utc>,
    pub brand_name: String,
    pub model_name: String,
}

impl VehicleSitemapRow {
    pub fn detail_slug(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => slugify(url),
            _ => vehicle_slug(
                &self.brand_name,
                &self.model_name,
                self.version.as_deref(),
                self.fuel.as_deref(),
                self.year,
                self.id,
            ),
        }
    }
}

pub fn is_valid_vehicle_status(value: &str) -> bool {
    VEHICLE_STATUSES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> Vehicle {
        Vehicle {
            id: 49,
            tenant_id: "t1".into(),
            brand_id: 1,
            model_id: 2,
            version: None,
            fuel: None,
            year: Some(2023),
            price: Some(89990.0),
            mileage: Some(12000),
            color: Some("Branco".into()),
            transmission: Some("automatico".into()),
            description: None,
            url: None,
            status: "active".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_detail_slug_derived() {
        let v = vehicle();
        assert_eq!(v.detail_slug("VW", "Polo"), "vw-polo-2023-49");
    }

    #[test]
    fn test_detail_slug_prefers_persisted_url() {
        let mut v = vehicle();
        v.url = Some("vw-polo-highline-2023-49".into());
        assert_eq!(v.detail_slug("VW", "Polo"), "vw-polo-highline-2023-49");
    }
}
