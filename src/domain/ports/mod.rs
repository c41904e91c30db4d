use crate::domain::models::{
    tenant::Tenant,
    seo_url::SeoUrlRecord,
    sitemap::TenantSitemapConfig,
    vehicle::{Brand, Vehicle, VehicleImage, VehicleModel, VehicleSitemapRow},
    lead::Lead,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_by_api_token(&self, api_token: &str) -> Result<Option<Tenant>, AppError>;
    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
}

#[async_trait]
pub trait SeoUrlRepository: Send + Sync {
    /// Insert or update keyed on (tenant_id, locale, path). Returns the
    /// stored record and whether a new row was created.
    async fn upsert(&self, record: &SeoUrlRecord) -> Result<(SeoUrlRecord, bool), AppError>;
    async fn find(&self, tenant_id: &str, locale: &str, path: &str) -> Result<Option<SeoUrlRecord>, AppError>;
    /// Active records flagged for sitemap inclusion, optionally narrowed
    /// to one url_type.
    async fn list_sitemap_entries(&self, tenant_id: &str, url_type: Option<&str>) -> Result<Vec<SeoUrlRecord>, AppError>;
}

#[async_trait]
pub trait SitemapConfigRepository: Send + Sync {
    async fn create(&self, config: &TenantSitemapConfig) -> Result<TenantSitemapConfig, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<TenantSitemapConfig>, AppError>;
    async fn find_active_by_type(&self, tenant_id: &str, sitemap_type: &str) -> Result<Option<TenantSitemapConfig>, AppError>;
    async fn list(&self, tenant_id: &str) -> Result<Vec<TenantSitemapConfig>, AppError>;
    async fn list_active(&self, tenant_id: &str) -> Result<Vec<TenantSitemapConfig>, AppError>;
    async fn update(&self, config: &TenantSitemapConfig) -> Result<TenantSitemapConfig, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: i64) -> Result<Option<Vehicle>, AppError>;
    async fn list(&self, tenant_id: &str, status: Option<&str>) -> Result<Vec<Vehicle>, AppError>;
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn delete(&self, tenant_id: &str, id: i64) -> Result<(), AppError>;

    async fn get_or_create_brand(&self, name: &str) -> Result<Brand, AppError>;
    async fn get_or_create_model(&self, brand_id: i64, name: &str) -> Result<VehicleModel, AppError>;
    async fn find_brand(&self, id: i64) -> Result<Option<Brand>, AppError>;
    async fn find_model(&self, id: i64) -> Result<Option<VehicleModel>, AppError>;

    async fn add_image(&self, image: &VehicleImage) -> Result<VehicleImage, AppError>;
    async fn list_images(&self, vehicle_id: i64) -> Result<Vec<VehicleImage>, AppError>;
    /// Images belonging to the tenant's active vehicles, for the images sitemap.
    async fn list_active_vehicle_images(&self, tenant_id: &str) -> Result<Vec<VehicleImage>, AppError>;
    /// Active vehicles joined with brand/model names, for the vehicles sitemap.
    async fn list_active_for_sitemap(&self, tenant_id: &str) -> Result<Vec<VehicleSitemapRow>, AppError>;
}

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create(&self, lead: &Lead) -> Result<Lead, AppError>;
    async fn list(&self, tenant_id: &str) -> Result<Vec<Lead>, AppError>;
}

/// Side-effect port for generated sitemap documents. Paths are relative
/// to the storage root (e.g. "tenant_{id}/sitemap-vehicles.xml").
#[async_trait]
pub trait SitemapStorage: Send + Sync {
    async fn write(&self, relative_path: &str, content: &str) -> Result<(), AppError>;
    async fn read(&self, relative_path: &str) -> Result<Option<String>, AppError>;
    async fn exists(&self, relative_path: &str) -> Result<bool, AppError>;
    async fn modified_at(&self, relative_path: &str) -> Result<Option<DateTime<Utc>>, AppError>;
}
