use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub subdomain: String,
    pub custom_domain: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub custom_domain: Option<String>,
    pub logo_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRobotsRequest {
    pub robots_txt: String,
}

#[derive(Deserialize)]
pub struct UpsertSeoUrlRequest {
    pub path: String,
    pub locale: Option<String>,
    pub url_type: String,
    pub canonical_url: String,
    pub is_indexable: Option<bool>,
    pub include_in_sitemap: Option<bool>,
    pub sitemap_priority: Option<f64>,
    pub sitemap_changefreq: Option<String>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
    pub breadcrumbs: Option<Value>,
    pub structured_data_type: Option<String>,
    pub structured_data: Option<Value>,
    pub content_templates: Option<Value>,
    pub content_data: Option<Value>,
    pub route_params: Option<Value>,
    pub redirect_type: Option<String>,
    pub redirect_target: Option<String>,
    pub redirect_reason: Option<String>,
    pub previous_slug: Option<String>,
    pub redirect_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct ResolvePathQuery {
    pub path: String,
    pub locale: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplatesQuery {
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Deserialize)]
pub struct CreateSitemapConfigRequest {
    #[serde(rename = "type")]
    pub sitemap_type: String,
    pub url: String,
    pub is_active: Option<bool>,
    pub priority: Option<f64>,
    pub change_frequency: Option<String>,
    pub config_data: Option<Value>,
}

#[derive(Deserialize)]
pub struct UpdateSitemapConfigRequest {
    pub url: Option<String>,
    pub is_active: Option<bool>,
    pub priority: Option<f64>,
    pub change_frequency: Option<String>,
    pub config_data: Option<Value>,
}

#[derive(Deserialize, Default)]
pub struct GenerateSitemapRequest {
    #[serde(rename = "type")]
    pub sitemap_type: Option<String>,
    pub force: Option<bool>,
}

#[derive(Deserialize)]
pub struct AdminSitemapQuery {
    #[serde(rename = "type")]
    pub url_type: Option<String>,
    pub format: Option<String>,
}

#[derive(Deserialize)]
pub struct SitemapFileQuery {
    #[serde(rename = "type")]
    pub sitemap_type: String,
}

#[derive(Deserialize)]
pub struct CreateVehicleRequest {
    pub brand: String,
    pub model: String,
    pub version: Option<String>,
    pub fuel: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub mileage: Option<i32>,
    pub color: Option<String>,
    pub transmission: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateVehicleRequest {
    pub version: Option<String>,
    pub fuel: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub mileage: Option<i32>,
    pub color: Option<String>,
    pub transmission: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ListVehiclesQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct AddVehicleImageRequest {
    pub path: String,
    pub position: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub vehicle_id: Option<i64>,
}
