use axum::{extract::{Path, Query, State}, http::{header, StatusCode}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{
    AdminSitemapQuery, CreateSitemapConfigRequest, GenerateSitemapRequest,
    SitemapFileQuery, UpdateSitemapConfigRequest,
};
use crate::api::extractors::{admin::AdminAuth, tenant::{AuthedTenant, TenantParam}};
use crate::domain::models::sitemap::{is_valid_changefreq, is_valid_sitemap_type, TenantSitemapConfig};
use crate::domain::services::sitemap::{build_urlset, index_path, type_path, SitemapUrl};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

pub async fn list_configs(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
) -> Result<impl IntoResponse, AppError> {
    let configs = state.sitemap_config_repo.list(&tenant.id).await?;
    Ok(Json(configs))
}

pub async fn create_config(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Json(payload): Json<CreateSitemapConfigRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_sitemap_type(&payload.sitemap_type) {
        return Err(AppError::Validation(format!("Unknown sitemap type: {}", payload.sitemap_type)));
    }
    if let Some(changefreq) = payload.change_frequency.as_deref() {
        if !is_valid_changefreq(changefreq) {
            return Err(AppError::Validation(format!("Unknown changefreq: {}", changefreq)));
        }
    }
    if let Some(priority) = payload.priority {
        if !(0.0..=1.0).contains(&priority) {
            return Err(AppError::Validation("Priority must be between 0.0 and 1.0".into()));
        }
    }

    let mut config = TenantSitemapConfig::new(tenant.id.clone(), payload.sitemap_type, payload.url);
    if let Some(is_active) = payload.is_active {
        config.is_active = is_active;
    }
    if let Some(priority) = payload.priority {
        config.priority = priority;
    }
    if let Some(changefreq) = payload.change_frequency {
        config.change_frequency = changefreq;
    }
    config.config_data_json = payload.config_data.map(|v| v.to_string());

    let created = state.sitemap_config_repo.create(&config).await?;
    info!(
        tenant_id = %tenant.id,
        sitemap_type = %created.sitemap_type,
        "Sitemap config created"
    );

    // Creation kicks off a full regeneration for the tenant. A failure
    // here is logged and does not undo the created config.
    if let Err(e) = state.sitemap_generator.generate_all(&tenant, false).await {
        error!(
            tenant_id = %tenant.id,
            error = %e,
            "Sitemap generation after config creation failed"
        );
    }

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let config = state.sitemap_config_repo.find_by_id(&tenant.id, &id).await?
        .ok_or(AppError::NotFound("Sitemap config not found".into()))?;
    Ok(Json(config))
}

pub async fn update_config(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSitemapConfigRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut config = state.sitemap_config_repo.find_by_id(&tenant.id, &id).await?
        .ok_or(AppError::NotFound("Sitemap config not found".into()))?;

    if let Some(changefreq) = payload.change_frequency.as_deref() {
        if !is_valid_changefreq(changefreq) {
            return Err(AppError::Validation(format!("Unknown changefreq: {}", changefreq)));
        }
    }

    if let Some(url) = payload.url {
        config.url = url;
    }
    if let Some(is_active) = payload.is_active {
        config.is_active = is_active;
    }
    if let Some(priority) = payload.priority {
        if !(0.0..=1.0).contains(&priority) {
            return Err(AppError::Validation("Priority must be between 0.0 and 1.0".into()));
        }
        config.priority = priority;
    }
    if let Some(changefreq) = payload.change_frequency {
        config.change_frequency = changefreq;
    }
    if let Some(config_data) = payload.config_data {
        config.config_data_json = Some(config_data.to_string());
    }

    let updated = state.sitemap_config_repo.update(&config).await?;
    info!(tenant_id = %tenant.id, config_id = %id, "Sitemap config updated");
    Ok(Json(updated))
}

pub async fn delete_config(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.sitemap_config_repo.find_by_id(&tenant.id, &id).await?
        .ok_or(AppError::NotFound("Sitemap config not found".into()))?;

    state.sitemap_config_repo.delete(&tenant.id, &id).await?;
    info!(tenant_id = %tenant.id, config_id = %id, "Sitemap config deleted");
    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    payload: Option<Json<GenerateSitemapRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let force = payload.force.unwrap_or(false);

    match payload.sitemap_type.as_deref() {
        Some(sitemap_type) => {
            let config = state
                .sitemap_config_repo
                .find_active_by_type(&tenant.id, sitemap_type)
                .await?
                .ok_or(AppError::NotFound("Sitemap config not found".into()))?;

            let outcome = state.sitemap_generator.generate_type(&tenant, &config, force).await?;
            Ok(Json(serde_json::to_value(outcome).map_err(|_| AppError::Internal)?))
        }
        None => {
            let outcome = state.sitemap_generator.generate_all(&tenant, force).await?;
            Ok(Json(serde_json::to_value(outcome).map_err(|_| AppError::Internal)?))
        }
    }
}

pub async fn sitemap_index(
    State(state): State<Arc<AppState>>,
    TenantParam(tenant): TenantParam,
) -> Result<impl IntoResponse, AppError> {
    let (xml, count) = state.sitemap_generator.build_index(&tenant).await?;
    info!(tenant_id = %tenant.id, entries = count, "Sitemap index served");
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml))
}

pub async fn sitemap_file(
    State(state): State<Arc<AppState>>,
    TenantParam(tenant): TenantParam,
    Query(query): Query<SitemapFileQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_sitemap_type(&query.sitemap_type) {
        return Err(AppError::Validation(format!("Unknown sitemap type: {}", query.sitemap_type)));
    }

    let relative_path = if query.sitemap_type == "index" {
        index_path(&tenant.id)
    } else {
        type_path(&tenant.id, &query.sitemap_type)
    };

    let content = state.sitemap_storage.read(&relative_path).await?
        .ok_or(AppError::NotFound("Sitemap file not found".into()))?;

    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], content))
}

/// Super-admin view over the URL-record table: the eligible records of a
/// tenant rendered as one urlset, in XML or JSON.
pub async fn admin_sitemap(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
    TenantParam(tenant): TenantParam,
    Query(query): Query<AdminSitemapQuery>,
) -> Result<axum::response::Response, AppError> {
    if let Some(url_type) = query.url_type.as_deref() {
        if !crate::domain::models::seo_url::URL_TYPES.contains(&url_type) {
            return Err(AppError::Validation(format!("Unknown url type: {}", url_type)));
        }
    }

    let records = state
        .seo_url_repo
        .list_sitemap_entries(&tenant.id, query.url_type.as_deref())
        .await
        .map_err(|e| {
            error!(tenant_id = %tenant.id, error = %e, "Admin sitemap listing failed");
            e
        })?;

    let urls: Vec<SitemapUrl> = records
        .iter()
        .map(|record| SitemapUrl {
            loc: record.canonical_url.clone(),
            lastmod: Some(record.lastmod),
            changefreq: Some(record.sitemap_changefreq.clone()),
            priority: Some(record.sitemap_priority),
        })
        .collect();

    match query.format.as_deref() {
        Some("json") => Ok(Json(json!({
            "tenant": tenant.subdomain,
            "url_count": urls.len(),
            "urls": urls,
        })).into_response()),
        Some("xml") | None => {
            let xml = build_urlset(&urls);
            Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response())
        }
        Some(other) => {
            warn!(format = other, "Unknown sitemap format requested");
            Err(AppError::Validation(format!("Unknown format: {}", other)))
        }
    }
}
