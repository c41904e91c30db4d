use axum::{extract::{Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{ResolvePathQuery, TemplatesQuery, UpsertSeoUrlRequest};
use crate::api::dtos::responses::CanonicalRedirectResponse;
use crate::api::extractors::tenant::{AuthedTenant, TenantParam};
use crate::domain::models::seo_url::{SeoUrlRecord, CHANGE_FREQUENCIES, REDIRECT_TYPES, URL_TYPES};
use crate::domain::services::{resolver, templates::template_catalog};
use crate::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

pub const DEFAULT_LOCALE: &str = "pt-BR";
const MAX_PATH_LEN: usize = 512;

fn validate_path(path: &str) -> Result<(), AppError> {
    if path.is_empty() {
        return Err(AppError::Validation("Path must not be empty".into()));
    }
    if path.len() > MAX_PATH_LEN {
        return Err(AppError::Validation(format!("Path must not exceed {} characters", MAX_PATH_LEN)));
    }
    Ok(())
}

pub async fn resolve_path(
    State(state): State<Arc<AppState>>,
    TenantParam(tenant): TenantParam,
    Query(query): Query<ResolvePathQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_path(&query.path)?;
    let locale = query.locale.as_deref().unwrap_or(DEFAULT_LOCALE);

    let record = state
        .seo_url_repo
        .find(&tenant.id, locale, &query.path)
        .await
        .map_err(|e| {
            error!(
                tenant_id = %tenant.id,
                locale,
                path = %query.path,
                error = %e,
                "SEO path lookup failed"
            );
            e
        })?
        .ok_or(AppError::NotFound("Path not found".into()))?;

    if record.is_redirect() {
        return Ok(Json(resolver::redirect_payload(&record)));
    }

    let aggregated = resolver::load_aggregated_data(state.vehicle_repo.as_ref(), &record).await?;
    Ok(Json(resolver::resolved_payload(&record, &aggregated)))
}

pub async fn upsert_url(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Json(payload): Json<UpsertSeoUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_path(&payload.path)?;

    if !URL_TYPES.contains(&payload.url_type.as_str()) {
        return Err(AppError::Validation(format!("Unknown url type: {}", payload.url_type)));
    }
    if let Some(redirect_type) = payload.redirect_type.as_deref() {
        if !REDIRECT_TYPES.contains(&redirect_type) {
            return Err(AppError::Validation(format!("Unknown redirect type: {}", redirect_type)));
        }
    }
    if let Some(changefreq) = payload.sitemap_changefreq.as_deref() {
        if !CHANGE_FREQUENCIES.contains(&changefreq) {
            return Err(AppError::Validation(format!("Unknown changefreq: {}", changefreq)));
        }
    }
    if let Some(priority) = payload.sitemap_priority {
        if !(0.0..=1.0).contains(&priority) {
            return Err(AppError::Validation("Sitemap priority must be between 0.0 and 1.0".into()));
        }
    }

    let locale = payload.locale.clone().unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let mut record = SeoUrlRecord::new(
        tenant.id.clone(),
        locale,
        payload.path,
        payload.url_type,
        payload.canonical_url,
    );

    record.is_indexable = payload.is_indexable.unwrap_or(true);
    record.include_in_sitemap = payload.include_in_sitemap.unwrap_or(true);
    if let Some(priority) = payload.sitemap_priority {
        record.sitemap_priority = priority;
    }
    if let Some(changefreq) = payload.sitemap_changefreq {
        record.sitemap_changefreq = changefreq;
    }
    record.title = payload.title;
    record.meta_description = payload.meta_description;
    record.og_image = payload.og_image;
    record.breadcrumbs_json = payload.breadcrumbs.map(|v| v.to_string());
    record.structured_data_type = payload.structured_data_type;
    record.structured_data_json = payload.structured_data.map(|v| v.to_string());
    record.content_templates_json = payload.content_templates.map(|v| v.to_string());
    record.content_data_json = payload.content_data.map(|v| v.to_string());
    record.route_params_json = payload.route_params.map(|v| v.to_string());
    record.redirect_type = payload.redirect_type;
    record.redirect_target = payload.redirect_target;
    record.redirect_reason = payload.redirect_reason;
    record.previous_slug = payload.previous_slug;
    record.redirect_date = payload.redirect_date;

    record.enforce_redirect_flags();

    let (stored, created) = state.seo_url_repo.upsert(&record).await?;

    info!(
        tenant_id = %tenant.id,
        path = %stored.path,
        created,
        "SEO URL upserted"
    );

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(stored)))
}

#[derive(Deserialize)]
pub struct CanonicalQuery {
    pub path: String,
}

pub async fn canonical_redirect(
    State(state): State<Arc<AppState>>,
    TenantParam(tenant): TenantParam,
    Query(query): Query<CanonicalQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_path(&query.path)?;

    let record = state
        .seo_url_repo
        .find(&tenant.id, DEFAULT_LOCALE, &query.path)
        .await?
        .ok_or(AppError::NotFound("Path not found".into()))?;

    // Always reports 301; the record's redirect_type is not consulted here.
    Ok(Json(CanonicalRedirectResponse {
        canonical_url: record.canonical_url,
        status_code: 301,
    }))
}

pub async fn preview(
    State(state): State<Arc<AppState>>,
    TenantParam(tenant): TenantParam,
    Query(query): Query<ResolvePathQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_path(&query.path)?;
    let locale = query.locale.as_deref().unwrap_or(DEFAULT_LOCALE);

    let record = state
        .seo_url_repo
        .find(&tenant.id, locale, &query.path)
        .await?
        .ok_or(AppError::NotFound("Path not found".into()))?;

    Ok(Json(resolver::preview_payload(&record)))
}

pub async fn templates(
    Query(query): Query<TemplatesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = template_catalog(&query.content_type)
        .ok_or(AppError::NotFound(format!("No templates for type: {}", query.content_type)))?;
    Ok(Json(catalog))
}
