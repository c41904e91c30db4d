use axum::{extract::{State, Path}, http::{header, StatusCode}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateTenantRequest, UpdateRobotsRequest, UpdateTenantRequest},
    responses::TenantCreatedResponse,
};
use crate::api::extractors::{admin::AdminAuth, tenant::AuthedTenant};
use crate::domain::models::tenant::Tenant;
use crate::domain::services::slug::slugify;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.subdomain.is_empty() || slugify(&payload.subdomain) != payload.subdomain {
        return Err(AppError::Validation("Subdomain must be a lowercase slug".into()));
    }

    let mut tenant = Tenant::new(payload.name, payload.subdomain);
    tenant.custom_domain = payload.custom_domain;
    tenant.logo_url = payload.logo_url;

    let created = state.tenant_repo.create(&tenant).await?;
    info!("Tenant created: {} ({})", created.id, created.subdomain);

    Ok((
        StatusCode::CREATED,
        Json(TenantCreatedResponse {
            tenant_id: created.id,
            subdomain: created.subdomain,
            api_token: tenant.api_token,
        }),
    ))
}

pub async fn get_tenant_by_subdomain(
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_subdomain(&subdomain).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    Ok(Json(tenant))
}

pub async fn update_tenant(
    State(state): State<Arc<AppState>>,
    AuthedTenant(mut tenant): AuthedTenant,
    Json(payload): Json<UpdateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(name) = payload.name {
        tenant.name = name;
    }
    if let Some(domain) = payload.custom_domain {
        tenant.custom_domain = Some(domain);
    }
    if let Some(logo) = payload.logo_url {
        tenant.logo_url = Some(logo);
    }
    if let Some(phone) = payload.phone {
        tenant.phone = Some(phone);
    }
    if let Some(email) = payload.email {
        tenant.email = Some(email);
    }
    if let Some(address) = payload.address {
        tenant.address = Some(address);
    }
    if let Some(city) = payload.city {
        tenant.city = Some(city);
    }
    if let Some(st) = payload.state {
        tenant.state = Some(st);
    }
    if let Some(postal_code) = payload.postal_code {
        tenant.postal_code = Some(postal_code);
    }

    let updated = state.tenant_repo.update(&tenant).await?;
    info!("Tenant updated: {}", updated.id);
    Ok(Json(updated))
}

/// JSON-LD projection of the tenant profile, typed as a schema.org
/// AutoDealer.
pub async fn organization(
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_subdomain(&subdomain).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    let site_url = tenant.site_url(&state.config.base_domain);

    let mut organization = json!({
        "@context": "https://schema.org",
        "@type": "AutoDealer",
        "name": tenant.name,
        "url": site_url,
    });

    if let Some(logo) = &tenant.logo_url {
        organization["logo"] = json!(logo);
    }
    if let Some(phone) = &tenant.phone {
        organization["telephone"] = json!(phone);
    }
    if let Some(email) = &tenant.email {
        organization["email"] = json!(email);
    }
    if tenant.address.is_some() || tenant.city.is_some() || tenant.state.is_some() || tenant.postal_code.is_some() {
        organization["address"] = json!({
            "@type": "PostalAddress",
            "streetAddress": tenant.address,
            "addressLocality": tenant.city,
            "addressRegion": tenant.state,
            "postalCode": tenant.postal_code,
        });
    }

    Ok(Json(organization))
}

pub async fn get_robots(
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_subdomain(&subdomain).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        tenant.robots_txt_body(),
    ))
}

pub async fn update_robots(
    State(state): State<Arc<AppState>>,
    AuthedTenant(mut tenant): AuthedTenant,
    Json(payload): Json<UpdateRobotsRequest>,
) -> Result<impl IntoResponse, AppError> {
    tenant.robots_txt = Some(payload.robots_txt);
    let updated = state.tenant_repo.update(&tenant).await?;
    info!("robots.txt updated for tenant {}", updated.id);
    Ok(Json(json!({ "status": "updated" })))
}
