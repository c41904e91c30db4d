use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Span;

use crate::domain::models::tenant::Tenant;
use crate::state::AppState;

/// Tenant resolved from the `?tenant=<subdomain>` query parameter of
/// public endpoints. Resolution happens once here; handlers receive the
/// row as plain data.
pub struct TenantParam(pub Tenant);

impl FromRequestParts<Arc<AppState>> for TenantParam {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Query<HashMap<String, String>> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let subdomain = params.get("tenant").ok_or(StatusCode::BAD_REQUEST)?;

        match state.tenant_repo.find_by_subdomain(subdomain).await {
            Ok(Some(tenant)) if tenant.is_active => {
                Span::current().record("tenant_id", &tenant.id);
                Ok(TenantParam(tenant))
            }
            Ok(_) => Err(StatusCode::NOT_FOUND),
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Tenant authenticated through the `X-Api-Key` header on tenant-scoped
/// management endpoints.
pub struct AuthedTenant(pub Tenant);

impl FromRequestParts<Arc<AppState>> for AuthedTenant {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get("X-Api-Key")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        match state.tenant_repo.find_by_api_token(api_key).await {
            Ok(Some(tenant)) if tenant.is_active => {
                Span::current().record("tenant_id", &tenant.id);
                Ok(AuthedTenant(tenant))
            }
            Ok(_) => Err(StatusCode::UNAUTHORIZED),
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
