use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateLeadRequest;
use crate::api::extractors::tenant::{AuthedTenant, TenantParam};
use crate::domain::models::lead::Lead;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    TenantParam(tenant): TenantParam,
    Json(payload): Json<CreateLeadRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }

    if let Some(vehicle_id) = payload.vehicle_id {
        state.vehicle_repo.find_by_id(&tenant.id, vehicle_id).await?
            .ok_or(AppError::NotFound("Vehicle not found".into()))?;
    }

    let mut lead = Lead::new(tenant.id.clone(), payload.name, payload.email);
    lead.vehicle_id = payload.vehicle_id;
    lead.phone = payload.phone;
    lead.message = payload.message;
    lead.source = payload.source;

    let created = state.lead_repo.create(&lead).await?;
    info!(tenant_id = %tenant.id, lead_id = %created.id, "Lead captured");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_leads(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
) -> Result<impl IntoResponse, AppError> {
    let leads = state.lead_repo.list(&tenant.id).await?;
    Ok(Json(leads))
}
