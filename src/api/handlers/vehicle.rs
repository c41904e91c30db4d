use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{
    AddVehicleImageRequest, CreateVehicleRequest, ListVehiclesQuery, UpdateVehicleRequest,
};
use crate::api::extractors::tenant::AuthedTenant;
use crate::domain::models::vehicle::{is_valid_vehicle_status, Vehicle, VehicleImage};
use crate::error::AppError;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.brand.trim().is_empty() || payload.model.trim().is_empty() {
        return Err(AppError::Validation("Brand and model are required".into()));
    }
    let status = payload.status.unwrap_or_else(|| "active".to_string());
    if !is_valid_vehicle_status(&status) {
        return Err(AppError::Validation(format!("Unknown vehicle status: {}", status)));
    }

    let brand = state.vehicle_repo.get_or_create_brand(payload.brand.trim()).await?;
    let model = state.vehicle_repo.get_or_create_model(brand.id, payload.model.trim()).await?;

    let now = Utc::now();
    let vehicle = Vehicle {
        id: 0, // assigned by the database
        tenant_id: tenant.id.clone(),
        brand_id: brand.id,
        model_id: model.id,
        version: payload.version,
        fuel: payload.fuel,
        year: payload.year,
        price: payload.price,
        mileage: payload.mileage,
        color: payload.color,
        transmission: payload.transmission,
        description: payload.description,
        url: payload.url,
        status,
        created_at: now,
        updated_at: now,
    };

    let created = state.vehicle_repo.create(&vehicle).await?;
    info!(tenant_id = %tenant.id, vehicle_id = created.id, "Vehicle created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Query(query): Query<ListVehiclesQuery>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(status) = query.status.as_deref() {
        if !is_valid_vehicle_status(status) {
            return Err(AppError::Validation(format!("Unknown vehicle status: {}", status)));
        }
    }
    let vehicles = state.vehicle_repo.list(&tenant.id, query.status.as_deref()).await?;
    Ok(Json(vehicles))
}

pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = state.vehicle_repo.find_by_id(&tenant.id, id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;
    Ok(Json(vehicle))
}

pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut vehicle = state.vehicle_repo.find_by_id(&tenant.id, id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;

    if let Some(status) = payload.status {
        if !is_valid_vehicle_status(&status) {
            return Err(AppError::Validation(format!("Unknown vehicle status: {}", status)));
        }
        vehicle.status = status;
    }
    if let Some(version) = payload.version {
        vehicle.version = Some(version);
    }
    if let Some(fuel) = payload.fuel {
        vehicle.fuel = Some(fuel);
    }
    if let Some(year) = payload.year {
        vehicle.year = Some(year);
    }
    if let Some(price) = payload.price {
        vehicle.price = Some(price);
    }
    if let Some(mileage) = payload.mileage {
        vehicle.mileage = Some(mileage);
    }
    if let Some(color) = payload.color {
        vehicle.color = Some(color);
    }
    if let Some(transmission) = payload.transmission {
        vehicle.transmission = Some(transmission);
    }
    if let Some(description) = payload.description {
        vehicle.description = Some(description);
    }
    if let Some(url) = payload.url {
        vehicle.url = Some(url);
    }

    let updated = state.vehicle_repo.update(&vehicle).await?;
    info!(tenant_id = %tenant.id, vehicle_id = id, "Vehicle updated");
    Ok(Json(updated))
}

pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.vehicle_repo.find_by_id(&tenant.id, id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;

    state.vehicle_repo.delete(&tenant.id, id).await?;
    info!(tenant_id = %tenant.id, vehicle_id = id, "Vehicle deleted");
    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn add_image(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<i64>,
    Json(payload): Json<AddVehicleImageRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.path.trim().is_empty() {
        return Err(AppError::Validation("Image path is required".into()));
    }

    state.vehicle_repo.find_by_id(&tenant.id, id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;

    let image = VehicleImage {
        id: 0, // assigned by the database
        vehicle_id: id,
        path: payload.path,
        position: payload.position.unwrap_or(0),
        created_at: Utc::now(),
    };

    let created = state.vehicle_repo.add_image(&image).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_images(
    State(state): State<Arc<AppState>>,
    AuthedTenant(tenant): AuthedTenant,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.vehicle_repo.find_by_id(&tenant.id, id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;

    let images = state.vehicle_repo.list_images(id).await?;
    Ok(Json(images))
}
