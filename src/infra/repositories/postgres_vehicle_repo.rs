use crate::domain::{
    models::vehicle::{Brand, Vehicle, VehicleImage, VehicleModel, VehicleSitemapRow},
    ports::VehicleRepository,
};
use crate::domain::services::slug::slugify;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresVehicleRepo {
    pool: PgPool,
}

impl PostgresVehicleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepo {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (tenant_id, brand_id, model_id, version, fuel, year, price, mileage, color, transmission, description, url, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) RETURNING *"
        )
            .bind(&vehicle.tenant_id)
            .bind(vehicle.brand_id)
            .bind(vehicle.model_id)
            .bind(&vehicle.version)
            .bind(&vehicle.fuel)
            .bind(vehicle.year)
            .bind(vehicle.price)
            .bind(vehicle.mileage)
            .bind(&vehicle.color)
            .bind(&vehicle.transmission)
            .bind(&vehicle.description)
            .bind(&vehicle.url)
            .bind(&vehicle.status)
            .bind(vehicle.created_at)
            .bind(vehicle.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: i64) -> Result<Option<Vehicle>, AppError> {
        sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE tenant_id = $1 AND id = $2",
        )
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, tenant_id: &str, status: Option<&str>) -> Result<Vec<Vehicle>, AppError> {
        match status {
            Some(status) => sqlx::query_as::<_, Vehicle>(
                "SELECT * FROM vehicles WHERE tenant_id = $1 AND status = $2 ORDER BY created_at DESC",
            )
                .bind(tenant_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            None => sqlx::query_as::<_, Vehicle>(
                "SELECT * FROM vehicles WHERE tenant_id = $1 ORDER BY created_at DESC",
            )
                .bind(tenant_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
        }
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET brand_id=$1, model_id=$2, version=$3, fuel=$4, year=$5, price=$6, mileage=$7, color=$8, transmission=$9, description=$10, url=$11, status=$12, updated_at=$13 \
             WHERE tenant_id=$14 AND id=$15 RETURNING *"
        )
            .bind(vehicle.brand_id)
            .bind(vehicle.model_id)
            .bind(&vehicle.version)
            .bind(&vehicle.fuel)
            .bind(vehicle.year)
            .bind(vehicle.price)
            .bind(vehicle.mileage)
            .bind(&vehicle.color)
            .bind(&vehicle.transmission)
            .bind(&vehicle.description)
            .bind(&vehicle.url)
            .bind(&vehicle.status)
            .bind(Utc::now())
            .bind(&vehicle.tenant_id)
            .bind(vehicle.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, tenant_id: &str, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicle_images WHERE vehicle_id IN (SELECT id FROM vehicles WHERE tenant_id = $1 AND id = $2)")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM vehicles WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn get_or_create_brand(&self, name: &str) -> Result<Brand, AppError> {
        let slug = slugify(name);
        if let Some(brand) = sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE slug = $1")
            .bind(&slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
        {
            return Ok(brand);
        }

        sqlx::query_as::<_, Brand>("INSERT INTO brands (name, slug) VALUES ($1, $2) RETURNING *")
            .bind(name)
            .bind(&slug)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn get_or_create_model(&self, brand_id: i64, name: &str) -> Result<VehicleModel, AppError> {
        let slug = slugify(name);
        if let Some(model) = sqlx::query_as::<_, VehicleModel>(
            "SELECT * FROM vehicle_models WHERE brand_id = $1 AND slug = $2",
        )
            .bind(brand_id)
            .bind(&slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
        {
            return Ok(model);
        }

        sqlx::query_as::<_, VehicleModel>(
            "INSERT INTO vehicle_models (brand_id, name, slug) VALUES ($1, $2, $3) RETURNING *",
        )
            .bind(brand_id)
            .bind(name)
            .bind(&slug)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_brand(&self, id: i64) -> Result<Option<Brand>, AppError> {
        sqlx::query_as::<_, Brand>("SELECT * FROM brands WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_model(&self, id: i64) -> Result<Option<VehicleModel>, AppError> {
        sqlx::query_as::<_, VehicleModel>("SELECT * FROM vehicle_models WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn add_image(&self, image: &VehicleImage) -> Result<VehicleImage, AppError> {
        sqlx::query_as::<_, VehicleImage>(
            "INSERT INTO vehicle_images (vehicle_id, path, position, created_at) VALUES ($1, $2, $3, $4) RETURNING *",
        )
            .bind(image.vehicle_id)
            .bind(&image.path)
            .bind(image.position)
            .bind(image.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_images(&self, vehicle_id: i64) -> Result<Vec<VehicleImage>, AppError> {
        sqlx::query_as::<_, VehicleImage>(
            "SELECT * FROM vehicle_images WHERE vehicle_id = $1 ORDER BY position, id",
        )
            .bind(vehicle_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_vehicle_images(&self, tenant_id: &str) -> Result<Vec<VehicleImage>, AppError> {
        sqlx::query_as::<_, VehicleImage>(
            "SELECT vi.* FROM vehicle_images vi \
             JOIN vehicles v ON v.id = vi.vehicle_id \
             WHERE v.tenant_id = $1 AND v.status = 'active' \
             ORDER BY vi.vehicle_id, vi.position, vi.id",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_for_sitemap(&self, tenant_id: &str) -> Result<Vec<VehicleSitemapRow>, AppError> {
        sqlx::query_as::<_, VehicleSitemapRow>(
            "SELECT v.id, v.url, v.version, v.fuel, v.year, v.updated_at, b.name AS brand_name, m.name AS model_name \
             FROM vehicles v \
             JOIN brands b ON b.id = v.brand_id \
             JOIN vehicle_models m ON m.id = v.model_id \
             WHERE v.tenant_id = $1 AND v.status = 'active' \
             ORDER BY v.id",
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
