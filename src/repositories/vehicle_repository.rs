use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleFilters;
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::AppError;

/// Datos ya validados para insertar un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub license_plate: String,
    pub model: String,
    pub vehicle_type: VehicleType,
    pub max_load_capacity: f64,
    pub current_odometer: f64,
    pub status: VehicleStatus,
    pub region: String,
    pub acquisition_cost: Decimal,
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, name, license_plate, model, vehicle_type, max_load_capacity,
                current_odometer, status, region, acquisition_cost,
                total_fuel_cost, total_maintenance_cost, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, 0, $11, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.name)
        .bind(vehicle.license_plate)
        .bind(vehicle.model)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.max_load_capacity)
        .bind(vehicle.current_odometer)
        .bind(vehicle.status)
        .bind(vehicle.region)
        .bind(vehicle.acquisition_cost)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_all(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM vehicles WHERE TRUE");

        if let Some(vehicle_type) = filters.vehicle_type {
            query.push(" AND vehicle_type = ").push_bind(vehicle_type);
        }
        if let Some(status) = filters.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(region) = &filters.region {
            query.push(" AND region = ").push_bind(region.clone());
        }
        query.push(" ORDER BY created_at DESC");

        let vehicles = query
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Persiste los campos editables; los totales de costos no se tocan aquí
    pub async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, license_plate = $3, model = $4, vehicle_type = $5,
                max_load_capacity = $6, current_odometer = $7, status = $8,
                region = $9, acquisition_cost = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.model)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.max_load_capacity)
        .bind(vehicle.current_odometer)
        .bind(vehicle.status)
        .bind(&vehicle.region)
        .bind(vehicle.acquisition_cost)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(updated)
    }

    pub async fn update_status(&self, id: Uuid, status: VehicleStatus) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle)
    }

    /// Borrado físico; los viajes y gastos del vehículo quedan huérfanos
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }
}

// Operaciones sobre el vehículo que corren dentro de la transacción de otro recurso

pub(crate) async fn lock_vehicle(conn: &mut PgConnection, id: Uuid) -> Result<Option<Vehicle>, AppError> {
    let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(vehicle)
}

pub(crate) async fn adjust_fuel_total(conn: &mut PgConnection, id: Uuid, delta: Decimal) -> Result<(), AppError> {
    if delta.is_zero() {
        return Ok(());
    }
    sqlx::query(
        "UPDATE vehicles SET total_fuel_cost = total_fuel_cost + $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(delta)
    .execute(conn)
    .await?;

    Ok(())
}

pub(crate) async fn adjust_maintenance_total(
    conn: &mut PgConnection,
    id: Uuid,
    delta: Decimal,
) -> Result<(), AppError> {
    if delta.is_zero() {
        return Ok(());
    }
    sqlx::query(
        "UPDATE vehicles SET total_maintenance_cost = total_maintenance_cost + $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(delta)
    .execute(conn)
    .await?;

    Ok(())
}

pub(crate) async fn set_vehicle_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: VehicleStatus,
    odometer: Option<f64>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE vehicles
        SET status = $2, current_odometer = COALESCE($3, current_odometer), updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(odometer)
    .execute(conn)
    .await?;

    Ok(())
}
