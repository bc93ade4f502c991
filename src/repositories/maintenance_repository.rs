use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::maintenance_dto::MaintenanceFilters;
use crate::models::maintenance::{
    MaintenanceDetails, MaintenanceRecord, MaintenanceStatus, MaintenanceWithVehicle,
};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::vehicle_repository::{adjust_maintenance_total, lock_vehicle, set_vehicle_status};
use crate::utils::errors::{not_found_error, AppError};

const MAINTENANCE_WITH_VEHICLE: &str = r#"
    SELECT m.*,
           v.name AS vehicle_name,
           v.license_plate AS vehicle_license_plate
    FROM maintenance_records m
    LEFT JOIN vehicles v ON v.id = m.vehicle_id
    WHERE TRUE"#;

#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub vehicle_id: Uuid,
    pub service_type: String,
    pub cost: Decimal,
    pub description: Option<String>,
    pub service_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
}

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta el registro, suma el costo y manda el vehículo al taller si queda programado
    pub async fn create(&self, record: NewMaintenance) -> Result<MaintenanceRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        lock_vehicle(&mut *tx, record.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let created = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                id, vehicle_id, service_type, cost, description, service_date,
                next_service_date, status, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.vehicle_id)
        .bind(record.service_type)
        .bind(record.cost)
        .bind(record.description)
        .bind(record.service_date)
        .bind(record.next_service_date)
        .bind(record.status)
        .bind(record.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        adjust_maintenance_total(&mut *tx, created.vehicle_id, created.cost).await?;

        if created.status == MaintenanceStatus::Scheduled {
            set_vehicle_status(&mut *tx, created.vehicle_id, VehicleStatus::InShop, None).await?;
        }

        tx.commit().await?;

        tracing::info!(
            vehicle_id = %created.vehicle_id,
            service_type = %created.service_type,
            "🔧 Mantenimiento registrado"
        );
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    pub async fn find_details(&self, id: Uuid) -> Result<Option<MaintenanceDetails>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(MAINTENANCE_WITH_VEHICLE);
        query.push(" AND m.id = ").push_bind(id);

        let row = query
            .build_query_as::<MaintenanceWithVehicle>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(MaintenanceDetails::from))
    }

    pub async fn find_all(&self, filters: &MaintenanceFilters) -> Result<Vec<MaintenanceDetails>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(MAINTENANCE_WITH_VEHICLE);

        if let Some(vehicle_id) = filters.vehicle_id {
            query.push(" AND m.vehicle_id = ").push_bind(vehicle_id);
        }
        if let Some(status) = filters.status {
            query.push(" AND m.status = ").push_bind(status);
        }
        query.push(" ORDER BY m.created_at DESC");

        let rows = query
            .build_query_as::<MaintenanceWithVehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MaintenanceDetails::from).collect())
    }

    /// Guarda el registro editado, ajusta el total por la diferencia de costo y
    /// libera el vehículo cuando el registro pasa a completado (no en ediciones
    /// de un registro que ya lo estaba)
    pub async fn update(&self, record: &MaintenanceRecord) -> Result<MaintenanceRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let (previous_cost, previous_status): (Decimal, MaintenanceStatus) =
            sqlx::query_as("SELECT cost, status FROM maintenance_records WHERE id = $1 FOR UPDATE")
                .bind(record.id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found_error("Maintenance record"))?;

        let updated = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET service_type = $2, cost = $3, description = $4, service_date = $5,
                next_service_date = $6, status = $7, notes = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(&record.service_type)
        .bind(record.cost)
        .bind(&record.description)
        .bind(record.service_date)
        .bind(record.next_service_date)
        .bind(record.status)
        .bind(&record.notes)
        .fetch_one(&mut *tx)
        .await?;

        adjust_maintenance_total(&mut *tx, updated.vehicle_id, updated.cost - previous_cost).await?;

        if MaintenanceStatus::releases_vehicle(previous_status, updated.status) {
            set_vehicle_status(&mut *tx, updated.vehicle_id, VehicleStatus::Available, None).await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    /// Borra el registro y descuenta su costo del total del vehículo
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted =
            sqlx::query_as::<_, MaintenanceRecord>("DELETE FROM maintenance_records WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found_error("Maintenance record"))?;

        adjust_maintenance_total(&mut *tx, deleted.vehicle_id, -deleted.cost).await?;
        tx.commit().await?;

        Ok(())
    }
}
