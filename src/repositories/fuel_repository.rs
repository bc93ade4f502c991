use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::fuel_dto::FuelFilters;
use crate::models::fuel_expense::{FuelExpense, FuelExpenseDetails, FuelExpenseWithVehicle};
use crate::repositories::vehicle_repository::{adjust_fuel_total, lock_vehicle};
use crate::utils::errors::{not_found_error, AppError};

const FUEL_WITH_VEHICLE: &str = r#"
    SELECT f.*,
           v.name AS vehicle_name,
           v.license_plate AS vehicle_license_plate
    FROM fuel_expenses f
    LEFT JOIN vehicles v ON v.id = f.vehicle_id
    WHERE TRUE"#;

#[derive(Debug, Clone)]
pub struct NewFuelExpense {
    pub vehicle_id: Uuid,
    pub trip_id: Option<Uuid>,
    pub liters: f64,
    pub cost: Decimal,
    pub cost_per_liter: Decimal,
    pub km: f64,
    pub fuel_date: NaiveDate,
    pub notes: Option<String>,
}

pub struct FuelRepository {
    pool: PgPool,
}

impl FuelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta el gasto y suma su costo al total del vehículo en la misma transacción
    pub async fn create(&self, expense: NewFuelExpense) -> Result<FuelExpense, AppError> {
        let mut tx = self.pool.begin().await?;

        lock_vehicle(&mut *tx, expense.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        let created = sqlx::query_as::<_, FuelExpense>(
            r#"
            INSERT INTO fuel_expenses (
                id, vehicle_id, trip_id, liters, cost, cost_per_liter, km,
                fuel_date, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(expense.vehicle_id)
        .bind(expense.trip_id)
        .bind(expense.liters)
        .bind(expense.cost)
        .bind(expense.cost_per_liter)
        .bind(expense.km)
        .bind(expense.fuel_date)
        .bind(expense.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        adjust_fuel_total(&mut *tx, created.vehicle_id, created.cost).await?;
        tx.commit().await?;

        tracing::info!(vehicle_id = %created.vehicle_id, cost = %created.cost, "⛽ Gasto de combustible registrado");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FuelExpense>, AppError> {
        let expense = sqlx::query_as::<_, FuelExpense>("SELECT * FROM fuel_expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(expense)
    }

    pub async fn find_details(&self, id: Uuid) -> Result<Option<FuelExpenseDetails>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(FUEL_WITH_VEHICLE);
        query.push(" AND f.id = ").push_bind(id);

        let row = query
            .build_query_as::<FuelExpenseWithVehicle>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(FuelExpenseDetails::from))
    }

    pub async fn find_all(&self, filters: &FuelFilters) -> Result<Vec<FuelExpenseDetails>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(FUEL_WITH_VEHICLE);

        if let Some(vehicle_id) = filters.vehicle_id {
            query.push(" AND f.vehicle_id = ").push_bind(vehicle_id);
        }
        if let Some(trip_id) = filters.trip_id {
            query.push(" AND f.trip_id = ").push_bind(trip_id);
        }
        query.push(" ORDER BY f.created_at DESC");

        let rows = query
            .build_query_as::<FuelExpenseWithVehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(FuelExpenseDetails::from).collect())
    }

    /// Guarda el gasto editado y ajusta el total del vehículo por la diferencia de costo
    pub async fn update(&self, expense: &FuelExpense) -> Result<FuelExpense, AppError> {
        let mut tx = self.pool.begin().await?;

        let previous: (Decimal,) =
            sqlx::query_as("SELECT cost FROM fuel_expenses WHERE id = $1 FOR UPDATE")
                .bind(expense.id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| not_found_error("Fuel expense"))?;

        let updated = sqlx::query_as::<_, FuelExpense>(
            r#"
            UPDATE fuel_expenses
            SET trip_id = $2, liters = $3, cost = $4, cost_per_liter = $5, km = $6,
                fuel_date = $7, notes = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(expense.id)
        .bind(expense.trip_id)
        .bind(expense.liters)
        .bind(expense.cost)
        .bind(expense.cost_per_liter)
        .bind(expense.km)
        .bind(expense.fuel_date)
        .bind(&expense.notes)
        .fetch_one(&mut *tx)
        .await?;

        adjust_fuel_total(&mut *tx, updated.vehicle_id, updated.cost - previous.0).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Borra el gasto y descuenta su costo del total del vehículo
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, FuelExpense>("DELETE FROM fuel_expenses WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| not_found_error("Fuel expense"))?;

        adjust_fuel_total(&mut *tx, deleted.vehicle_id, -deleted.cost).await?;
        tx.commit().await?;

        Ok(())
    }
}
