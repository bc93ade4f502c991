//! Consultas de agregación
//!
//! Conteos y sumas para el dashboard y los reportes de analytics. Las
//! consultas independientes se lanzan en paralelo sobre el pool.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::models::analytics::FuelTotalsRow;
use crate::models::driver::Driver;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Default, FromRow)]
pub struct VehicleCounts {
    pub total: i64,
    pub on_trip: i64,
    pub in_shop: i64,
    pub available: i64,
}

#[derive(Debug, Clone, Default, FromRow)]
pub struct TripCounts {
    pub total: i64,
    pub draft: i64,
    pub dispatched: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub completed_distance: f64,
}

#[derive(Debug, Clone, Default, FromRow)]
pub struct DriverCounts {
    pub total: i64,
    pub on_duty: i64,
    pub suspended: i64,
    pub avg_safety_score: Option<f64>,
}

#[derive(Debug, Clone, Default, FromRow)]
pub struct CostTotals {
    pub fuel: Decimal,
    pub maintenance: Decimal,
}

/// Conductor con sus viajes completados contados desde `trips`
#[derive(Debug, FromRow)]
pub struct DriverTripsRow {
    #[sqlx(flatten)]
    pub driver: Driver,
    pub completed_trips: i64,
}

pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn vehicle_counts(&self) -> Result<VehicleCounts, AppError> {
        let counts = sqlx::query_as::<_, VehicleCounts>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'on_trip') AS on_trip,
                   COUNT(*) FILTER (WHERE status = 'in_shop') AS in_shop,
                   COUNT(*) FILTER (WHERE status = 'available') AS available
            FROM vehicles
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    pub async fn trip_counts(&self) -> Result<TripCounts, AppError> {
        let counts = sqlx::query_as::<_, TripCounts>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'draft') AS draft,
                   COUNT(*) FILTER (WHERE status = 'dispatched') AS dispatched,
                   COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                   COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled,
                   COALESCE(SUM(total_distance) FILTER (WHERE status = 'completed'), 0)::float8
                       AS completed_distance
            FROM trips
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    pub async fn driver_counts(&self) -> Result<DriverCounts, AppError> {
        let counts = sqlx::query_as::<_, DriverCounts>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'on_duty') AS on_duty,
                   COUNT(*) FILTER (WHERE status = 'suspended') AS suspended,
                   AVG(safety_score)::float8 AS avg_safety_score
            FROM drivers
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Costos sumados desde los registros, no desde los totales del vehículo
    pub async fn cost_totals(&self) -> Result<CostTotals, AppError> {
        let totals = sqlx::query_as::<_, CostTotals>(
            r#"
            SELECT (SELECT COALESCE(SUM(cost), 0) FROM fuel_expenses) AS fuel,
                   (SELECT COALESCE(SUM(cost), 0) FROM maintenance_records) AS maintenance
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    pub async fn fuel_totals_by_vehicle(&self) -> Result<Vec<FuelTotalsRow>, AppError> {
        let rows = sqlx::query_as::<_, FuelTotalsRow>(
            r#"
            SELECT f.vehicle_id,
                   v.name,
                   v.license_plate,
                   COALESCE(SUM(f.liters), 0)::float8 AS total_liters,
                   COALESCE(SUM(f.km), 0)::float8 AS total_km,
                   COALESCE(SUM(f.cost), 0) AS total_cost,
                   COALESCE(ROUND(AVG(f.cost_per_liter), 2), 0) AS avg_cost_per_liter,
                   COUNT(*) AS record_count
            FROM fuel_expenses f
            LEFT JOIN vehicles v ON v.id = f.vehicle_id
            GROUP BY f.vehicle_id, v.name, v.license_plate
            ORDER BY total_cost DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn drivers_with_completed_trips(&self) -> Result<Vec<DriverTripsRow>, AppError> {
        let rows = sqlx::query_as::<_, DriverTripsRow>(
            r#"
            SELECT d.*,
                   COUNT(t.id) FILTER (WHERE t.status = 'completed') AS completed_trips
            FROM drivers d
            LEFT JOIN trips t ON t.driver_id = d.id
            GROUP BY d.id
            ORDER BY d.safety_score DESC, d.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Costos de combustible (por `fuel_date`) y mantenimiento (por `service_date`) en `[from, to)`
    pub async fn costs_between(&self, from: NaiveDate, to: NaiveDate) -> Result<CostTotals, AppError> {
        let fuel = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(cost), 0) FROM fuel_expenses WHERE fuel_date >= $1 AND fuel_date < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool);

        let maintenance = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(cost), 0) FROM maintenance_records WHERE service_date >= $1 AND service_date < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool);

        let (fuel, maintenance) = futures::try_join!(fuel, maintenance)?;

        Ok(CostTotals { fuel, maintenance })
    }
}
