use sqlx::PgPool;

use crate::services::seed_service::SeedDataset;
use crate::utils::errors::AppError;

pub struct SeedRepository {
    pool: PgPool,
}

impl SeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Vacía las cinco tablas y carga el dataset en una sola transacción
    pub async fn replace_all(&self, data: &SeedDataset) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("TRUNCATE fuel_expenses, maintenance_records, trips, drivers, vehicles")
            .execute(&mut *tx)
            .await?;

        for v in &data.vehicles {
            sqlx::query(
                r#"
                INSERT INTO vehicles (
                    id, name, license_plate, model, vehicle_type, max_load_capacity,
                    current_odometer, status, region, acquisition_cost,
                    total_fuel_cost, total_maintenance_cost, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(v.id)
            .bind(&v.name)
            .bind(&v.license_plate)
            .bind(&v.model)
            .bind(v.vehicle_type)
            .bind(v.max_load_capacity)
            .bind(v.current_odometer)
            .bind(v.status)
            .bind(&v.region)
            .bind(v.acquisition_cost)
            .bind(v.total_fuel_cost)
            .bind(v.total_maintenance_cost)
            .bind(v.created_at)
            .bind(v.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for d in &data.drivers {
            sqlx::query(
                r#"
                INSERT INTO drivers (
                    id, name, email, license_number, license_expiry, safety_score,
                    trips_completed, trips_assigned, status, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(d.id)
            .bind(&d.name)
            .bind(&d.email)
            .bind(&d.license_number)
            .bind(d.license_expiry)
            .bind(d.safety_score)
            .bind(d.trips_completed)
            .bind(d.trips_assigned)
            .bind(d.status)
            .bind(d.created_at)
            .bind(d.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for t in &data.trips {
            sqlx::query(
                r#"
                INSERT INTO trips (
                    id, trip_id, vehicle_id, driver_id, cargo_weight, cargo_description,
                    start_location, end_location, start_odometer, end_odometer, status,
                    start_time, end_time, total_distance, notes, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                "#,
            )
            .bind(t.id)
            .bind(&t.trip_id)
            .bind(t.vehicle_id)
            .bind(t.driver_id)
            .bind(t.cargo_weight)
            .bind(&t.cargo_description)
            .bind(&t.start_location)
            .bind(&t.end_location)
            .bind(t.start_odometer)
            .bind(t.end_odometer)
            .bind(t.status)
            .bind(t.start_time)
            .bind(t.end_time)
            .bind(t.total_distance)
            .bind(&t.notes)
            .bind(t.created_at)
            .bind(t.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for f in &data.fuel_expenses {
            sqlx::query(
                r#"
                INSERT INTO fuel_expenses (
                    id, vehicle_id, trip_id, liters, cost, cost_per_liter, km,
                    fuel_date, notes, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(f.id)
            .bind(f.vehicle_id)
            .bind(f.trip_id)
            .bind(f.liters)
            .bind(f.cost)
            .bind(f.cost_per_liter)
            .bind(f.km)
            .bind(f.fuel_date)
            .bind(&f.notes)
            .bind(f.created_at)
            .bind(f.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        for m in &data.maintenance {
            sqlx::query(
                r#"
                INSERT INTO maintenance_records (
                    id, vehicle_id, service_type, cost, description, service_date,
                    next_service_date, status, notes, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(m.id)
            .bind(m.vehicle_id)
            .bind(&m.service_type)
            .bind(m.cost)
            .bind(&m.description)
            .bind(m.service_date)
            .bind(m.next_service_date)
            .bind(m.status)
            .bind(&m.notes)
            .bind(m.created_at)
            .bind(m.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let counts = data.counts();
        tracing::info!(
            vehicles = counts.vehicles,
            drivers = counts.drivers,
            trips = counts.trips,
            "🌱 Base de datos sembrada"
        );
        Ok(())
    }
}
