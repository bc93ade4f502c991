use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::trip_dto::TripFilters;
use crate::models::trip::{Trip, TripDetails, TripStatus, TripWithRefs};
use crate::repositories::vehicle_repository::set_vehicle_status;
use crate::services::trip_lifecycle::TransitionPlan;
use crate::utils::errors::{not_found_error, AppError};

const TRIP_WITH_REFS: &str = r#"
    SELECT t.*,
           v.name AS vehicle_name,
           v.license_plate AS vehicle_license_plate,
           v.vehicle_type AS vehicle_type,
           v.max_load_capacity AS vehicle_max_load_capacity,
           v.status AS vehicle_status,
           d.name AS driver_name,
           d.email AS driver_email,
           d.safety_score AS driver_safety_score,
           d.status AS driver_status
    FROM trips t
    LEFT JOIN vehicles v ON v.id = t.vehicle_id
    LEFT JOIN drivers d ON d.id = t.driver_id
    WHERE TRUE"#;

#[derive(Debug, Clone)]
pub struct NewTrip {
    pub trip_id: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub cargo_weight: f64,
    pub cargo_description: Option<String>,
    pub start_location: String,
    pub end_location: String,
    pub start_odometer: Option<f64>,
    pub notes: Option<String>,
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, trip: NewTrip) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                id, trip_id, vehicle_id, driver_id, cargo_weight, cargo_description,
                start_location, end_location, start_odometer, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'draft', $10, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(trip.trip_id)
        .bind(trip.vehicle_id)
        .bind(trip.driver_id)
        .bind(trip.cargo_weight)
        .bind(trip.cargo_description)
        .bind(trip.start_location)
        .bind(trip.end_location)
        .bind(trip.start_odometer)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(trip_id = %trip.trip_id, "🚚 Viaje creado");
        Ok(trip)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn find_details(&self, id: Uuid) -> Result<Option<TripDetails>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(TRIP_WITH_REFS);
        query.push(" AND t.id = ").push_bind(id);

        let row = query
            .build_query_as::<TripWithRefs>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TripDetails::from))
    }

    pub async fn find_all(&self, filters: &TripFilters) -> Result<Vec<TripDetails>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new(TRIP_WITH_REFS);

        if let Some(status) = filters.status {
            query.push(" AND t.status = ").push_bind(status);
        }
        if let Some(vehicle_id) = filters.vehicle_id {
            query.push(" AND t.vehicle_id = ").push_bind(vehicle_id);
        }
        if let Some(driver_id) = filters.driver_id {
            query.push(" AND t.driver_id = ").push_bind(driver_id);
        }
        query.push(" ORDER BY t.created_at DESC");

        let rows = query
            .build_query_as::<TripWithRefs>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TripDetails::from).collect())
    }

    /// Edita un viaje en borrador; si dejó de serlo entre la lectura y la escritura, 409
    pub async fn update_draft(&self, trip: &Trip) -> Result<Trip, AppError> {
        let updated = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET cargo_weight = $2, cargo_description = $3, start_location = $4,
                end_location = $5, start_odometer = $6, notes = $7, updated_at = NOW()
            WHERE id = $1 AND status = 'draft'
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(trip.cargo_weight)
        .bind(&trip.cargo_description)
        .bind(&trip.start_location)
        .bind(&trip.end_location)
        .bind(trip.start_odometer)
        .bind(&trip.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict("Trip status changed concurrently".to_string()))?;

        Ok(updated)
    }

    /// Aplica una transición junto con sus efectos sobre vehículo y conductor
    /// en una sola transacción. La fila del viaje se actualiza solo si sigue
    /// en el estado observado.
    pub async fn apply_transition(&self, trip: &Trip, plan: &TransitionPlan) -> Result<Trip, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET status = $2, start_time = $3, end_time = $4, start_odometer = $5,
                end_odometer = $6, total_distance = $7, updated_at = NOW()
            WHERE id = $1 AND status = $8
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(plan.to)
        .bind(plan.start_time)
        .bind(plan.end_time)
        .bind(plan.start_odometer)
        .bind(plan.end_odometer)
        .bind(plan.total_distance)
        .bind(plan.from)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::Conflict("Trip status changed concurrently".to_string()))?;

        if let Some(status) = plan.vehicle_status {
            set_vehicle_status(&mut *tx, trip.vehicle_id, status, plan.vehicle_odometer).await?;
        }

        if plan.increment_trips_assigned {
            sqlx::query(
                "UPDATE drivers SET trips_assigned = trips_assigned + 1, updated_at = NOW() WHERE id = $1",
            )
            .bind(trip.driver_id)
            .execute(&mut *tx)
            .await?;
        }

        if plan.increment_trips_completed {
            sqlx::query(
                "UPDATE drivers SET trips_completed = trips_completed + 1, updated_at = NOW() WHERE id = $1",
            )
            .bind(trip.driver_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            trip_id = %updated.trip_id,
            from = %plan.from,
            to = %plan.to,
            "🔄 Transición de viaje aplicada"
        );
        Ok(updated)
    }

    /// Borra el viaje salvo que esté en curso
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1 AND status <> $2")
            .bind(id)
            .bind(TripStatus::Dispatched)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            // Sin fila borrada: o el viaje ya no existe o pasó a despachado
            let still_there: Option<(TripStatus,)> = sqlx::query_as("SELECT status FROM trips WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

            return Err(match still_there {
                Some(_) => AppError::Conflict("Trip status changed concurrently".to_string()),
                None => not_found_error("Trip"),
            });
        }

        Ok(())
    }
}
