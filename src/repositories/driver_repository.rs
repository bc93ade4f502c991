use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::driver_dto::DriverFilters;
use crate::models::driver::{Driver, DriverStatus};
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub name: String,
    pub email: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub safety_score: f64,
    pub status: DriverStatus,
}

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, driver: NewDriver) -> Result<Driver, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (
                id, name, email, license_number, license_expiry, safety_score,
                trips_completed, trips_assigned, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, 0, 0, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver.name)
        .bind(driver.email)
        .bind(driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.safety_score)
        .bind(driver.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_all(&self, filters: &DriverFilters) -> Result<Vec<Driver>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM drivers WHERE TRUE");

        if let Some(status) = filters.status {
            query.push(" AND status = ").push_bind(status);
        }
        query.push(" ORDER BY created_at DESC");

        let drivers = query.build_query_as::<Driver>().fetch_all(&self.pool).await?;

        Ok(drivers)
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Persiste los campos editables; `trips_assigned` solo cambia al despachar
    pub async fn update(&self, driver: &Driver) -> Result<Driver, AppError> {
        let updated = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, email = $3, license_number = $4, license_expiry = $5,
                safety_score = $6, trips_completed = $7, status = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.email)
        .bind(&driver.license_number)
        .bind(driver.license_expiry)
        .bind(driver.safety_score)
        .bind(driver.trips_completed)
        .bind(driver.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Driver not found".to_string()))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Driver not found".to_string()));
        }

        Ok(())
    }
}
