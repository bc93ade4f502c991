use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::driver_dto::{ComplianceQuery, CreateDriverRequest, DriverFilters, UpdateDriverRequest};
use crate::models::driver::{Driver, DriverStatus};
use crate::repositories::driver_repository::{DriverRepository, NewDriver};
use crate::services::driver_compliance::{build_report, ComplianceReport};
use crate::utils::errors::{duplicate_error, not_found_error, AppError};

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &DriverFilters) -> Result<Vec<Driver>, AppError> {
        self.repository.find_all(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> Result<Driver, AppError> {
        let email = request.email.trim().to_lowercase();

        if self.repository.email_exists(&email, None).await? {
            return Err(duplicate_error("Driver", "email", &email));
        }

        let driver = self
            .repository
            .create(NewDriver {
                name: request.name.trim().to_string(),
                email,
                license_number: request.license_number.trim().to_string(),
                license_expiry: request.license_expiry,
                safety_score: request.safety_score.unwrap_or(100.0),
                status: request.status.unwrap_or(DriverStatus::OnDuty),
            })
            .await?;

        tracing::info!(driver_id = %driver.id, "👤 Conductor creado");
        Ok(driver)
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> Result<Driver, AppError> {
        let mut driver = self.get_by_id(id).await?;

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if email != driver.email && self.repository.email_exists(&email, Some(id)).await? {
                return Err(duplicate_error("Driver", "email", &email));
            }
            driver.email = email;
        }
        if let Some(name) = request.name {
            driver.name = name.trim().to_string();
        }
        if let Some(license_number) = request.license_number {
            driver.license_number = license_number.trim().to_string();
        }
        if let Some(expiry) = request.license_expiry {
            driver.license_expiry = expiry;
        }
        if let Some(score) = request.safety_score {
            driver.safety_score = score;
        }
        if let Some(completed) = request.trips_completed {
            driver.trips_completed = completed;
        }
        if let Some(status) = request.status {
            driver.status = status;
        }

        self.repository.update(&driver).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        tracing::info!(driver_id = %id, "🗑️ Conductor eliminado");
        Ok(())
    }

    /// Licencias y riesgo de todos los conductores, calculado contra la fecha de hoy
    pub async fn compliance(&self, query: &ComplianceQuery) -> Result<ComplianceReport, AppError> {
        let drivers = self.repository.find_all(&DriverFilters::default()).await?;
        Ok(build_report(&drivers, Utc::now().date_naive(), query.risk))
    }
}
