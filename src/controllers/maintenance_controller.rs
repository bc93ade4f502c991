use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::maintenance_dto::{CreateMaintenanceRequest, MaintenanceFilters, UpdateMaintenanceRequest};
use crate::models::maintenance::{MaintenanceDetails, MaintenanceStatus};
use crate::repositories::maintenance_repository::{MaintenanceRepository, NewMaintenance};
use crate::services::fleet_metrics::money;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};
use crate::utils::validation::normalize_optional;

pub struct MaintenanceController {
    repository: MaintenanceRepository,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &MaintenanceFilters) -> Result<Vec<MaintenanceDetails>, AppError> {
        self.repository.find_all(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaintenanceDetails, AppError> {
        self.repository
            .find_details(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance record"))
    }

    pub async fn create(&self, request: CreateMaintenanceRequest) -> Result<MaintenanceDetails, AppError> {
        let cost = money(request.cost).ok_or_else(|| bad_request_error("Invalid cost"))?;

        let record = self
            .repository
            .create(NewMaintenance {
                vehicle_id: request.vehicle_id,
                service_type: request.service_type.trim().to_string(),
                cost,
                description: normalize_optional(request.description),
                service_date: request.service_date.unwrap_or_else(|| Utc::now().date_naive()),
                next_service_date: request.next_service_date,
                status: request.status.unwrap_or(MaintenanceStatus::Scheduled),
                notes: normalize_optional(request.notes),
            })
            .await?;

        self.get_by_id(record.id).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateMaintenanceRequest) -> Result<MaintenanceDetails, AppError> {
        let mut record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance record"))?;

        if let Some(service_type) = request.service_type {
            record.service_type = service_type.trim().to_string();
        }
        if let Some(cost) = request.cost {
            record.cost = money(cost).ok_or_else(|| bad_request_error("Invalid cost"))?;
        }
        if request.description.is_some() {
            record.description = normalize_optional(request.description);
        }
        if let Some(date) = request.service_date {
            record.service_date = date;
        }
        if request.next_service_date.is_some() {
            record.next_service_date = request.next_service_date;
        }
        if let Some(status) = request.status {
            record.status = status;
        }
        if request.notes.is_some() {
            record.notes = normalize_optional(request.notes);
        }

        self.repository.update(&record).await?;
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        tracing::info!(record_id = %id, "🗑️ Registro de mantenimiento eliminado");
        Ok(())
    }
}
