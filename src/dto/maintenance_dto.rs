use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance::MaintenanceStatus;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: Uuid,
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub service_type: String,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cost: f64,
    pub description: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub status: Option<MaintenanceStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub service_type: Option<String>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub next_service_date: Option<NaiveDate>,
    pub status: Option<MaintenanceStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceFilters {
    pub vehicle_id: Option<Uuid>,
    pub status: Option<MaintenanceStatus>,
}
