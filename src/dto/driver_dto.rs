use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::driver::DriverStatus;
use crate::services::driver_compliance::RiskLevel;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(custom = "validate_not_blank", length(max = 50))]
    pub license_number: String,
    pub license_expiry: NaiveDate,
    #[validate(range(min = 0.0, max = 100.0, message = "must be between 0 and 100"))]
    pub safety_score: Option<f64>,
    pub status: Option<DriverStatus>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    #[validate(custom = "validate_not_blank", length(max = 50))]
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    #[validate(range(min = 0.0, max = 100.0, message = "must be between 0 and 100"))]
    pub safety_score: Option<f64>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub trips_completed: Option<i32>,
    pub status: Option<DriverStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverFilters {
    pub status: Option<DriverStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceQuery {
    pub risk: Option<RiskLevel>,
}
