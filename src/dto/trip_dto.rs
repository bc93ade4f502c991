use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::trip::TripStatus;
use crate::services::trip_lifecycle::StatusChange;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cargo_weight: f64,
    #[validate(length(max = 500))]
    pub cargo_description: Option<String>,
    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub start_location: String,
    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub end_location: String,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub start_odometer: Option<f64>,
    pub notes: Option<String>,
}

// Solo se editan viajes en borrador
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cargo_weight: Option<f64>,
    #[validate(length(max = 500))]
    pub cargo_description: Option<String>,
    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub start_location: Option<String>,
    #[validate(custom = "validate_not_blank", length(max = 200))]
    pub end_location: Option<String>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub start_odometer: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripStatusRequest {
    pub status: TripStatus,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub start_odometer: Option<f64>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub end_odometer: Option<f64>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub total_distance: Option<f64>,
}

impl From<UpdateTripStatusRequest> for StatusChange {
    fn from(request: UpdateTripStatusRequest) -> Self {
        Self {
            status: request.status,
            start_odometer: request.start_odometer,
            end_odometer: request.end_odometer,
            total_distance: request.total_distance,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripFilters {
    pub status: Option<TripStatus>,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}
