use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{VehicleStatus, VehicleType};
use crate::utils::validation::{validate_license_plate, validate_not_blank};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,
    #[validate(custom = "validate_license_plate", length(max = 20))]
    pub license_plate: String,
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[validate(range(min = 1.0, message = "must be at least 1 kg"))]
    pub max_load_capacity: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub current_odometer: Option<f64>,
    pub status: Option<VehicleStatus>,
    #[validate(length(max = 100))]
    pub region: Option<String>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub acquisition_cost: Option<f64>,
}

// Request para actualizar un vehículo (todos los campos opcionales)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: Option<String>,
    #[validate(custom = "validate_license_plate", length(max = 20))]
    pub license_plate: Option<String>,
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    #[validate(range(min = 1.0, message = "must be at least 1 kg"))]
    pub max_load_capacity: Option<f64>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub current_odometer: Option<f64>,
    pub status: Option<VehicleStatus>,
    #[validate(length(max = 100))]
    pub region: Option<String>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub acquisition_cost: Option<f64>,
}

// Filtros de igualdad para el listado
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilters {
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub status: Option<VehicleStatus>,
    pub region: Option<String>,
}
