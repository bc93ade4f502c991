//! Modelo de Vehicle
//!
//! Mapea exactamente a la tabla `vehicles`. Los costos acumulados
//! (`total_fuel_cost`, `total_maintenance_cost`) solo se modifican dentro de la
//! misma transacción que crea, edita o borra el gasto correspondiente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Truck,
    Van,
    Bike,
}

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    OnTrip,
    InShop,
    OutOfService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::OnTrip => "on_trip",
            VehicleStatus::InShop => "in_shop",
            VehicleStatus::OutOfService => "out_of_service",
        }
    }

    /// Estado resultante de `toggle-service`
    pub fn toggled_service(self) -> Self {
        match self {
            VehicleStatus::OutOfService => VehicleStatus::Available,
            _ => VehicleStatus::OutOfService,
        }
    }
}

/// Vehicle principal - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub max_load_capacity: f64,
    pub current_odometer: f64,
    pub status: VehicleStatus,
    pub region: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub acquisition_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_fuel_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_maintenance_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Costo operativo acumulado (combustible + mantenimiento)
    pub fn operational_cost(&self) -> Decimal {
        self.total_fuel_cost + self.total_maintenance_cost
    }

    pub fn can_carry(&self, cargo_weight: f64) -> bool {
        cargo_weight <= self.max_load_capacity
    }
}

/// Resumen embebido en viajes y gastos
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_load_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_service() {
        assert_eq!(VehicleStatus::OutOfService.toggled_service(), VehicleStatus::Available);
        assert_eq!(VehicleStatus::Available.toggled_service(), VehicleStatus::OutOfService);
        assert_eq!(VehicleStatus::InShop.toggled_service(), VehicleStatus::OutOfService);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&VehicleStatus::OnTrip).unwrap(), "\"on_trip\"");
        let parsed: VehicleType = serde_json::from_str("\"van\"").unwrap();
        assert_eq!(parsed, VehicleType::Van);
    }
}
