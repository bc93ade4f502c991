//! Modelo de Maintenance

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::vehicle::VehicleSummary;

/// Estado del mantenimiento - mapea al ENUM maintenance_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "scheduled",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }

    /// El vehículo sale del taller solo cuando el registro pasa a completado
    pub fn releases_vehicle(previous: MaintenanceStatus, next: MaintenanceStatus) -> bool {
        previous != MaintenanceStatus::Completed && next == MaintenanceStatus::Completed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    pub description: Option<String>,
    pub service_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct MaintenanceWithVehicle {
    #[sqlx(flatten)]
    pub record: MaintenanceRecord,
    pub vehicle_name: Option<String>,
    pub vehicle_license_plate: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDetails {
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    pub vehicle: Option<VehicleSummary>,
}

impl From<MaintenanceWithVehicle> for MaintenanceDetails {
    fn from(row: MaintenanceWithVehicle) -> Self {
        let vehicle = match (row.vehicle_name, row.vehicle_license_plate) {
            (Some(name), Some(license_plate)) => Some(VehicleSummary {
                id: row.record.vehicle_id,
                name,
                license_plate,
                vehicle_type: None,
                max_load_capacity: None,
                status: None,
            }),
            _ => None,
        };
        Self {
            record: row.record,
            vehicle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_entering_completed_releases_vehicle() {
        use MaintenanceStatus::*;

        assert!(MaintenanceStatus::releases_vehicle(Scheduled, Completed));
        assert!(MaintenanceStatus::releases_vehicle(Cancelled, Completed));
        assert!(!MaintenanceStatus::releases_vehicle(Completed, Completed));
        assert!(!MaintenanceStatus::releases_vehicle(Scheduled, Scheduled));
        assert!(!MaintenanceStatus::releases_vehicle(Completed, Cancelled));
    }
}
