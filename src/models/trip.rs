//! Modelo de Trip
//!
//! Un viaje enlaza un vehículo y un conductor. `TripStatus` es la única
//! máquina de estados del sistema:
//!
//! ```text
//! draft ──► dispatched ──► completed
//!   │            │
//!   └──────► cancelled ◄───┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::driver::{DriverStatus, DriverSummary};
use super::vehicle::{VehicleStatus, VehicleSummary, VehicleType};

/// Estado del viaje - mapea al ENUM trip_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "trip_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Draft,
    Dispatched,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Draft => "draft",
            TripStatus::Dispatched => "dispatched",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Aristas permitidas de la máquina de estados
    pub fn can_transition_to(&self, next: TripStatus) -> bool {
        matches!(
            (self, next),
            (TripStatus::Draft, TripStatus::Dispatched)
                | (TripStatus::Draft, TripStatus::Cancelled)
                | (TripStatus::Dispatched, TripStatus::Completed)
                | (TripStatus::Dispatched, TripStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub trip_id: String,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub cargo_weight: f64,
    pub cargo_description: Option<String>,
    pub start_location: String,
    pub end_location: String,
    pub start_odometer: Option<f64>,
    pub end_odometer: Option<f64>,
    pub status: TripStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_distance: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fila de `trips` con las columnas del vehículo y del conductor (LEFT JOIN)
#[derive(Debug, FromRow)]
pub struct TripWithRefs {
    #[sqlx(flatten)]
    pub trip: Trip,
    pub vehicle_name: Option<String>,
    pub vehicle_license_plate: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub vehicle_max_load_capacity: Option<f64>,
    pub vehicle_status: Option<VehicleStatus>,
    pub driver_name: Option<String>,
    pub driver_email: Option<String>,
    pub driver_safety_score: Option<f64>,
    pub driver_status: Option<DriverStatus>,
}

/// Viaje con vehículo y conductor embebidos, tal como lo devuelve la API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    #[serde(flatten)]
    pub trip: Trip,
    pub vehicle: Option<VehicleSummary>,
    pub driver: Option<DriverSummary>,
}

impl From<TripWithRefs> for TripDetails {
    fn from(row: TripWithRefs) -> Self {
        let vehicle = match (row.vehicle_name, row.vehicle_license_plate) {
            (Some(name), Some(license_plate)) => Some(VehicleSummary {
                id: row.trip.vehicle_id,
                name,
                license_plate,
                vehicle_type: row.vehicle_type,
                max_load_capacity: row.vehicle_max_load_capacity,
                status: row.vehicle_status,
            }),
            _ => None,
        };

        let driver = match (row.driver_name, row.driver_email, row.driver_safety_score, row.driver_status) {
            (Some(name), Some(email), Some(safety_score), Some(status)) => Some(DriverSummary {
                id: row.trip.driver_id,
                name,
                email,
                safety_score,
                status,
            }),
            _ => None,
        };

        Self {
            trip: row.trip,
            vehicle,
            driver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TripStatus; 4] = [
        TripStatus::Draft,
        TripStatus::Dispatched,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    #[test]
    fn test_allowed_edges() {
        assert!(TripStatus::Draft.can_transition_to(TripStatus::Dispatched));
        assert!(TripStatus::Draft.can_transition_to(TripStatus::Cancelled));
        assert!(TripStatus::Dispatched.can_transition_to(TripStatus::Completed));
        assert!(TripStatus::Dispatched.can_transition_to(TripStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for next in ALL {
            assert!(!TripStatus::Completed.can_transition_to(next));
            assert!(!TripStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_rejects_skips_and_self_loops() {
        assert!(!TripStatus::Draft.can_transition_to(TripStatus::Completed));
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }
}
