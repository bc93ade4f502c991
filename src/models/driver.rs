//! Modelo de Driver
//!
//! Mapea a la tabla `drivers`. El estado de la licencia y el nivel de riesgo
//! no se guardan: se calculan al leer (ver `services::driver_compliance`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del conductor - mapea al ENUM driver_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "driver_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    OnDuty,
    OffDuty,
    Suspended,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::OnDuty => "on_duty",
            DriverStatus::OffDuty => "off_duty",
            DriverStatus::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub safety_score: f64,
    pub trips_completed: i32,
    pub trips_assigned: i32,
    pub status: DriverStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resumen embebido en viajes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub safety_score: f64,
    pub status: DriverStatus,
}
