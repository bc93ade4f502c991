//! Modelo de FuelExpense

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::vehicle::VehicleSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FuelExpense {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub trip_id: Option<Uuid>,
    pub liters: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost_per_liter: Decimal,
    pub km: f64,
    pub fuel_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct FuelExpenseWithVehicle {
    #[sqlx(flatten)]
    pub expense: FuelExpense,
    pub vehicle_name: Option<String>,
    pub vehicle_license_plate: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelExpenseDetails {
    #[serde(flatten)]
    pub expense: FuelExpense,
    pub vehicle: Option<VehicleSummary>,
}

impl From<FuelExpenseWithVehicle> for FuelExpenseDetails {
    fn from(row: FuelExpenseWithVehicle) -> Self {
        let vehicle = match (row.vehicle_name, row.vehicle_license_plate) {
            (Some(name), Some(license_plate)) => Some(VehicleSummary {
                id: row.expense.vehicle_id,
                name,
                license_plate,
                vehicle_type: None,
                max_load_capacity: None,
                status: None,
            }),
            _ => None,
        };
        Self {
            expense: row.expense,
            vehicle,
        }
    }
}
