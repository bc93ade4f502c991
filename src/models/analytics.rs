//! Modelos de Analytics
//!
//! Respuestas de los endpoints de agregación: resumen del dashboard,
//! ROI por vehículo, eficiencia de combustible, desempeño de conductores,
//! costos mensuales y resumen de viajes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::driver::DriverStatus;
use crate::services::driver_compliance::{LicenseStatus, RiskLevel};

/// Resumen para el dashboard principal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    // Flota
    pub total_vehicles: i64,
    pub active_fleet: i64,
    pub maintenance_alerts: i64,
    pub available_vehicles: i64,
    pub pending_cargo: i64,
    pub utilization_rate: String,

    // Viajes
    pub total_trips: i64,
    pub completed_trips: i64,
    pub active_trips: i64,
    pub cancelled_trips: i64,
    pub completion_rate: String,

    // Conductores
    pub total_drivers: i64,
    pub on_duty_drivers: i64,
    pub suspended_drivers: i64,

    // Costos
    #[serde(with = "rust_decimal::serde::float")]
    pub total_fuel_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_maintenance_cost: Decimal,
    pub total_distance: f64,
    pub avg_safety_score: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRoi {
    pub vehicle_id: Uuid,
    pub name: String,
    pub license_plate: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub acquisition_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub maintenance_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_operational_cost: Decimal,
    pub roi_percentage: String,
}

/// Totales de combustible agrupados por vehículo (fila SQL)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FuelTotalsRow {
    pub vehicle_id: Uuid,
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub total_liters: f64,
    pub total_km: f64,
    pub total_cost: Decimal,
    pub avg_cost_per_liter: Decimal,
    pub record_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEfficiency {
    pub vehicle_id: Uuid,
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub total_liters: f64,
    pub total_km: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_cost_per_liter: Decimal,
    pub km_per_liter: String,
    pub record_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverPerformance {
    pub driver_id: Uuid,
    pub name: String,
    pub email: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub license_status: LicenseStatus,
    pub trips_completed: i64,
    pub safety_score: f64,
    pub risk_level: RiskLevel,
    pub status: DriverStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCosts {
    pub month: String,
    pub year: i32,
    pub month_number: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub fuel_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub maintenance_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub total_trips: i64,
    pub completed_trips: i64,
    pub active_trips: i64,
    pub cancelled_trips: i64,
    pub completion_rate: String,
    pub total_distance: f64,
}
