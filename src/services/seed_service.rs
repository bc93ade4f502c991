//! Datos de demostración
//!
//! Arma el dataset completo en memoria (vehículos, conductores, viajes,
//! combustible y mantenimiento) con los totales de costos de cada vehículo
//! ya calculados a partir de sus registros.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::driver::{Driver, DriverStatus};
use crate::models::fuel_expense::FuelExpense;
use crate::models::maintenance::{MaintenanceRecord, MaintenanceStatus};
use crate::models::trip::{Trip, TripStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};

#[derive(Debug, Clone)]
pub struct SeedDataset {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub fuel_expenses: Vec<FuelExpense>,
    pub maintenance: Vec<MaintenanceRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCounts {
    pub vehicles: usize,
    pub drivers: usize,
    pub trips: usize,
    pub fuel_expenses: usize,
    pub maintenance: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub message: String,
    pub counts: SeedCounts,
}

impl SeedDataset {
    pub fn counts(&self) -> SeedCounts {
        SeedCounts {
            vehicles: self.vehicles.len(),
            drivers: self.drivers.len(),
            trips: self.trips.len(),
            fuel_expenses: self.fuel_expenses.len(),
            maintenance: self.maintenance.len(),
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single()
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    name: &str,
    plate: &str,
    model: &str,
    vehicle_type: VehicleType,
    capacity: f64,
    status: VehicleStatus,
    odometer: f64,
    region: &str,
    acquisition: i64,
    now: DateTime<Utc>,
) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        name: name.to_string(),
        license_plate: plate.to_string(),
        model: model.to_string(),
        vehicle_type,
        max_load_capacity: capacity,
        current_odometer: odometer,
        status,
        region: region.to_string(),
        acquisition_cost: Decimal::from(acquisition),
        total_fuel_cost: Decimal::ZERO,
        total_maintenance_cost: Decimal::ZERO,
        created_at: now,
        updated_at: now,
    }
}

#[allow(clippy::too_many_arguments)]
fn driver(
    name: &str,
    email: &str,
    license: &str,
    expiry: NaiveDate,
    score: f64,
    completed: i32,
    assigned: i32,
    status: DriverStatus,
    now: DateTime<Utc>,
) -> Driver {
    Driver {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        license_number: license.to_string(),
        license_expiry: expiry,
        safety_score: score,
        trips_completed: completed,
        trips_assigned: assigned,
        status,
        created_at: now,
        updated_at: now,
    }
}

fn fuel(vehicle: &Vehicle, liters: f64, cost: i64, km: f64, fuel_date: NaiveDate, now: DateTime<Utc>) -> FuelExpense {
    let cost = Decimal::from(cost);
    FuelExpense {
        id: Uuid::new_v4(),
        vehicle_id: vehicle.id,
        trip_id: None,
        liters,
        cost,
        cost_per_liter: crate::services::fleet_metrics::cost_per_liter(cost, liters).unwrap_or_default(),
        km,
        fuel_date,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn maintenance(
    vehicle: &Vehicle,
    service_type: &str,
    cost: i64,
    service_date: NaiveDate,
    status: MaintenanceStatus,
    now: DateTime<Utc>,
) -> MaintenanceRecord {
    MaintenanceRecord {
        id: Uuid::new_v4(),
        vehicle_id: vehicle.id,
        service_type: service_type.to_string(),
        cost: Decimal::from(cost),
        description: None,
        service_date,
        next_service_date: None,
        status,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[allow(clippy::too_many_arguments)]
fn trip(
    trip_id: &str,
    vehicle: &Vehicle,
    driver: &Driver,
    cargo_weight: f64,
    from: &str,
    to: &str,
    status: TripStatus,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    total_distance: Option<f64>,
    now: DateTime<Utc>,
) -> Trip {
    Trip {
        id: Uuid::new_v4(),
        trip_id: trip_id.to_string(),
        vehicle_id: vehicle.id,
        driver_id: driver.id,
        cargo_weight,
        cargo_description: None,
        start_location: from.to_string(),
        end_location: to.to_string(),
        start_odometer: None,
        end_odometer: None,
        status,
        start_time,
        end_time,
        total_distance,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn demo_dataset(now: DateTime<Utc>) -> SeedDataset {
    use DriverStatus::*;
    use MaintenanceStatus::{Completed, Scheduled};
    use VehicleStatus::*;

    let mut vehicles = vec![
        vehicle("TR-001", "MH02AB0001", "Volvo FH16", VehicleType::Truck, 25000.0, Available, 45230.0, "West", 800_000, now),
        vehicle("TR-005", "MH02AB0005", "Mercedes Actros", VehicleType::Truck, 24000.0, OnTrip, 67890.0, "North", 850_000, now),
        vehicle("TR-008", "MH02AB0008", "Scania R450", VehicleType::Truck, 23000.0, InShop, 89120.0, "South", 820_000, now),
        vehicle("TR-012", "MH02AB0012", "Man TGX", VehicleType::Truck, 25500.0, Available, 12450.0, "East", 780_000, now),
        vehicle("VN-003", "MH02AB0003", "Ford Transit", VehicleType::Van, 3500.0, Available, 34560.0, "West", 350_000, now),
    ];

    let drivers = vec![
        driver("John Doe", "john@example.com", "DL-2024-001", date(2027, 12, 31), 95.0, 127, 130, OnDuty, now),
        driver("Jane Smith", "jane@example.com", "DL-2024-002", date(2026, 3, 15), 88.0, 104, 112, OnDuty, now),
        driver("Mike Johnson", "mike@example.com", "DL-2023-003", date(2025, 6, 20), 76.0, 148, 156, OffDuty, now),
        driver("Sarah Wilson", "sarah@example.com", "DL-2023-004", date(2024, 3, 10), 62.0, 79, 89, Suspended, now),
        driver("Alex Brown", "alex@example.com", "DL-2024-005", date(2027, 9, 1), 91.0, 98, 100, OnDuty, now),
        driver("Lisa Chen", "lisa@example.com", "DL-2024-006", date(2026, 2, 28), 84.0, 65, 70, OffDuty, now),
    ];

    let trips = vec![
        trip("TRIP-1771581600000-001", &vehicles[1], &drivers[0], 2500.0, "Warehouse A", "Store B",
            TripStatus::Dispatched, instant(2026, 2, 20, 10, 0), None, None, now),
        trip("TRIP-1771587000000-002", &vehicles[1], &drivers[1], 3200.0, "Port C", "Store D",
            TripStatus::Dispatched, instant(2026, 2, 20, 11, 30), None, None, now),
        trip("TRIP-1771491600000-003", &vehicles[2], &drivers[2], 1800.0, "Factory E", "Retail F",
            TripStatus::Completed, instant(2026, 2, 19, 9, 0), instant(2026, 2, 19, 17, 0), Some(320.0), now),
        trip("TRIP-1771600000000-004", &vehicles[3], &drivers[4], 2200.0, "Warehouse A", "Store G",
            TripStatus::Draft, None, None, None, now),
    ];

    let fuel_expenses = vec![
        fuel(&vehicles[0], 150.0, 15000, 930.0, date(2026, 1, 20), now),
        fuel(&vehicles[1], 120.0, 12000, 768.0, date(2026, 1, 19), now),
        fuel(&vehicles[2], 140.0, 14000, 854.0, date(2026, 1, 18), now),
        fuel(&vehicles[3], 110.0, 11000, 693.0, date(2026, 1, 17), now),
        fuel(&vehicles[0], 130.0, 13000, 806.0, date(2026, 1, 15), now),
        fuel(&vehicles[1], 145.0, 14500, 928.0, date(2026, 1, 14), now),
    ];

    let maintenance = vec![
        maintenance(&vehicles[0], "Oil Change", 250, date(2026, 1, 20), Completed, now),
        maintenance(&vehicles[1], "Tire Replacement", 800, date(2026, 1, 19), Completed, now),
        maintenance(&vehicles[2], "Brake Service", 1200, date(2026, 1, 21), Scheduled, now),
        maintenance(&vehicles[3], "Engine Inspection", 500, date(2026, 1, 18), Completed, now),
        maintenance(&vehicles[0], "Filter Replacement", 150, date(2026, 1, 10), Completed, now),
        maintenance(&vehicles[2], "Transmission Check", 350, date(2026, 1, 5), Completed, now),
    ];

    for v in vehicles.iter_mut() {
        v.total_fuel_cost = fuel_expenses
            .iter()
            .filter(|f| f.vehicle_id == v.id)
            .map(|f| f.cost)
            .sum();
        v.total_maintenance_cost = maintenance
            .iter()
            .filter(|m| m.vehicle_id == v.id)
            .map(|m| m.cost)
            .sum();
    }

    SeedDataset {
        vehicles,
        drivers,
        trips,
        fuel_expenses,
        maintenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_totals_match_records() {
        let data = demo_dataset(Utc::now());

        for v in &data.vehicles {
            let fuel: Decimal = data.fuel_expenses.iter().filter(|f| f.vehicle_id == v.id).map(|f| f.cost).sum();
            let maint: Decimal = data.maintenance.iter().filter(|m| m.vehicle_id == v.id).map(|m| m.cost).sum();
            assert_eq!(v.total_fuel_cost, fuel);
            assert_eq!(v.total_maintenance_cost, maint);
        }
        assert_eq!(data.vehicles[0].total_fuel_cost, Decimal::from(28000));
        assert_eq!(data.vehicles[2].total_maintenance_cost, Decimal::from(1550));
    }

    #[test]
    fn test_statuses_are_consistent() {
        let data = demo_dataset(Utc::now());

        // Los vehículos con viajes despachados están en ruta
        for t in data.trips.iter().filter(|t| t.status == TripStatus::Dispatched) {
            let v = data.vehicles.iter().find(|v| v.id == t.vehicle_id).unwrap();
            assert_eq!(v.status, VehicleStatus::OnTrip);
        }
        // Los vehículos con mantenimiento programado están en el taller
        for m in data.maintenance.iter().filter(|m| m.status == MaintenanceStatus::Scheduled) {
            let v = data.vehicles.iter().find(|v| v.id == m.vehicle_id).unwrap();
            assert_eq!(v.status, VehicleStatus::InShop);
        }
    }

    #[test]
    fn test_counts() {
        let counts = demo_dataset(Utc::now()).counts();
        assert_eq!(counts.vehicles, 5);
        assert_eq!(counts.drivers, 6);
        assert_eq!(counts.trips, 4);
        assert_eq!(counts.fuel_expenses, 6);
        assert_eq!(counts.maintenance, 6);
    }
}
