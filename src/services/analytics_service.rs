//! Armado de las respuestas de analytics
//!
//! Toma los conteos y sumas que devuelve `AnalyticsRepository` y los
//! convierte en las vistas de la API, con los porcentajes ya formateados.

use chrono::NaiveDate;

use crate::models::analytics::{
    DashboardSummary, DriverPerformance, FuelEfficiency, FuelTotalsRow, MonthlyCosts, TripSummary,
    VehicleRoi,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::analytics_repository::{
    CostTotals, DriverCounts, DriverTripsRow, TripCounts, VehicleCounts,
};
use crate::services::driver_compliance::{license_status, risk_level};
use crate::services::fleet_metrics::{average_text, km_per_liter, percentage, roi_percentage};

pub fn dashboard_summary(
    vehicles: &VehicleCounts,
    trips: &TripCounts,
    drivers: &DriverCounts,
    costs: &CostTotals,
) -> DashboardSummary {
    DashboardSummary {
        total_vehicles: vehicles.total,
        active_fleet: vehicles.on_trip,
        maintenance_alerts: vehicles.in_shop,
        available_vehicles: vehicles.available,
        pending_cargo: trips.draft,
        utilization_rate: percentage(vehicles.on_trip, vehicles.total, 1),
        total_trips: trips.total,
        completed_trips: trips.completed,
        active_trips: trips.dispatched,
        cancelled_trips: trips.cancelled,
        completion_rate: percentage(trips.completed, trips.total, 1),
        total_drivers: drivers.total,
        on_duty_drivers: drivers.on_duty,
        suspended_drivers: drivers.suspended,
        total_fuel_cost: costs.fuel,
        total_maintenance_cost: costs.maintenance,
        total_distance: trips.completed_distance,
        avg_safety_score: average_text(drivers.avg_safety_score),
    }
}

pub fn vehicle_roi(vehicles: &[Vehicle]) -> Vec<VehicleRoi> {
    vehicles
        .iter()
        .map(|v| {
            let operational = v.operational_cost();
            VehicleRoi {
                vehicle_id: v.id,
                name: v.name.clone(),
                license_plate: v.license_plate.clone(),
                acquisition_cost: v.acquisition_cost,
                fuel_cost: v.total_fuel_cost,
                maintenance_cost: v.total_maintenance_cost,
                total_operational_cost: operational,
                roi_percentage: roi_percentage(operational, v.acquisition_cost),
            }
        })
        .collect()
}

pub fn fuel_efficiency(rows: Vec<FuelTotalsRow>) -> Vec<FuelEfficiency> {
    rows.into_iter()
        .map(|row| FuelEfficiency {
            km_per_liter: km_per_liter(row.total_km, row.total_liters),
            vehicle_id: row.vehicle_id,
            name: row.name,
            license_plate: row.license_plate,
            total_liters: row.total_liters,
            total_km: row.total_km,
            total_cost: row.total_cost,
            avg_cost_per_liter: row.avg_cost_per_liter,
            record_count: row.record_count,
        })
        .collect()
}

pub fn driver_performance(rows: Vec<DriverTripsRow>, today: NaiveDate) -> Vec<DriverPerformance> {
    rows.into_iter()
        .map(|row| {
            let driver = row.driver;
            DriverPerformance {
                license_status: license_status(driver.license_expiry, today),
                risk_level: risk_level(&driver, today),
                driver_id: driver.id,
                name: driver.name,
                email: driver.email,
                license_number: driver.license_number,
                license_expiry: driver.license_expiry,
                trips_completed: row.completed_trips,
                safety_score: driver.safety_score,
                status: driver.status,
            }
        })
        .collect()
}

/// `first_day` es el día 1 del mes consultado; de ahí sale la etiqueta "February 2026"
pub fn monthly_costs(first_day: NaiveDate, costs: &CostTotals) -> MonthlyCosts {
    use chrono::Datelike;

    MonthlyCosts {
        month: first_day.format("%B %Y").to_string(),
        year: first_day.year(),
        month_number: first_day.month(),
        fuel_cost: costs.fuel,
        maintenance_cost: costs.maintenance,
        total_cost: costs.fuel + costs.maintenance,
    }
}

pub fn trip_summary(trips: &TripCounts) -> TripSummary {
    TripSummary {
        total_trips: trips.total,
        completed_trips: trips.completed,
        active_trips: trips.dispatched,
        cancelled_trips: trips.cancelled,
        completion_rate: percentage(trips.completed, trips.total, 1),
        total_distance: trips.completed_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::driver_compliance::{tests::driver, LicenseStatus, RiskLevel};
    use crate::models::driver::DriverStatus;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_dashboard_rates() {
        let vehicles = VehicleCounts { total: 5, on_trip: 1, in_shop: 1, available: 3 };
        let trips = TripCounts {
            total: 3,
            draft: 1,
            dispatched: 0,
            completed: 2,
            cancelled: 0,
            completed_distance: 640.0,
        };
        let drivers = DriverCounts { total: 2, on_duty: 1, suspended: 0, avg_safety_score: Some(87.24) };
        let costs = CostTotals { fuel: Decimal::from(15000), maintenance: Decimal::from(250) };

        let summary = dashboard_summary(&vehicles, &trips, &drivers, &costs);

        assert_eq!(summary.utilization_rate, "20.0");
        assert_eq!(summary.completion_rate, "66.7");
        assert_eq!(summary.avg_safety_score, "87.2");
        assert_eq!(summary.pending_cargo, 1);
        assert_eq!(summary.maintenance_alerts, 1);
        assert_eq!(summary.total_distance, 640.0);
    }

    #[test]
    fn test_empty_fleet_uses_zero_literals() {
        let summary = dashboard_summary(
            &VehicleCounts::default(),
            &TripCounts::default(),
            &DriverCounts::default(),
            &CostTotals::default(),
        );

        assert_eq!(summary.utilization_rate, "0");
        assert_eq!(summary.completion_rate, "0");
        assert_eq!(summary.avg_safety_score, "0");
    }

    #[test]
    fn test_monthly_label() {
        let first = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let costs = CostTotals { fuel: Decimal::from(1000), maintenance: Decimal::from(250) };

        let monthly = monthly_costs(first, &costs);

        assert_eq!(monthly.month, "February 2026");
        assert_eq!(monthly.month_number, 2);
        assert_eq!(monthly.total_cost, Decimal::from(1250));
    }

    #[test]
    fn test_fuel_efficiency_km_per_liter() {
        let rows = vec![FuelTotalsRow {
            vehicle_id: Uuid::new_v4(),
            name: Some("TR-001".to_string()),
            license_plate: Some("MH02AB0001".to_string()),
            total_liters: 280.0,
            total_km: 1736.0,
            total_cost: Decimal::from(28000),
            avg_cost_per_liter: Decimal::from(100),
            record_count: 2,
        }];

        let result = fuel_efficiency(rows);
        assert_eq!(result[0].km_per_liter, "6.2");
    }

    #[test]
    fn test_driver_performance_uses_counted_trips() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let d = driver(65.0, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(), DriverStatus::OnDuty);

        let result = driver_performance(vec![DriverTripsRow { driver: d, completed_trips: 4 }], today);

        assert_eq!(result[0].trips_completed, 4);
        assert_eq!(result[0].risk_level, RiskLevel::High);
        assert_eq!(result[0].license_status, LicenseStatus::Valid);
    }
}
