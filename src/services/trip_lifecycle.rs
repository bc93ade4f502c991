//! Ciclo de vida de los viajes
//!
//! Reglas puras (sin I/O) que el repositorio aplica dentro de una transacción:
//! validación de capacidad, elegibilidad del conductor y el plan de efectos
//! de cada transición de estado.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;

use crate::models::driver::{Driver, DriverStatus};
use crate::models::trip::{Trip, TripStatus};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::services::driver_compliance::{license_status, LicenseStatus};
use crate::utils::errors::{AppError, AppResult};

/// Cambio de estado solicitado por el cliente
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: TripStatus,
    pub start_odometer: Option<f64>,
    pub end_odometer: Option<f64>,
    pub total_distance: Option<f64>,
}

/// Valores finales del viaje y efectos sobre vehículo y conductor
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub from: TripStatus,
    pub to: TripStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub start_odometer: Option<f64>,
    pub end_odometer: Option<f64>,
    pub total_distance: Option<f64>,
    pub vehicle_status: Option<VehicleStatus>,
    pub vehicle_odometer: Option<f64>,
    pub increment_trips_assigned: bool,
    pub increment_trips_completed: bool,
}

pub fn plan_transition(trip: &Trip, change: &StatusChange, now: DateTime<Utc>) -> AppResult<TransitionPlan> {
    let from = trip.status;
    let to = change.status;

    if !from.can_transition_to(to) {
        return Err(AppError::BadRequest(format!(
            "Invalid status transition from {} to {}",
            from, to
        )));
    }

    let mut plan = TransitionPlan {
        from,
        to,
        start_time: trip.start_time,
        end_time: trip.end_time,
        start_odometer: trip.start_odometer,
        end_odometer: trip.end_odometer,
        total_distance: trip.total_distance,
        vehicle_status: None,
        vehicle_odometer: None,
        increment_trips_assigned: false,
        increment_trips_completed: false,
    };

    match to {
        TripStatus::Dispatched => {
            plan.start_time = Some(now);
            plan.start_odometer = change.start_odometer.or(trip.start_odometer);
            plan.vehicle_status = Some(VehicleStatus::OnTrip);
            plan.increment_trips_assigned = true;
        }
        TripStatus::Completed => {
            plan.end_time = Some(now);
            plan.end_odometer = change.end_odometer.or(trip.end_odometer);

            if let (Some(start), Some(end)) = (plan.start_odometer, plan.end_odometer) {
                if end < start {
                    return Err(AppError::BadRequest(format!(
                        "End odometer ({}) cannot be lower than start odometer ({})",
                        end, start
                    )));
                }
            }

            plan.total_distance = change.total_distance.or_else(|| match (plan.start_odometer, plan.end_odometer) {
                (Some(start), Some(end)) => Some(end - start),
                _ => trip.total_distance,
            });
            plan.vehicle_status = Some(VehicleStatus::Available);
            plan.vehicle_odometer = change.end_odometer;
            plan.increment_trips_completed = true;
        }
        TripStatus::Cancelled => {
            // Un borrador cancelado nunca tocó el vehículo
            if from == TripStatus::Dispatched {
                plan.vehicle_status = Some(VehicleStatus::Available);
            }
        }
        TripStatus::Draft => {}
    }

    Ok(plan)
}

pub fn check_capacity(vehicle: &Vehicle, cargo_weight: f64) -> AppResult<()> {
    if !vehicle.can_carry(cargo_weight) {
        return Err(AppError::BadRequest(format!(
            "Cargo weight ({}kg) exceeds vehicle capacity ({}kg)",
            cargo_weight, vehicle.max_load_capacity
        )));
    }
    Ok(())
}

pub fn check_driver_assignable(driver: &Driver, today: NaiveDate) -> AppResult<()> {
    if license_status(driver.license_expiry, today) == LicenseStatus::Expired {
        return Err(AppError::BadRequest("Driver license has expired".to_string()));
    }
    if driver.status == DriverStatus::Suspended {
        return Err(AppError::BadRequest("Driver is suspended".to_string()));
    }
    Ok(())
}

/// `TRIP-<unix millis>-<3 dígitos>`
pub fn generate_trip_id(now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("TRIP-{}-{:03}", now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleType;
    use crate::services::driver_compliance::tests::driver;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn trip(status: TripStatus) -> Trip {
        Trip {
            id: Uuid::new_v4(),
            trip_id: "TRIP-1700000000000-042".to_string(),
            vehicle_id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            cargo_weight: 1200.0,
            cargo_description: None,
            start_location: "Mumbai".to_string(),
            end_location: "Pune".to_string(),
            start_odometer: None,
            end_odometer: None,
            status,
            start_time: None,
            end_time: None,
            total_distance: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn vehicle(capacity: f64) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            name: "Van-05".to_string(),
            license_plate: "MH02AB0005".to_string(),
            model: "Tata Ace".to_string(),
            vehicle_type: VehicleType::Van,
            max_load_capacity: capacity,
            current_odometer: 0.0,
            status: VehicleStatus::Available,
            region: "West".to_string(),
            acquisition_cost: Decimal::ZERO,
            total_fuel_cost: Decimal::ZERO,
            total_maintenance_cost: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn change(status: TripStatus) -> StatusChange {
        StatusChange {
            status,
            start_odometer: None,
            end_odometer: None,
            total_distance: None,
        }
    }

    #[test]
    fn test_dispatch_sets_start_and_vehicle_on_trip() {
        let now = Utc::now();
        let mut request = change(TripStatus::Dispatched);
        request.start_odometer = Some(12000.0);

        let plan = plan_transition(&trip(TripStatus::Draft), &request, now).unwrap();
        assert_eq!(plan.start_time, Some(now));
        assert_eq!(plan.start_odometer, Some(12000.0));
        assert_eq!(plan.vehicle_status, Some(VehicleStatus::OnTrip));
        assert!(plan.increment_trips_assigned);
        assert!(!plan.increment_trips_completed);
    }

    #[test]
    fn test_complete_computes_distance_and_frees_vehicle() {
        let mut dispatched = trip(TripStatus::Dispatched);
        dispatched.start_odometer = Some(12000.0);
        let mut request = change(TripStatus::Completed);
        request.end_odometer = Some(12180.5);

        let plan = plan_transition(&dispatched, &request, Utc::now()).unwrap();
        assert_eq!(plan.total_distance, Some(180.5));
        assert_eq!(plan.vehicle_status, Some(VehicleStatus::Available));
        assert_eq!(plan.vehicle_odometer, Some(12180.5));
        assert!(plan.increment_trips_completed);
    }

    #[test]
    fn test_explicit_distance_wins() {
        let mut dispatched = trip(TripStatus::Dispatched);
        dispatched.start_odometer = Some(100.0);
        let mut request = change(TripStatus::Completed);
        request.end_odometer = Some(300.0);
        request.total_distance = Some(150.0);

        let plan = plan_transition(&dispatched, &request, Utc::now()).unwrap();
        assert_eq!(plan.total_distance, Some(150.0));
    }

    #[test]
    fn test_end_odometer_below_start_is_rejected() {
        let mut dispatched = trip(TripStatus::Dispatched);
        dispatched.start_odometer = Some(500.0);
        let mut request = change(TripStatus::Completed);
        request.end_odometer = Some(400.0);

        assert!(matches!(
            plan_transition(&dispatched, &request, Utc::now()),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_cancel_only_frees_vehicle_when_dispatched() {
        let from_draft = plan_transition(&trip(TripStatus::Draft), &change(TripStatus::Cancelled), Utc::now()).unwrap();
        assert_eq!(from_draft.vehicle_status, None);

        let from_dispatched =
            plan_transition(&trip(TripStatus::Dispatched), &change(TripStatus::Cancelled), Utc::now()).unwrap();
        assert_eq!(from_dispatched.vehicle_status, Some(VehicleStatus::Available));
        assert!(!from_dispatched.increment_trips_completed);
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = plan_transition(&trip(TripStatus::Completed), &change(TripStatus::Dispatched), Utc::now())
            .unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, "Invalid status transition from completed to dispatched")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_capacity_message_carries_both_values() {
        let err = check_capacity(&vehicle(3500.0), 4000.0).unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, "Cargo weight (4000kg) exceeds vehicle capacity (3500kg)")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(check_capacity(&vehicle(3500.0), 3500.0).is_ok());
    }

    #[test]
    fn test_driver_eligibility() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert!(check_driver_assignable(&driver(90.0, future, DriverStatus::OnDuty), today).is_ok());
        assert!(check_driver_assignable(&driver(90.0, future, DriverStatus::OffDuty), today).is_ok());
        assert!(check_driver_assignable(&driver(90.0, past, DriverStatus::OnDuty), today).is_err());
        assert!(check_driver_assignable(&driver(90.0, future, DriverStatus::Suspended), today).is_err());
    }

    #[test]
    fn test_trip_id_format() {
        let now = Utc::now();
        let id = generate_trip_id(now);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TRIP");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }
}
