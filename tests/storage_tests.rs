//! Pruebas contra Postgres
//!
//! Cada prueba recibe una base de datos nueva con las migraciones aplicadas.
//! Requieren DATABASE_URL: `cargo test -- --ignored`

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use fleet_ops::controllers::driver_controller::DriverController;
use fleet_ops::controllers::fuel_controller::FuelController;
use fleet_ops::controllers::maintenance_controller::MaintenanceController;
use fleet_ops::controllers::trip_controller::TripController;
use fleet_ops::controllers::vehicle_controller::VehicleController;
use fleet_ops::dto::driver_dto::CreateDriverRequest;
use fleet_ops::dto::fuel_dto::{CreateFuelExpenseRequest, UpdateFuelExpenseRequest};
use fleet_ops::dto::maintenance_dto::{CreateMaintenanceRequest, UpdateMaintenanceRequest};
use fleet_ops::dto::trip_dto::{CreateTripRequest, UpdateTripStatusRequest};
use fleet_ops::dto::vehicle_dto::CreateVehicleRequest;
use fleet_ops::models::driver::{Driver, DriverStatus};
use fleet_ops::models::maintenance::MaintenanceStatus;
use fleet_ops::models::trip::{TripDetails, TripStatus};
use fleet_ops::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use fleet_ops::repositories::trip_repository::TripRepository;
use fleet_ops::repositories::vehicle_repository::VehicleRepository;
use fleet_ops::services::trip_lifecycle::{plan_transition, StatusChange};
use fleet_ops::utils::errors::AppError;

async fn create_truck(pool: &PgPool, plate: &str) -> Vehicle {
    VehicleController::new(pool.clone())
        .create(CreateVehicleRequest {
            name: "Volvo FH16".to_string(),
            license_plate: plate.to_string(),
            model: "FH16 750".to_string(),
            vehicle_type: VehicleType::Truck,
            max_load_capacity: 25000.0,
            current_odometer: Some(1000.0),
            status: None,
            region: Some("Norte".to_string()),
            acquisition_cost: Some(120000.0),
        })
        .await
        .unwrap()
}

async fn create_driver(pool: &PgPool, email: &str) -> Driver {
    DriverController::new(pool.clone())
        .create(CreateDriverRequest {
            name: "Lucía Romero".to_string(),
            email: email.to_string(),
            license_number: format!("LIC-{}", email),
            license_expiry: (Utc::now() + Duration::days(365)).date_naive(),
            safety_score: Some(92.0),
            status: Some(DriverStatus::OnDuty),
        })
        .await
        .unwrap()
}

async fn create_draft_trip(pool: &PgPool, vehicle: &Vehicle, driver: &Driver) -> TripDetails {
    TripController::new(pool.clone())
        .create(CreateTripRequest {
            vehicle_id: vehicle.id,
            driver_id: driver.id,
            cargo_weight: 12000.0,
            cargo_description: Some("Acero laminado".to_string()),
            start_location: "Monterrey".to_string(),
            end_location: "Saltillo".to_string(),
            start_odometer: None,
            notes: None,
        })
        .await
        .unwrap()
}

fn status_request(status: TripStatus, start: Option<f64>, end: Option<f64>) -> UpdateTripStatusRequest {
    UpdateTripStatusRequest {
        status,
        start_odometer: start,
        end_odometer: end,
        total_distance: None,
    }
}

async fn reload_vehicle(pool: &PgPool, id: Uuid) -> Vehicle {
    VehicleRepository::new(pool.clone()).find_by_id(id).await.unwrap().unwrap()
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_fuel_expense_keeps_vehicle_total_in_sync(pool: PgPool) {
    let vehicle = create_truck(&pool, "FUE-001").await;
    let controller = FuelController::new(pool.clone());

    let expense = controller
        .create(CreateFuelExpenseRequest {
            vehicle_id: vehicle.id,
            trip_id: None,
            liters: 150.0,
            cost: 15000.0,
            cost_per_liter: None,
            km: Some(420.0),
            fuel_date: None,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(expense.expense.cost_per_liter, Decimal::from(100));
    assert_eq!(reload_vehicle(&pool, vehicle.id).await.total_fuel_cost, Decimal::from(15000));

    // Se ajusta por la diferencia, no por el costo nuevo
    controller
        .update(
            expense.expense.id,
            UpdateFuelExpenseRequest {
                cost: Some(12000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(reload_vehicle(&pool, vehicle.id).await.total_fuel_cost, Decimal::from(12000));

    controller.delete(expense.expense.id).await.unwrap();
    assert_eq!(reload_vehicle(&pool, vehicle.id).await.total_fuel_cost, Decimal::ZERO);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_fuel_trip_link_can_be_cleared(pool: PgPool) {
    let vehicle = create_truck(&pool, "FUE-002").await;
    let driver = create_driver(&pool, "lucia@fleet.test").await;
    let trip = create_draft_trip(&pool, &vehicle, &driver).await;
    let controller = FuelController::new(pool.clone());

    let expense = controller
        .create(CreateFuelExpenseRequest {
            vehicle_id: vehicle.id,
            trip_id: Some(trip.trip.id),
            liters: 80.0,
            cost: 8000.0,
            cost_per_liter: None,
            km: None,
            fuel_date: None,
            notes: None,
        })
        .await
        .unwrap();

    let notes_only = controller
        .update(
            expense.expense.id,
            UpdateFuelExpenseRequest {
                notes: Some("Carga en ruta".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(notes_only.expense.trip_id, Some(trip.trip.id));

    let cleared = controller
        .update(
            expense.expense.id,
            UpdateFuelExpenseRequest {
                trip_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.expense.trip_id, None);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_trip_lifecycle_updates_vehicle_and_driver(pool: PgPool) {
    let vehicle = create_truck(&pool, "TRP-001").await;
    let driver = create_driver(&pool, "mateo@fleet.test").await;
    let trip = create_draft_trip(&pool, &vehicle, &driver).await;
    let controller = TripController::new(pool.clone());

    let dispatched = controller
        .update_status(trip.trip.id, status_request(TripStatus::Dispatched, Some(1000.0), None))
        .await
        .unwrap();
    assert_eq!(dispatched.trip.status, TripStatus::Dispatched);
    assert!(dispatched.trip.start_time.is_some());
    assert_eq!(reload_vehicle(&pool, vehicle.id).await.status, VehicleStatus::OnTrip);

    let drivers = DriverController::new(pool.clone());
    let assigned = drivers.get_by_id(driver.id).await.unwrap();
    assert_eq!(assigned.trips_assigned, 1);
    assert_eq!(assigned.trips_completed, 0);

    let completed = controller
        .update_status(trip.trip.id, status_request(TripStatus::Completed, None, Some(1350.0)))
        .await
        .unwrap();
    assert_eq!(completed.trip.status, TripStatus::Completed);
    assert_eq!(completed.trip.total_distance, Some(350.0));

    let vehicle = reload_vehicle(&pool, vehicle.id).await;
    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert_eq!(vehicle.current_odometer, 1350.0);

    let finished = drivers.get_by_id(driver.id).await.unwrap();
    assert_eq!(finished.trips_assigned, 1);
    assert_eq!(finished.trips_completed, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_stale_transition_is_rejected(pool: PgPool) {
    let vehicle = create_truck(&pool, "TRP-002").await;
    let driver = create_driver(&pool, "sofia@fleet.test").await;
    let created = create_draft_trip(&pool, &vehicle, &driver).await;
    let trips = TripRepository::new(pool.clone());

    // Dos lectores ven el mismo borrador; el segundo llega tarde
    let stale = trips.find_by_id(created.trip.id).await.unwrap().unwrap();
    let change = StatusChange {
        status: TripStatus::Dispatched,
        start_odometer: Some(1000.0),
        end_odometer: None,
        total_distance: None,
    };
    let plan = plan_transition(&stale, &change, Utc::now()).unwrap();

    trips.apply_transition(&stale, &plan).await.unwrap();
    let second = trips.apply_transition(&stale, &plan).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    // El conductor solo se contó una vez
    let driver = DriverController::new(pool.clone()).get_by_id(driver.id).await.unwrap();
    assert_eq!(driver.trips_assigned, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_trip_delete_distinguishes_missing_from_changed(pool: PgPool) {
    let vehicle = create_truck(&pool, "TRP-003").await;
    let driver = create_driver(&pool, "diego@fleet.test").await;
    let created = create_draft_trip(&pool, &vehicle, &driver).await;
    let trips = TripRepository::new(pool.clone());

    let missing = trips.delete(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    // Despachado entre la lectura y el borrado
    TripController::new(pool.clone())
        .update_status(created.trip.id, status_request(TripStatus::Dispatched, None, None))
        .await
        .unwrap();
    let changed = trips.delete(created.trip.id).await;
    assert!(matches!(changed, Err(AppError::Conflict(_))));

    TripController::new(pool.clone())
        .update_status(created.trip.id, status_request(TripStatus::Cancelled, None, None))
        .await
        .unwrap();
    trips.delete(created.trip.id).await.unwrap();
    let gone = trips.delete(created.trip.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_vehicle_delete_leaves_orphan_records(pool: PgPool) {
    let vehicle = create_truck(&pool, "ORP-001").await;
    let fuel = FuelController::new(pool.clone());

    let expense = fuel
        .create(CreateFuelExpenseRequest {
            vehicle_id: vehicle.id,
            trip_id: None,
            liters: 50.0,
            cost: 5000.0,
            cost_per_liter: None,
            km: None,
            fuel_date: None,
            notes: None,
        })
        .await
        .unwrap();

    VehicleController::new(pool.clone()).delete(vehicle.id).await.unwrap();

    let orphan = fuel.get_by_id(expense.expense.id).await.unwrap();
    assert_eq!(orphan.expense.vehicle_id, vehicle.id);
    assert!(orphan.vehicle.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_maintenance_totals_and_vehicle_status(pool: PgPool) {
    let vehicle = create_truck(&pool, "MNT-001").await;
    let controller = MaintenanceController::new(pool.clone());

    let record = controller
        .create(CreateMaintenanceRequest {
            vehicle_id: vehicle.id,
            service_type: "Cambio de aceite".to_string(),
            cost: 2500.0,
            description: None,
            service_date: None,
            next_service_date: None,
            status: None,
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(record.record.status, MaintenanceStatus::Scheduled);

    let in_shop = reload_vehicle(&pool, vehicle.id).await;
    assert_eq!(in_shop.status, VehicleStatus::InShop);
    assert_eq!(in_shop.total_maintenance_cost, Decimal::from(2500));

    controller
        .update(
            record.record.id,
            UpdateMaintenanceRequest {
                cost: Some(3000.0),
                status: Some(MaintenanceStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let released = reload_vehicle(&pool, vehicle.id).await;
    assert_eq!(released.status, VehicleStatus::Available);
    assert_eq!(released.total_maintenance_cost, Decimal::from(3000));

    controller.delete(record.record.id).await.unwrap();
    assert_eq!(
        reload_vehicle(&pool, vehicle.id).await.total_maintenance_cost,
        Decimal::ZERO
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_editing_completed_maintenance_keeps_vehicle_status(pool: PgPool) {
    let vehicle = create_truck(&pool, "MNT-002").await;
    let controller = MaintenanceController::new(pool.clone());

    let record = controller
        .create(CreateMaintenanceRequest {
            vehicle_id: vehicle.id,
            service_type: "Frenos".to_string(),
            cost: 1800.0,
            description: None,
            service_date: None,
            next_service_date: None,
            status: Some(MaintenanceStatus::Scheduled),
            notes: None,
        })
        .await
        .unwrap();
    controller
        .update(
            record.record.id,
            UpdateMaintenanceRequest {
                status: Some(MaintenanceStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // El vehículo sale de viaje después del servicio
    VehicleRepository::new(pool.clone())
        .update_status(vehicle.id, VehicleStatus::OnTrip)
        .await
        .unwrap();

    // Corregir notas de un registro ya completado no libera el vehículo
    controller
        .update(
            record.record.id,
            UpdateMaintenanceRequest {
                notes: Some("Pastillas delanteras".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(reload_vehicle(&pool, vehicle.id).await.status, VehicleStatus::OnTrip);
}
