use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::trip_dto::{CreateTripRequest, TripFilters, UpdateTripRequest, UpdateTripStatusRequest};
use crate::models::trip::{TripDetails, TripStatus};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::trip_repository::{NewTrip, TripRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::trip_lifecycle::{
    check_capacity, check_driver_assignable, generate_trip_id, plan_transition, StatusChange,
};
use crate::utils::errors::{bad_request_error, not_found_error, AppError};
use crate::utils::validation::normalize_optional;

pub struct TripController {
    trips: TripRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &TripFilters) -> Result<Vec<TripDetails>, AppError> {
        self.trips.find_all(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TripDetails, AppError> {
        self.trips
            .find_details(id)
            .await?
            .ok_or_else(|| not_found_error("Trip"))
    }

    /// Crea el viaje en borrador tras validar vehículo, capacidad y conductor
    pub async fn create(&self, request: CreateTripRequest) -> Result<TripDetails, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;
        check_capacity(&vehicle, request.cargo_weight)?;

        let driver = self
            .drivers
            .find_by_id(request.driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        let now = Utc::now();
        check_driver_assignable(&driver, now.date_naive())?;

        let trip = self
            .trips
            .create(NewTrip {
                trip_id: generate_trip_id(now),
                vehicle_id: vehicle.id,
                driver_id: driver.id,
                cargo_weight: request.cargo_weight,
                cargo_description: normalize_optional(request.cargo_description),
                start_location: request.start_location.trim().to_string(),
                end_location: request.end_location.trim().to_string(),
                start_odometer: request.start_odometer,
                notes: normalize_optional(request.notes),
            })
            .await?;

        self.get_by_id(trip.id).await
    }

    /// Edición de un viaje en borrador
    pub async fn update(&self, id: Uuid, request: UpdateTripRequest) -> Result<TripDetails, AppError> {
        let mut trip = self
            .trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip"))?;

        if trip.status != TripStatus::Draft {
            return Err(bad_request_error("Only draft trips can be edited"));
        }

        if let Some(weight) = request.cargo_weight {
            let vehicle = self
                .vehicles
                .find_by_id(trip.vehicle_id)
                .await?
                .ok_or_else(|| not_found_error("Vehicle"))?;
            check_capacity(&vehicle, weight)?;
            trip.cargo_weight = weight;
        }
        if request.cargo_description.is_some() {
            trip.cargo_description = normalize_optional(request.cargo_description);
        }
        if let Some(start) = request.start_location {
            trip.start_location = start.trim().to_string();
        }
        if let Some(end) = request.end_location {
            trip.end_location = end.trim().to_string();
        }
        if request.start_odometer.is_some() {
            trip.start_odometer = request.start_odometer;
        }
        if request.notes.is_some() {
            trip.notes = normalize_optional(request.notes);
        }

        self.trips.update_draft(&trip).await?;
        self.get_by_id(id).await
    }

    /// Aplica una transición de la máquina de estados con sus efectos en cascada
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateTripStatusRequest,
    ) -> Result<TripDetails, AppError> {
        let trip = self
            .trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip"))?;

        let change = StatusChange::from(request);
        let plan = plan_transition(&trip, &change, Utc::now())?;

        self.trips.apply_transition(&trip, &plan).await?;
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let trip = self
            .trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip"))?;

        if trip.status == TripStatus::Dispatched {
            return Err(bad_request_error("Dispatched trips cannot be deleted"));
        }

        self.trips.delete(id).await?;
        tracing::info!(trip_id = %trip.trip_id, "🗑️ Viaje eliminado");
        Ok(())
    }
}
