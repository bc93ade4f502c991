use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::vehicle_repository::{NewVehicle, VehicleRepository};
use crate::services::fleet_metrics::money;
use crate::utils::errors::{bad_request_error, duplicate_error, not_found_error, AppError};
use crate::utils::validation::normalize_optional;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        self.repository.find_all(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let license_plate = request.license_plate.trim().to_string();

        if self.repository.license_plate_exists(&license_plate, None).await? {
            return Err(duplicate_error("Vehicle", "licensePlate", &license_plate));
        }

        let acquisition_cost = match request.acquisition_cost {
            Some(value) => money(value).ok_or_else(|| bad_request_error("Invalid acquisitionCost"))?,
            None => Default::default(),
        };

        let vehicle = self
            .repository
            .create(NewVehicle {
                name: request.name.trim().to_string(),
                license_plate,
                model: request.model.trim().to_string(),
                vehicle_type: request.vehicle_type,
                max_load_capacity: request.max_load_capacity,
                current_odometer: request.current_odometer.unwrap_or(0.0),
                status: request.status.unwrap_or(VehicleStatus::Available),
                region: normalize_optional(request.region).unwrap_or_else(|| "Unknown".to_string()),
                acquisition_cost,
            })
            .await?;

        tracing::info!(vehicle_id = %vehicle.id, plate = %vehicle.license_plate, "🚛 Vehículo creado");
        Ok(vehicle)
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        let mut vehicle = self.get_by_id(id).await?;

        if let Some(plate) = request.license_plate {
            let plate = plate.trim().to_string();
            if plate != vehicle.license_plate
                && self.repository.license_plate_exists(&plate, Some(id)).await?
            {
                return Err(duplicate_error("Vehicle", "licensePlate", &plate));
            }
            vehicle.license_plate = plate;
        }
        if let Some(name) = request.name {
            vehicle.name = name.trim().to_string();
        }
        if let Some(model) = request.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(vehicle_type) = request.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(capacity) = request.max_load_capacity {
            vehicle.max_load_capacity = capacity;
        }
        if let Some(odometer) = request.current_odometer {
            vehicle.current_odometer = odometer;
        }
        if let Some(status) = request.status {
            vehicle.status = status;
        }
        if let Some(region) = normalize_optional(request.region) {
            vehicle.region = region;
        }
        if let Some(cost) = request.acquisition_cost {
            vehicle.acquisition_cost =
                money(cost).ok_or_else(|| bad_request_error("Invalid acquisitionCost"))?;
        }

        self.repository.update(&vehicle).await
    }

    /// out_of_service ↔ available
    pub async fn toggle_service(&self, id: Uuid) -> Result<Vehicle, AppError> {
        let vehicle = self.get_by_id(id).await?;
        let next = vehicle.status.toggled_service();

        let updated = self.repository.update_status(id, next).await?;
        tracing::info!(
            vehicle_id = %id,
            from = vehicle.status.as_str(),
            to = next.as_str(),
            "🔧 Estado de servicio cambiado"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        tracing::info!(vehicle_id = %id, "🗑️ Vehículo eliminado");
        Ok(())
    }
}
