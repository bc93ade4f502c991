use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::fuel_dto::{CreateFuelExpenseRequest, FuelFilters, UpdateFuelExpenseRequest};
use crate::models::fuel_expense::FuelExpenseDetails;
use crate::repositories::fuel_repository::{FuelRepository, NewFuelExpense};
use crate::services::fleet_metrics::{cost_per_liter, money};
use crate::utils::errors::{bad_request_error, not_found_error, AppError};
use crate::utils::validation::normalize_optional;

pub struct FuelController {
    repository: FuelRepository,
}

fn to_money(value: f64, field: &str) -> Result<Decimal, AppError> {
    money(value).ok_or_else(|| bad_request_error(&format!("Invalid {}", field)))
}

/// Precio por litro informado o, si falta, derivado de costo y litros
fn resolve_cost_per_liter(explicit: Option<f64>, cost: Decimal, liters: f64) -> Result<Decimal, AppError> {
    match explicit {
        Some(value) => to_money(value, "costPerLiter"),
        None => Ok(cost_per_liter(cost, liters).unwrap_or_default()),
    }
}

impl FuelController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FuelRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: &FuelFilters) -> Result<Vec<FuelExpenseDetails>, AppError> {
        self.repository.find_all(filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<FuelExpenseDetails, AppError> {
        self.repository
            .find_details(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel expense"))
    }

    pub async fn create(&self, request: CreateFuelExpenseRequest) -> Result<FuelExpenseDetails, AppError> {
        let cost = to_money(request.cost, "cost")?;
        let per_liter = resolve_cost_per_liter(request.cost_per_liter, cost, request.liters)?;

        let expense = self
            .repository
            .create(NewFuelExpense {
                vehicle_id: request.vehicle_id,
                trip_id: request.trip_id,
                liters: request.liters,
                cost,
                cost_per_liter: per_liter,
                km: request.km.unwrap_or(0.0),
                fuel_date: request.fuel_date.unwrap_or_else(|| Utc::now().date_naive()),
                notes: normalize_optional(request.notes),
            })
            .await?;

        self.get_by_id(expense.id).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateFuelExpenseRequest) -> Result<FuelExpenseDetails, AppError> {
        let mut expense = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fuel expense"))?;

        let amounts_changed = request.cost.is_some() || request.liters.is_some();

        if let Some(cost) = request.cost {
            expense.cost = to_money(cost, "cost")?;
        }
        if let Some(liters) = request.liters {
            expense.liters = liters;
        }
        if request.cost_per_liter.is_some() || amounts_changed {
            expense.cost_per_liter =
                resolve_cost_per_liter(request.cost_per_liter, expense.cost, expense.liters)?;
        }
        if let Some(km) = request.km {
            expense.km = km;
        }
        if let Some(date) = request.fuel_date {
            expense.fuel_date = date;
        }
        if let Some(trip_id) = request.trip_id {
            expense.trip_id = trip_id;
        }
        if request.notes.is_some() {
            expense.notes = normalize_optional(request.notes);
        }

        self.repository.update(&expense).await?;
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        tracing::info!(expense_id = %id, "🗑️ Gasto de combustible eliminado");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_per_liter_derived_when_missing() {
        let derived = resolve_cost_per_liter(None, Decimal::from(15000), 150.0).unwrap();
        assert_eq!(derived, Decimal::from(100));

        let explicit = resolve_cost_per_liter(Some(98.5), Decimal::from(15000), 150.0).unwrap();
        assert_eq!(explicit.to_string(), "98.5");
    }
}
