use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::nullable;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFuelExpenseRequest {
    pub vehicle_id: Uuid,
    pub trip_id: Option<Uuid>,
    #[validate(range(min = 0.01, message = "must be greater than zero"))]
    pub liters: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cost: f64,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cost_per_liter: Option<f64>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub km: Option<f64>,
    pub fuel_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFuelExpenseRequest {
    // `null` desvincula el gasto del viaje
    #[serde(default, deserialize_with = "nullable")]
    pub trip_id: Option<Option<Uuid>>,
    #[validate(range(min = 0.01, message = "must be greater than zero"))]
    pub liters: Option<f64>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cost: Option<f64>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub cost_per_liter: Option<f64>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub km: Option<f64>,
    pub fuel_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelFilters {
    pub vehicle_id: Option<Uuid>,
    pub trip_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trip_id_absent_null_or_set() {
        let absent: UpdateFuelExpenseRequest = serde_json::from_str(r#"{"notes":"receipt"}"#).unwrap();
        assert_eq!(absent.trip_id, None);

        let cleared: UpdateFuelExpenseRequest = serde_json::from_str(r#"{"tripId":null}"#).unwrap();
        assert_eq!(cleared.trip_id, Some(None));

        let id = Uuid::new_v4();
        let linked: UpdateFuelExpenseRequest =
            serde_json::from_str(&format!(r#"{{"tripId":"{}"}}"#, id)).unwrap();
        assert_eq!(linked.trip_id, Some(Some(id)));
    }
}
