use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::fuel_controller::FuelController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::fuel_dto::{CreateFuelExpenseRequest, FuelFilters, UpdateFuelExpenseRequest};
use crate::middleware::auth::require_permission;
use crate::models::auth::Permission;
use crate::models::fuel_expense::FuelExpenseDetails;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedJson;

pub fn create_fuel_router() -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_fuel))
        .route("/:id", get(get_fuel))
        .route_layer(middleware::from_fn_with_state(Permission::ViewFleet, require_permission));

    let writes = Router::new()
        .route("/", post(create_fuel))
        .route("/:id", put(update_fuel).delete(delete_fuel))
        .route_layer(middleware::from_fn_with_state(Permission::LogFuel, require_permission));

    reads.merge(writes)
}

async fn list_fuel(
    State(state): State<AppState>,
    Query(filters): Query<FuelFilters>,
) -> Result<Json<Vec<FuelExpenseDetails>>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn get_fuel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FuelExpenseDetails>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_fuel(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateFuelExpenseRequest>,
) -> Result<(StatusCode, Json<FuelExpenseDetails>), AppError> {
    let controller = FuelController::new(state.pool.clone());
    let expense = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_fuel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateFuelExpenseRequest>,
) -> Result<Json<FuelExpenseDetails>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_fuel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = FuelController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Fuel expense deleted")))
}
