use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::maintenance_dto::{CreateMaintenanceRequest, MaintenanceFilters, UpdateMaintenanceRequest};
use crate::middleware::auth::require_permission;
use crate::models::auth::Permission;
use crate::models::maintenance::MaintenanceDetails;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedJson;

pub fn create_maintenance_router() -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_maintenance))
        .route("/:id", get(get_maintenance))
        .route_layer(middleware::from_fn_with_state(Permission::ViewFleet, require_permission));

    let writes = Router::new()
        .route("/", post(create_maintenance))
        .route("/:id", put(update_maintenance).delete(delete_maintenance))
        .route_layer(middleware::from_fn_with_state(Permission::ManageMaintenance, require_permission));

    reads.merge(writes)
}

async fn list_maintenance(
    State(state): State<AppState>,
    Query(filters): Query<MaintenanceFilters>,
) -> Result<Json<Vec<MaintenanceDetails>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn get_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceDetails>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_maintenance(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<MaintenanceDetails>), AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let record = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateMaintenanceRequest>,
) -> Result<Json<MaintenanceDetails>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Maintenance record deleted")))
}
