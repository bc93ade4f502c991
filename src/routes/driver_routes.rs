use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::driver_dto::{ComplianceQuery, CreateDriverRequest, DriverFilters, UpdateDriverRequest};
use crate::middleware::auth::require_permission;
use crate::models::auth::Permission;
use crate::models::driver::Driver;
use crate::services::driver_compliance::ComplianceReport;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedJson;

pub fn create_driver_router() -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_drivers))
        .route("/compliance", get(compliance))
        .route("/:id", get(get_driver))
        .route_layer(middleware::from_fn_with_state(Permission::ViewFleet, require_permission));

    let writes = Router::new()
        .route("/", post(create_driver))
        .route("/:id", put(update_driver).delete(delete_driver))
        .route_layer(middleware::from_fn_with_state(Permission::ManageDrivers, require_permission));

    reads.merge(writes)
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(filters): Query<DriverFilters>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn compliance(
    State(state): State<AppState>,
    Query(query): Query<ComplianceQuery>,
) -> Result<Json<ComplianceReport>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.compliance(&query).await?))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_driver(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDriverRequest>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    let controller = DriverController::new(state.pool.clone());
    let driver = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Driver deleted")))
}
