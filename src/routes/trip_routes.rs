use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::common_dto::MessageResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripFilters, UpdateTripRequest, UpdateTripStatusRequest};
use crate::middleware::auth::require_permission;
use crate::models::auth::Permission;
use crate::models::trip::TripDetails;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedJson;

pub fn create_trip_router() -> Router<AppState> {
    let reads = Router::new()
        .route("/", get(list_trips))
        .route("/:id", get(get_trip))
        .route_layer(middleware::from_fn_with_state(Permission::ViewFleet, require_permission));

    let writes = Router::new()
        .route("/", post(create_trip))
        .route("/:id", put(update_trip).delete(delete_trip))
        .route("/:id/status", put(update_trip_status).patch(update_trip_status))
        .route_layer(middleware::from_fn_with_state(Permission::ManageTrips, require_permission));

    reads.merge(writes)
}

async fn list_trips(
    State(state): State<AppState>,
    Query(filters): Query<TripFilters>,
) -> Result<Json<Vec<TripDetails>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDetails>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_trip(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTripRequest>,
) -> Result<(StatusCode, Json<TripDetails>), AppError> {
    let controller = TripController::new(state.pool.clone());
    let trip = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateTripRequest>,
) -> Result<Json<TripDetails>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn update_trip_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateTripStatusRequest>,
) -> Result<Json<TripDetails>, AppError> {
    let controller = TripController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, request).await?))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = TripController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(MessageResponse::new("Trip deleted")))
}
