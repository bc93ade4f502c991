use axum::{extract::State, middleware, routing::post, Json, Router};

use crate::controllers::seed_controller::SeedController;
use crate::middleware::auth::require_permission;
use crate::models::auth::Permission;
use crate::services::seed_service::SeedSummary;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub fn create_seed_router() -> Router<AppState> {
    Router::new()
        .route("/", post(seed_database))
        .route_layer(middleware::from_fn_with_state(Permission::SeedData, require_permission))
}

async fn seed_database(State(state): State<AppState>) -> Result<Json<SeedSummary>, AppError> {
    // Fuera de desarrollo el endpoint no existe
    if !state.config.is_development() {
        return Err(not_found_error("Route"));
    }

    let controller = SeedController::new(state.pool.clone());
    Ok(Json(controller.seed().await?))
}
