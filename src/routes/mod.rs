//! Rutas de la API
//!
//! Un router por recurso, anidado bajo su prefijo. Todo salvo `/health` y
//! `/auth/login` pasa por `require_auth`; cada router monta además el
//! permiso que exige a sus lecturas y escrituras.

pub mod analytics_routes;
pub mod auth_routes;
pub mod driver_routes;
pub mod fuel_routes;
pub mod maintenance_routes;
pub mod report_routes;
pub mod seed_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Router completo de la aplicación, ya con su estado
pub fn create_app_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth_routes::create_session_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/trips", trip_routes::create_trip_router())
        .nest("/fuel", fuel_routes::create_fuel_router())
        .nest("/maintenance", maintenance_routes::create_maintenance_router())
        .nest("/analytics", analytics_routes::create_analytics_router())
        .nest("/reports", report_routes::create_report_router())
        .nest("/seed", seed_routes::create_seed_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .merge(auth_routes::create_login_router())
        .merge(protected)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
