use axum::{extract::State, middleware, routing::get, Json, Router};

use crate::controllers::analytics_controller::AnalyticsController;
use crate::dto::analytics_dto::MonthlyCostsQuery;
use crate::middleware::auth::require_permission;
use crate::models::analytics::{
    DashboardSummary, DriverPerformance, FuelEfficiency, MonthlyCosts, TripSummary, VehicleRoi,
};
use crate::models::auth::Permission;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::ValidatedQuery;

pub fn create_analytics_router() -> Router<AppState> {
    // Todos los roles ven el dashboard
    let dashboard = Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(Permission::ViewFleet, require_permission));

    let reports = Router::new()
        .route("/vehicle-roi", get(vehicle_roi))
        .route("/fuel-efficiency", get(fuel_efficiency))
        .route("/driver-performance", get(driver_performance))
        .route("/monthly-costs", get(monthly_costs))
        .route("/trip-summary", get(trip_summary))
        .route_layer(middleware::from_fn_with_state(Permission::ViewAnalytics, require_permission));

    dashboard.merge(reports)
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.dashboard().await?))
}

async fn vehicle_roi(State(state): State<AppState>) -> Result<Json<Vec<VehicleRoi>>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.vehicle_roi().await?))
}

async fn fuel_efficiency(State(state): State<AppState>) -> Result<Json<Vec<FuelEfficiency>>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.fuel_efficiency().await?))
}

async fn driver_performance(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverPerformance>>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.driver_performance().await?))
}

async fn monthly_costs(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MonthlyCostsQuery>,
) -> Result<Json<MonthlyCosts>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.monthly_costs(&query).await?))
}

async fn trip_summary(State(state): State<AppState>) -> Result<Json<TripSummary>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    Ok(Json(controller.trip_summary().await?))
}
