use axum::{
    extract::{Path, Query, State},
    http::header,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::analytics_dto::ReportQuery;
use crate::middleware::auth::require_permission;
use crate::models::auth::Permission;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/:kind", get(export_report))
        .route_layer(middleware::from_fn_with_state(Permission::ExportReports, require_permission))
}

async fn export_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kind = ReportController::parse_kind(&kind)?;
    let controller = ReportController::new(state.pool.clone());
    let report = controller.export(kind, &query).await?;

    let disposition = format!("attachment; filename=\"{}\"", report.filename);
    Ok((
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.body,
    ))
}
