use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, PageAccessResponse, SessionResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Login: ruta pública
pub fn create_login_router() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Sesión actual y acceso a páginas: requieren token
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/pages/:page", get(page_access))
}

async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let controller = AuthController::new(state.credentials.clone(), state.jwt.clone());
    Ok(Json(controller.login(&request).await?))
}

async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<SessionResponse> {
    Json(AuthController::session(&user))
}

async fn page_access(
    Extension(user): Extension<AuthenticatedUser>,
    Path(page): Path<String>,
) -> Result<Json<PageAccessResponse>, AppError> {
    Ok(Json(AuthController::page_access(&user, &page)?))
}
