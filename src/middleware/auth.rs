//! Middleware de autenticación JWT
//!
//! `require_auth` valida el Bearer token e inyecta `AuthenticatedUser` en las
//! extensions. `require_permission` se monta por grupo de rutas y responde 403
//! cuando el rol no tiene el permiso, antes de leer el cuerpo del request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::{
    models::auth::{Permission, UserInfo, UserRole},
    services::authorization_service::has_permission,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn can(&self, permission: Permission) -> bool {
        has_permission(self.role, permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Role '{}' lacks permission '{}'",
                self.role.as_str(),
                permission.as_str()
            )))
        }
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

impl From<UserInfo> for AuthenticatedUser {
    fn from(user: UserInfo) -> Self {
        Self {
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

/// Middleware de autenticación JWT
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let user = verify_token(token, &state.jwt)?;

    tracing::debug!(email = %user.email, role = user.role.as_str(), "🔑 Token válido");
    request.extensions_mut().insert(AuthenticatedUser::from(user));

    Ok(next.run(request).await)
}

/// Middleware de autorización por permiso
pub async fn require_permission(
    State(permission): State<Permission>,
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    user.require(permission)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            email: "someone@fleetflow.com".to_string(),
            name: "Someone".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_returns_forbidden() {
        let dispatcher = user(UserRole::Dispatcher);
        assert!(dispatcher.require(Permission::ManageTrips).is_ok());

        let err = dispatcher.require(Permission::ManageVehicles).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
