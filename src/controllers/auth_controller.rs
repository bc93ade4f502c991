use std::sync::Arc;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, PageAccessResponse, SessionResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::auth::DashboardPage;
use crate::services::auth_service::{authenticate_off_thread, CredentialStore};
use crate::services::authorization_service::{allowed_pages, can_access_page};
use crate::utils::errors::{bad_request_error, not_found_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    credentials: Arc<CredentialStore>,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(credentials: Arc<CredentialStore>, jwt: JwtConfig) -> Self {
        Self { credentials, jwt }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(bad_request_error("Email and password are required"));
        }

        let verified = authenticate_off_thread(
            self.credentials.clone(),
            request.email.clone(),
            request.password.clone(),
        )
        .await;

        let user = match verified {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(email = %request.email.trim(), "🚫 Login fallido");
                return Err(e);
            }
        };

        let (token, expires_at) = generate_token(&user, &self.jwt)?;
        tracing::info!(email = %user.email, role = user.role.as_str(), "✅ Login exitoso");

        Ok(LoginResponse {
            token,
            expires_at,
            allowed_pages: allowed_pages(user.role),
            user,
        })
    }

    pub fn session(user: &AuthenticatedUser) -> SessionResponse {
        SessionResponse {
            user: user.info(),
            allowed_pages: allowed_pages(user.role),
        }
    }

    /// 200 si el rol puede abrir la página, 403 si no; páginas desconocidas 404
    pub fn page_access(user: &AuthenticatedUser, page: &str) -> Result<PageAccessResponse, AppError> {
        let page = DashboardPage::from_str(page).ok_or_else(|| not_found_error("Page"))?;

        if !can_access_page(user.role, page) {
            return Err(AppError::Forbidden(format!(
                "Role '{}' cannot access page '{}'",
                user.role.display_name(),
                page.path()
            )));
        }

        Ok(PageAccessResponse {
            page,
            path: page.path(),
            allowed: true,
        })
    }
}
