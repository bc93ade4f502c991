//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todo es inmutable salvo el pool.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::auth_service::CredentialStore;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub credentials: Arc<CredentialStore>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, credentials: CredentialStore) -> Self {
        Self {
            pool,
            jwt: JwtConfig::from(&config),
            config: Arc::new(config),
            credentials: Arc::new(credentials),
        }
    }
}
