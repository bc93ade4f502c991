use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::auth::{DashboardPage, UserInfo};

// Login request; los campos ausentes llegan vacíos y se rechazan con 400
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserInfo,
    pub allowed_pages: Vec<DashboardPage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserInfo,
    pub allowed_pages: Vec<DashboardPage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAccessResponse {
    pub page: DashboardPage,
    pub path: &'static str,
    pub allowed: bool,
}
