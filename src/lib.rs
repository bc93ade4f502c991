//! Fleet operations API
//!
//! Backend de gestión de flota: vehículos, conductores, viajes, combustible y
//! mantenimiento, con analytics y reportes para los dashboards por rol.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
