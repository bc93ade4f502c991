//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL (ver `migrations/`).

pub mod analytics;
pub mod auth;
pub mod driver;
pub mod fuel_expense;
pub mod maintenance;
pub mod trip;
pub mod vehicle;
