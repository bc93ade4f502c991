//! Services module
//!
//! Lógica de negocio sin I/O: máquina de estados de viajes, cumplimiento de
//! conductores, métricas de la flota, reportes, credenciales y permisos.

pub mod analytics_service;
pub mod auth_service;
pub mod authorization_service;
pub mod driver_compliance;
pub mod fleet_metrics;
pub mod report_service;
pub mod seed_service;
pub mod trip_lifecycle;
