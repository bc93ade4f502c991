//! Controladores
//!
//! Un controlador por recurso. Cada uno agrupa los repositorios que necesita
//! y aplica las reglas de negocio antes de escribir.

pub mod analytics_controller;
pub mod auth_controller;
pub mod driver_controller;
pub mod fuel_controller;
pub mod maintenance_controller;
pub mod report_controller;
pub mod seed_controller;
pub mod trip_controller;
pub mod vehicle_controller;
