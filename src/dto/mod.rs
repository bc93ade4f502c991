//! DTOs de la API
//!
//! Cuerpos de request/response y filtros de query. Los requests se validan
//! con `validator` antes de tocar la base de datos.

pub mod analytics_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod driver_dto;
pub mod fuel_dto;
pub mod maintenance_dto;
pub mod trip_dto;
pub mod vehicle_dto;
