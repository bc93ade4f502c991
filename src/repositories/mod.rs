//! Repositorios sobre `PgPool`
//!
//! Cada repositorio encapsula las consultas SQL de una tabla. Las escrituras
//! que tocan más de una fila corren en una transacción.

pub mod analytics_repository;
pub mod driver_repository;
pub mod fuel_repository;
pub mod maintenance_repository;
pub mod seed_repository;
pub mod trip_repository;
pub mod vehicle_repository;
