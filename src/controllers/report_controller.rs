use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use crate::dto::analytics_dto::ReportQuery;
use crate::dto::driver_dto::DriverFilters;
use crate::dto::fuel_dto::FuelFilters;
use crate::dto::maintenance_dto::MaintenanceFilters;
use crate::dto::vehicle_dto::VehicleFilters;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::fuel_repository::FuelRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::report_service::{
    fuel_report, maintenance_report, payroll_report, vehicle_cost_report, Report, ReportKind,
};
use crate::utils::errors::{not_found_error, AppError};

/// Documento ya renderizado, listo para descargar
#[derive(Debug)]
pub struct RenderedReport {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

pub struct ReportController {
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    fuel: FuelRepository,
    maintenance: MaintenanceRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            fuel: FuelRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
        }
    }

    pub fn parse_kind(kind: &str) -> Result<ReportKind, AppError> {
        ReportKind::from_str(kind).ok_or_else(|| not_found_error("Report"))
    }

    async fn build(&self, kind: ReportKind, query: &ReportQuery) -> Result<Report, AppError> {
        let report = match kind {
            ReportKind::Fuel => {
                let filters = FuelFilters {
                    vehicle_id: query.vehicle_id,
                    trip_id: None,
                };
                fuel_report(&self.fuel.find_all(&filters).await?)
            }
            ReportKind::Maintenance => {
                let filters = MaintenanceFilters {
                    vehicle_id: query.vehicle_id,
                    status: None,
                };
                maintenance_report(&self.maintenance.find_all(&filters).await?)
            }
            ReportKind::VehicleCost => {
                let mut vehicles = self.vehicles.find_all(&VehicleFilters::default()).await?;
                if let Some(vehicle_id) = query.vehicle_id {
                    vehicles.retain(|v| v.id == vehicle_id);
                }
                vehicle_cost_report(&vehicles)
            }
            ReportKind::Payroll => payroll_report(&self.drivers.find_all(&DriverFilters::default()).await?),
        };

        Ok(report)
    }

    pub async fn export(&self, kind: ReportKind, query: &ReportQuery) -> Result<RenderedReport, AppError> {
        let report = self.build(kind, query).await?;
        let today: NaiveDate = Utc::now().date_naive();

        tracing::info!(
            report = kind.title(),
            rows = report.rows.len(),
            "📄 Reporte generado"
        );

        Ok(RenderedReport {
            filename: report.filename(query.format),
            content_type: query.format.content_type(),
            body: report.render(query.format, today),
        })
    }
}
