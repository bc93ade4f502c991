use chrono::{Datelike, Utc};
use sqlx::PgPool;

use crate::dto::analytics_dto::MonthlyCostsQuery;
use crate::dto::vehicle_dto::VehicleFilters;
use crate::models::analytics::{
    DashboardSummary, DriverPerformance, FuelEfficiency, MonthlyCosts, TripSummary, VehicleRoi,
};
use crate::repositories::analytics_repository::AnalyticsRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::analytics_service;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::month_bounds;

pub struct AnalyticsController {
    analytics: AnalyticsRepository,
    vehicles: VehicleRepository,
}

impl AnalyticsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            analytics: AnalyticsRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Las cuatro agregaciones del dashboard corren en paralelo
    pub async fn dashboard(&self) -> Result<DashboardSummary, AppError> {
        let (vehicles, trips, drivers, costs) = futures::try_join!(
            self.analytics.vehicle_counts(),
            self.analytics.trip_counts(),
            self.analytics.driver_counts(),
            self.analytics.cost_totals(),
        )?;

        Ok(analytics_service::dashboard_summary(&vehicles, &trips, &drivers, &costs))
    }

    pub async fn vehicle_roi(&self) -> Result<Vec<VehicleRoi>, AppError> {
        let vehicles = self.vehicles.find_all(&VehicleFilters::default()).await?;
        Ok(analytics_service::vehicle_roi(&vehicles))
    }

    pub async fn fuel_efficiency(&self) -> Result<Vec<FuelEfficiency>, AppError> {
        let rows = self.analytics.fuel_totals_by_vehicle().await?;
        Ok(analytics_service::fuel_efficiency(rows))
    }

    pub async fn driver_performance(&self) -> Result<Vec<DriverPerformance>, AppError> {
        let rows = self.analytics.drivers_with_completed_trips().await?;
        Ok(analytics_service::driver_performance(rows, Utc::now().date_naive()))
    }

    /// Mes pedido o, por defecto, el mes en curso
    pub async fn monthly_costs(&self, query: &MonthlyCostsQuery) -> Result<MonthlyCosts, AppError> {
        let today = Utc::now().date_naive();
        let year = query.year.unwrap_or_else(|| today.year());
        let month = query.month.unwrap_or_else(|| today.month());

        let (first_day, next_month) =
            month_bounds(year, month).ok_or_else(|| bad_request_error("Invalid month"))?;

        let costs = self.analytics.costs_between(first_day, next_month).await?;
        Ok(analytics_service::monthly_costs(first_day, &costs))
    }

    pub async fn trip_summary(&self) -> Result<TripSummary, AppError> {
        let trips = self.analytics.trip_counts().await?;
        Ok(analytics_service::trip_summary(&trips))
    }
}
