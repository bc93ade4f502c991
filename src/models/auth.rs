use serde::{Deserialize, Serialize};

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Manager,
    Dispatcher,
    SafetyOfficer,
    FinancialAnalyst,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Manager => "manager",
            UserRole::Dispatcher => "dispatcher",
            UserRole::SafetyOfficer => "safety_officer",
            UserRole::FinancialAnalyst => "financial_analyst",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manager" => Some(UserRole::Manager),
            "dispatcher" => Some(UserRole::Dispatcher),
            "safety_officer" => Some(UserRole::SafetyOfficer),
            "financial_analyst" => Some(UserRole::FinancialAnalyst),
            _ => None,
        }
    }

    /// Nombre que muestra el dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Manager => "Manager",
            UserRole::Dispatcher => "Dispatcher",
            UserRole::SafetyOfficer => "Safety Officer",
            UserRole::FinancialAnalyst => "Financial Analyst",
        }
    }
}

/// Permisos que comprueban los handlers de la API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewFleet,
    ManageVehicles,
    ManageDrivers,
    ManageTrips,
    LogFuel,
    ManageMaintenance,
    ViewAnalytics,
    ExportReports,
    SeedData,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewFleet => "view_fleet",
            Permission::ManageVehicles => "manage_vehicles",
            Permission::ManageDrivers => "manage_drivers",
            Permission::ManageTrips => "manage_trips",
            Permission::LogFuel => "log_fuel",
            Permission::ManageMaintenance => "manage_maintenance",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ExportReports => "export_reports",
            Permission::SeedData => "seed_data",
        }
    }
}

/// Páginas del dashboard sujetas a la lista de acceso por rol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardPage {
    Dashboard,
    Vehicles,
    Drivers,
    Trips,
    Fuel,
    Maintenance,
    Analytics,
    Reports,
    Settings,
}

impl DashboardPage {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dashboard" => Some(DashboardPage::Dashboard),
            "vehicles" => Some(DashboardPage::Vehicles),
            "drivers" => Some(DashboardPage::Drivers),
            "trips" => Some(DashboardPage::Trips),
            "fuel" => Some(DashboardPage::Fuel),
            "maintenance" => Some(DashboardPage::Maintenance),
            "analytics" => Some(DashboardPage::Analytics),
            "reports" => Some(DashboardPage::Reports),
            "settings" => Some(DashboardPage::Settings),
            _ => None,
        }
    }

    /// Ruta del frontend correspondiente
    pub fn path(&self) -> &'static str {
        match self {
            DashboardPage::Dashboard => "/dashboard",
            DashboardPage::Vehicles => "/dashboard/vehicles",
            DashboardPage::Drivers => "/dashboard/drivers",
            DashboardPage::Trips => "/dashboard/trips",
            DashboardPage::Fuel => "/dashboard/fuel",
            DashboardPage::Maintenance => "/dashboard/maintenance",
            DashboardPage::Analytics => "/dashboard/analytics",
            DashboardPage::Reports => "/dashboard/reports",
            DashboardPage::Settings => "/dashboard/settings",
        }
    }
}

/// Información del usuario autenticado
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // email
    pub name: String,
    pub role: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in [
            UserRole::Manager,
            UserRole::Dispatcher,
            UserRole::SafetyOfficer,
            UserRole::FinancialAnalyst,
        ] {
            assert_eq!(UserRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::from_str("driver"), None);
    }

    #[test]
    fn test_page_lookup() {
        assert_eq!(DashboardPage::from_str("reports"), Some(DashboardPage::Reports));
        assert_eq!(DashboardPage::Reports.path(), "/dashboard/reports");
        assert_eq!(DashboardPage::from_str("admin"), None);
    }
}
