//! Servicio de autorización
//!
//! Tablas estáticas rol → permisos y rol → páginas del dashboard.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use crate::models::auth::{DashboardPage, Permission, UserRole};

lazy_static! {
    static ref ROLE_PERMISSIONS: HashMap<UserRole, HashSet<Permission>> = {
        use Permission::*;

        let mut m = HashMap::new();
        m.insert(
            UserRole::Manager,
            HashSet::from([
                ViewFleet,
                ManageVehicles,
                LogFuel,
                ManageMaintenance,
                ViewAnalytics,
                ExportReports,
                SeedData,
            ]),
        );
        m.insert(
            UserRole::Dispatcher,
            HashSet::from([ViewFleet, ManageTrips, LogFuel]),
        );
        m.insert(
            UserRole::SafetyOfficer,
            HashSet::from([ViewFleet, ManageDrivers, ViewAnalytics]),
        );
        m.insert(
            UserRole::FinancialAnalyst,
            HashSet::from([ViewFleet, LogFuel, ViewAnalytics, ExportReports]),
        );
        m
    };

    static ref ROLE_PAGES: HashMap<UserRole, Vec<DashboardPage>> = {
        use DashboardPage::*;

        let mut m = HashMap::new();
        m.insert(
            UserRole::Manager,
            vec![Dashboard, Vehicles, Maintenance, Fuel, Analytics, Settings],
        );
        m.insert(
            UserRole::Dispatcher,
            vec![Dashboard, Trips, Vehicles, Drivers, Settings],
        );
        m.insert(
            UserRole::SafetyOfficer,
            vec![Dashboard, Drivers, Vehicles, Analytics, Settings],
        );
        m.insert(
            UserRole::FinancialAnalyst,
            vec![Dashboard, Fuel, Maintenance, Analytics, Reports, Settings],
        );
        m
    };
}

pub fn has_permission(role: UserRole, permission: Permission) -> bool {
    ROLE_PERMISSIONS
        .get(&role)
        .map_or(false, |perms| perms.contains(&permission))
}

/// Páginas visibles para el rol, en el orden del menú lateral
pub fn allowed_pages(role: UserRole) -> Vec<DashboardPage> {
    ROLE_PAGES.get(&role).cloned().unwrap_or_default()
}

pub fn can_access_page(role: UserRole, page: DashboardPage) -> bool {
    ROLE_PAGES
        .get(&role)
        .map_or(false, |pages| pages.contains(&page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_permissions_per_role() {
        assert!(has_permission(UserRole::Manager, Permission::ManageVehicles));
        assert!(!has_permission(UserRole::Dispatcher, Permission::ManageVehicles));
        assert!(has_permission(UserRole::Dispatcher, Permission::ManageTrips));
        assert!(!has_permission(UserRole::Manager, Permission::ManageTrips));
        assert!(has_permission(UserRole::SafetyOfficer, Permission::ManageDrivers));
        assert!(has_permission(UserRole::FinancialAnalyst, Permission::LogFuel));
        assert!(!has_permission(UserRole::SafetyOfficer, Permission::LogFuel));
    }

    #[test]
    fn test_every_role_can_view_fleet() {
        for role in [
            UserRole::Manager,
            UserRole::Dispatcher,
            UserRole::SafetyOfficer,
            UserRole::FinancialAnalyst,
        ] {
            assert!(has_permission(role, Permission::ViewFleet));
            assert!(can_access_page(role, DashboardPage::Dashboard));
            assert!(can_access_page(role, DashboardPage::Settings));
        }
    }

    #[test]
    fn test_analytics_and_reports_gates() {
        assert!(!has_permission(UserRole::Dispatcher, Permission::ViewAnalytics));
        assert!(has_permission(UserRole::Manager, Permission::ExportReports));
        assert!(!has_permission(UserRole::SafetyOfficer, Permission::ExportReports));
        assert!(has_permission(UserRole::Manager, Permission::SeedData));
        assert!(!has_permission(UserRole::FinancialAnalyst, Permission::SeedData));
    }

    #[test]
    fn test_page_allow_list() {
        assert_eq!(
            allowed_pages(UserRole::Dispatcher),
            vec![
                DashboardPage::Dashboard,
                DashboardPage::Trips,
                DashboardPage::Vehicles,
                DashboardPage::Drivers,
                DashboardPage::Settings,
            ]
        );
        assert!(can_access_page(UserRole::FinancialAnalyst, DashboardPage::Reports));
        assert!(!can_access_page(UserRole::Manager, DashboardPage::Reports));
        assert!(!can_access_page(UserRole::Manager, DashboardPage::Trips));
    }
}
