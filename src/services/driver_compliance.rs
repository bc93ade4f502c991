//! Cumplimiento de conductores
//!
//! Clasificación de licencias (vigente / por vencer / vencida) y nivel de
//! riesgo a partir del safety score, la licencia y la suspensión. Todo se
//! calcula en lectura contra la fecha del día; nada de esto se persiste.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::driver::{Driver, DriverStatus};

/// Días antes del vencimiento en que una licencia pasa a "expiring"
pub const EXPIRY_WARNING_DAYS: i64 = 30;
pub const HIGH_RISK_SCORE: f64 = 70.0;
pub const MEDIUM_RISK_SCORE: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Valid,
    Expiring,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

pub fn days_until_expiry(license_expiry: NaiveDate, today: NaiveDate) -> i64 {
    (license_expiry - today).num_days()
}

pub fn license_status(license_expiry: NaiveDate, today: NaiveDate) -> LicenseStatus {
    let days = days_until_expiry(license_expiry, today);
    if days < 0 {
        LicenseStatus::Expired
    } else if days < EXPIRY_WARNING_DAYS {
        LicenseStatus::Expiring
    } else {
        LicenseStatus::Valid
    }
}

pub fn risk_level(driver: &Driver, today: NaiveDate) -> RiskLevel {
    let license = license_status(driver.license_expiry, today);
    if license == LicenseStatus::Expired
        || driver.safety_score < HIGH_RISK_SCORE
        || driver.status == DriverStatus::Suspended
    {
        RiskLevel::High
    } else if license == LicenseStatus::Expiring || driver.safety_score < MEDIUM_RISK_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Un conductor se puede asignar si está en servicio y su licencia no venció
pub fn is_assignable(driver: &Driver, today: NaiveDate) -> bool {
    driver.status == DriverStatus::OnDuty
        && license_status(driver.license_expiry, today) != LicenseStatus::Expired
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverCompliance {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub safety_score: f64,
    pub status: DriverStatus,
    pub license_status: LicenseStatus,
    pub days_until_expiry: i64,
    pub risk_level: RiskLevel,
    pub assignable: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCounts {
    pub total_drivers: usize,
    pub valid_licenses: usize,
    pub expiring_licenses: usize,
    pub expired_licenses: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub assignable: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub as_of: NaiveDate,
    pub counts: ComplianceCounts,
    pub drivers: Vec<DriverCompliance>,
}

pub fn assess(driver: &Driver, today: NaiveDate) -> DriverCompliance {
    DriverCompliance {
        id: driver.id,
        name: driver.name.clone(),
        email: driver.email.clone(),
        license_number: driver.license_number.clone(),
        license_expiry: driver.license_expiry,
        safety_score: driver.safety_score,
        status: driver.status,
        license_status: license_status(driver.license_expiry, today),
        days_until_expiry: days_until_expiry(driver.license_expiry, today),
        risk_level: risk_level(driver, today),
        assignable: is_assignable(driver, today),
    }
}

/// Evalúa todos los conductores y acumula los contadores por categoría
pub fn build_report(drivers: &[Driver], today: NaiveDate, risk_filter: Option<RiskLevel>) -> ComplianceReport {
    let assessed: Vec<DriverCompliance> = drivers.iter().map(|d| assess(d, today)).collect();

    let mut counts = ComplianceCounts {
        total_drivers: assessed.len(),
        ..Default::default()
    };
    for entry in &assessed {
        match entry.license_status {
            LicenseStatus::Valid => counts.valid_licenses += 1,
            LicenseStatus::Expiring => counts.expiring_licenses += 1,
            LicenseStatus::Expired => counts.expired_licenses += 1,
        }
        match entry.risk_level {
            RiskLevel::High => counts.high_risk += 1,
            RiskLevel::Medium => counts.medium_risk += 1,
            RiskLevel::Low => counts.low_risk += 1,
        }
        if entry.assignable {
            counts.assignable += 1;
        }
    }

    let drivers = match risk_filter {
        Some(level) => assessed.into_iter().filter(|d| d.risk_level == level).collect(),
        None => assessed,
    };

    ComplianceReport {
        as_of: today,
        counts,
        drivers,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;

    pub(crate) fn driver(score: f64, expiry: NaiveDate, status: DriverStatus) -> Driver {
        Driver {
            id: Uuid::new_v4(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            license_number: "DL-2024-001".to_string(),
            license_expiry: expiry,
            safety_score: score,
            trips_completed: 0,
            trips_assigned: 0,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_license_buckets() {
        let today = date(2026, 2, 1);
        assert_eq!(license_status(date(2026, 1, 31), today), LicenseStatus::Expired);
        assert_eq!(license_status(today, today), LicenseStatus::Expiring);
        assert_eq!(license_status(date(2026, 3, 2), today), LicenseStatus::Expiring);
        assert_eq!(license_status(date(2026, 3, 3), today), LicenseStatus::Valid);
    }

    #[test]
    fn test_risk_levels() {
        let today = date(2026, 2, 1);
        let far = date(2028, 1, 1);

        assert_eq!(risk_level(&driver(95.0, far, DriverStatus::OnDuty), today), RiskLevel::Low);
        assert_eq!(risk_level(&driver(76.0, far, DriverStatus::OnDuty), today), RiskLevel::Medium);
        assert_eq!(risk_level(&driver(62.0, far, DriverStatus::OnDuty), today), RiskLevel::High);
        assert_eq!(risk_level(&driver(95.0, far, DriverStatus::Suspended), today), RiskLevel::High);
        assert_eq!(
            risk_level(&driver(95.0, date(2026, 2, 10), DriverStatus::OnDuty), today),
            RiskLevel::Medium
        );
        assert_eq!(
            risk_level(&driver(95.0, date(2025, 6, 20), DriverStatus::OnDuty), today),
            RiskLevel::High
        );
    }

    #[test]
    fn test_assignable_requires_on_duty_and_valid_license() {
        let today = date(2026, 2, 1);
        assert!(is_assignable(&driver(90.0, date(2027, 1, 1), DriverStatus::OnDuty), today));
        assert!(!is_assignable(&driver(90.0, date(2027, 1, 1), DriverStatus::OffDuty), today));
        assert!(!is_assignable(&driver(90.0, date(2025, 1, 1), DriverStatus::OnDuty), today));
    }

    #[test]
    fn test_report_counts_and_filter() {
        let today = date(2026, 2, 1);
        let drivers = vec![
            driver(95.0, date(2027, 12, 31), DriverStatus::OnDuty),
            driver(88.0, date(2026, 2, 15), DriverStatus::OnDuty),
            driver(62.0, date(2024, 3, 10), DriverStatus::Suspended),
        ];

        let report = build_report(&drivers, today, None);
        assert_eq!(report.counts.total_drivers, 3);
        assert_eq!(report.counts.valid_licenses, 1);
        assert_eq!(report.counts.expiring_licenses, 1);
        assert_eq!(report.counts.expired_licenses, 1);
        assert_eq!(report.counts.high_risk, 1);
        assert_eq!(report.counts.assignable, 2);

        let high_only = build_report(&drivers, today, Some(RiskLevel::High));
        assert_eq!(high_only.drivers.len(), 1);
        assert_eq!(high_only.counts.total_drivers, 3);
    }
}
