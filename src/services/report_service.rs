//! Reportes exportables
//!
//! Construye las tablas de los cuatro reportes financieros y las serializa a
//! CSV o a un documento HTML imprimible (el navegador se encarga del PDF).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::driver::{Driver, DriverStatus};
use crate::models::fuel_expense::FuelExpenseDetails;
use crate::models::maintenance::MaintenanceDetails;
use crate::models::vehicle::{Vehicle, VehicleSummary};
use crate::services::fleet_metrics::{km_per_liter, roi_percentage};

/// Sueldo base mensual de un conductor en servicio
pub const BASE_PAY: i64 = 38_000;
/// Bono por viaje completado
pub const TRIP_BONUS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Fuel,
    Maintenance,
    VehicleCost,
    Payroll,
}

impl ReportKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fuel" => Some(ReportKind::Fuel),
            "maintenance" => Some(ReportKind::Maintenance),
            "vehicle-cost" => Some(ReportKind::VehicleCost),
            "payroll" => Some(ReportKind::Payroll),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Fuel => "Fuel Expense Report",
            ReportKind::Maintenance => "Maintenance Cost Report",
            ReportKind::VehicleCost => "Vehicle Cost Summary Report",
            ReportKind::Payroll => "Payroll Summary Report",
        }
    }

    fn file_stem(&self) -> &'static str {
        match self {
            ReportKind::Fuel => "fuel-expense-report",
            ReportKind::Maintenance => "maintenance-cost-report",
            ReportKind::VehicleCost => "vehicle-cost-summary",
            ReportKind::Payroll => "payroll-summary",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Html,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv; charset=utf-8",
            ReportFormat::Html => "text/html; charset=utf-8",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Html => "html",
        }
    }
}

/// Tabla lista para exportar
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub totals: Option<Vec<String>>,
    pub summary: Vec<String>,
}

impl Report {
    pub fn filename(&self, format: ReportFormat) -> String {
        format!("{}.{}", self.kind.file_stem(), format.extension())
    }

    pub fn render(&self, format: ReportFormat, generated_on: NaiveDate) -> String {
        match format {
            ReportFormat::Csv => self.to_csv(),
            ReportFormat::Html => self.to_html(generated_on),
        }
    }

    pub fn to_csv(&self) -> String {
        let mut out = csv_line(&self.headers);
        for row in &self.rows {
            out.push_str(&csv_line(row));
        }
        if let Some(totals) = &self.totals {
            out.push('\n');
            out.push_str(&csv_line(totals));
        }
        out
    }

    pub fn to_html(&self, generated_on: NaiveDate) -> String {
        let title = html_escape(self.kind.title());
        let width = if self.headers.is_empty() {
            100.0
        } else {
            100.0 / self.headers.len() as f64
        };

        let head: String = self
            .headers
            .iter()
            .map(|h| format!("<th style=\"width:{:.1}%\">{}</th>", width, html_escape(h)))
            .collect();

        let mut body = String::new();
        for row in self.rows.iter().chain(self.totals.iter()) {
            body.push_str("<tr>");
            for cell in row {
                body.push_str(&format!("<td>{}</td>", html_escape(cell)));
            }
            body.push_str("</tr>");
        }

        let summary = if self.summary.is_empty() {
            String::new()
        } else {
            let lines: String = self
                .summary
                .iter()
                .map(|l| format!("<p>{}</p>", html_escape(l)))
                .collect();
            format!("<div class=\"summary\"><strong>Summary</strong>{}</div>", lines)
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} - FleetFlow</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 40px; color: #1e293b; }}
h1 {{ font-size: 22px; margin-bottom: 4px; }}
.subtitle {{ color: #64748b; font-size: 13px; margin-bottom: 24px; }}
table {{ width: 100%; border-collapse: collapse; margin-bottom: 20px; }}
th {{ background: #1e293b; color: #fff; padding: 10px 8px; text-align: left; font-size: 12px; }}
td {{ border-bottom: 1px solid #e2e8f0; padding: 8px; font-size: 12px; }}
tr:nth-child(even) {{ background: #f8fafc; }}
.summary {{ background: #f1f5f9; padding: 16px; border-radius: 8px; margin-top: 12px; }}
.summary p {{ margin: 4px 0; font-size: 13px; }}
.footer {{ margin-top: 32px; font-size: 11px; color: #94a3b8; border-top: 1px solid #e2e8f0; padding-top: 12px; }}
@media print {{ body {{ margin: 20px; }} }}
</style>
</head>
<body>
<h1>{title}</h1>
<p class="subtitle">Generated on {date} | FleetFlow Financial Reports</p>
<table>
<thead><tr>{head}</tr></thead>
<tbody>{body}</tbody>
</table>
{summary}
<div class="footer"><p>FleetFlow Report System | Confidential</p></div>
</body>
</html>
"#,
            title = title,
            date = generated_on.format("%B %-d, %Y"),
            head = head,
            body = body,
            summary = summary,
        )
    }
}

fn vehicle_label(vehicle: &Option<VehicleSummary>, fallback: &uuid::Uuid) -> String {
    match vehicle {
        Some(v) => v.license_plate.clone(),
        None => fallback.to_string(),
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn number(value: f64) -> String {
    format!("{}", value)
}

pub fn fuel_report(records: &[FuelExpenseDetails]) -> Report {
    let mut total_liters = 0.0;
    let mut total_km = 0.0;
    let mut total_cost = Decimal::ZERO;

    let rows = records
        .iter()
        .map(|r| {
            let e = &r.expense;
            total_liters += e.liters;
            total_km += e.km;
            total_cost += e.cost;
            vec![
                vehicle_label(&r.vehicle, &e.vehicle_id),
                e.fuel_date.to_string(),
                number(e.liters),
                money(e.cost),
                number(e.km),
                km_per_liter(e.km, e.liters),
            ]
        })
        .collect();

    let efficiency = if total_km > 0.0 && total_liters > 0.0 {
        km_per_liter(total_km, total_liters)
    } else {
        String::new()
    };

    Report {
        kind: ReportKind::Fuel,
        headers: headers(&["Vehicle", "Date", "Liters", "Cost", "Km Driven", "Efficiency (km/L)"]),
        rows,
        totals: Some(vec![
            "Totals".to_string(),
            String::new(),
            number(total_liters),
            money(total_cost),
            number(total_km),
            efficiency,
        ]),
        summary: vec![
            format!("Total Cost: {}", money(total_cost)),
            format!("Total Liters: {}", number(total_liters)),
        ],
    }
}

pub fn maintenance_report(records: &[MaintenanceDetails]) -> Report {
    let mut total_cost = Decimal::ZERO;

    let rows = records
        .iter()
        .map(|r| {
            let m = &r.record;
            total_cost += m.cost;
            vec![
                vehicle_label(&r.vehicle, &m.vehicle_id),
                m.service_date.to_string(),
                m.service_type.clone(),
                money(m.cost),
                m.status.as_str().to_string(),
            ]
        })
        .collect();

    Report {
        kind: ReportKind::Maintenance,
        headers: headers(&["Vehicle", "Date", "Service Type", "Cost", "Status"]),
        rows,
        totals: Some(vec![
            "Total Cost".to_string(),
            String::new(),
            String::new(),
            money(total_cost),
            String::new(),
        ]),
        summary: vec![format!("Total Maintenance Cost: {}", money(total_cost))],
    }
}

pub fn vehicle_cost_report(vehicles: &[Vehicle]) -> Report {
    let rows = vehicles
        .iter()
        .map(|v| {
            vec![
                v.license_plate.clone(),
                money(v.acquisition_cost),
                money(v.total_fuel_cost),
                money(v.total_maintenance_cost),
                money(v.operational_cost()),
                roi_percentage(v.operational_cost(), v.acquisition_cost),
            ]
        })
        .collect();

    let fleet_cost: Decimal = vehicles.iter().map(Vehicle::operational_cost).sum();

    Report {
        kind: ReportKind::VehicleCost,
        headers: headers(&[
            "Vehicle",
            "Acquisition Cost",
            "Fuel Cost",
            "Maintenance Cost",
            "Total Cost",
            "ROI %",
        ]),
        rows,
        totals: None,
        summary: vec![format!("Total Operational Cost: {}", money(fleet_cost))],
    }
}

pub fn payroll_report(drivers: &[Driver]) -> Report {
    let mut total_pay = 0i64;

    let rows = drivers
        .iter()
        .map(|d| {
            let base = if d.status == DriverStatus::OnDuty { BASE_PAY } else { 0 };
            let bonus = i64::from(d.trips_completed) * TRIP_BONUS;
            total_pay += base + bonus;
            vec![
                d.name.clone(),
                d.email.clone(),
                d.trips_completed.to_string(),
                base.to_string(),
                bonus.to_string(),
                (base + bonus).to_string(),
            ]
        })
        .collect();

    Report {
        kind: ReportKind::Payroll,
        headers: headers(&["Driver", "Email", "Trips Completed", "Base Pay", "Bonus", "Total Pay"]),
        rows,
        totals: None,
        summary: vec![format!("Total Payroll: {}", total_pay)],
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

fn csv_line(fields: &[String]) -> String {
    let mut line = fields.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Comillas solo cuando el campo las necesita (coma, comilla o salto de línea)
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
