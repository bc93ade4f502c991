//! Cálculos derivados de la flota
//!
//! Porcentajes, ROI y eficiencias. Todas las divisiones protegen el
//! denominador cero devolviendo el literal `"0"`.

use num_traits::ToPrimitive;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// `numerator / denominator * 100` con `decimals` decimales, `"0"` si el denominador es cero
pub fn percentage(numerator: i64, denominator: i64, decimals: usize) -> String {
    if denominator <= 0 {
        return "0".to_string();
    }
    let value = numerator as f64 / denominator as f64 * 100.0;
    format!("{:.*}", decimals, value)
}

/// Igual que `percentage` pero sobre montos monetarios
pub fn decimal_percentage(numerator: Decimal, denominator: Decimal, decimals: usize) -> String {
    if denominator <= Decimal::ZERO {
        return "0".to_string();
    }
    let value = (numerator / denominator * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0);
    format!("{:.*}", decimals, value)
}

/// ROI tal como lo muestra el dashboard: costo operativo sobre costo de adquisición
pub fn roi_percentage(operational_cost: Decimal, acquisition_cost: Decimal) -> String {
    decimal_percentage(operational_cost, acquisition_cost, 2)
}

/// Kilómetros por litro con un decimal
pub fn km_per_liter(km: f64, liters: f64) -> String {
    if liters <= 0.0 {
        return "0".to_string();
    }
    format!("{:.1}", km / liters)
}

/// Promedio formateado con un decimal, `"0"` si no hay datos
pub fn average_text(average: Option<f64>) -> String {
    match average {
        Some(avg) if avg.is_finite() => format!("{:.1}", avg),
        _ => "0".to_string(),
    }
}

/// Precio por litro derivado del costo total, redondeado a centavos
pub fn cost_per_liter(cost: Decimal, liters: f64) -> Option<Decimal> {
    if liters <= 0.0 {
        return None;
    }
    let liters = Decimal::from_f64(liters)?;
    Some((cost / liters).round_dp(2))
}

/// Convierte un `f64` de la API a `Decimal` (montos con dos decimales)
pub fn money(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(2))
}
