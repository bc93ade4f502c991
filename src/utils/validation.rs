//! Utilidades de validación
//!
//! Validadores custom para `#[validate(custom = "...")]` y helpers de
//! normalización de la entrada.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validar que un string no esté vacío ni sea solo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("is required".into());
        return Err(error);
    }
    Ok(())
}

/// Matrícula: letras, dígitos, guiones y espacios
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ' ')
    {
        let mut error = ValidationError::new("license_plate");
        error.message = Some("may only contain letters, digits, dashes and spaces".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Recorta y descarta los strings opcionales vacíos
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Primer día del mes y primer día del mes siguiente
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Truck-01").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_license_plate() {
        assert!(validate_license_plate("MH02AB0001").is_ok());
        assert!(validate_license_plate("KA-01 HH 1234").is_ok());
        assert!(validate_license_plate("MH02;DROP").is_err());
    }

    #[test]
    fn test_month_bounds_wrap_december() {
        let (start, end) = month_bounds(2025, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert!(month_bounds(2025, 13).is_none());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(normalize_optional(Some(" Pune ".to_string())), Some("Pune".to_string()));
    }
}
