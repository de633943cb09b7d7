//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos,
//! conversión de tipos y la combinación fecha+hora usada por las reservas.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use validator::ValidationError;

/// Combinar fecha y hora de los pickers en un único instante inequívoco.
///
/// Todos los caminos de submit DEBEN pasar por aquí: versiones anteriores
/// del producto formateaban fecha y hora por separado y el backend recibía
/// instantes inconsistentes. El componente fecha viene del picker de fecha,
/// el componente hora del picker de hora, nunca al revés.
pub fn merge_date_time(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    NaiveDateTime::new(date, time).and_utc()
}

/// Renderizar una hora como la espera el contrato del servidor (HH:MM)
pub fn format_time_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Parsear una fecha reservada tal como llega del servidor.
///
/// El backend ha devuelto tanto timestamps ISO completos como fechas
/// desnudas YYYY-MM-DD según la revisión; se aceptan ambas.
pub fn parse_booked_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    validate_date(value)
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar un rating de reseña (1 a 5 estrellas)
pub fn validate_rating(value: u8) -> Result<(), ValidationError> {
    validate_range(value, 1, 5).map_err(|_| {
        let mut error = ValidationError::new("rating");
        error.add_param("value".into(), &value);
        error.add_param("range".into(), &"1 to 5".to_string());
        error
    })
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_date_time() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let merged = merge_date_time(date, time);
        assert_eq!(merged.to_rfc3339(), "2024-06-11T10:00:00+00:00");
    }

    #[test]
    fn test_merge_keeps_both_components() {
        // El bug histórico: descartar la hora al formatear la fecha
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let time = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        let merged = merge_date_time(date, time);
        assert_eq!(merged.date_naive(), date);
        assert_eq!(merged.time(), time);
    }

    #[test]
    fn test_format_time_hm() {
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_time_hm(time), "09:05");
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("15-01-2024").is_err());
    }

    #[test]
    fn test_parse_booked_date_accepts_both_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(parse_booked_date("2024-06-10").unwrap(), expected);
        assert_eq!(
            parse_booked_date("2024-06-10T00:00:00.000Z").unwrap(),
            expected
        );
        assert_eq!(
            parse_booked_date("2024-06-10T18:30:00+00:00").unwrap(),
            expected
        );
        assert!(parse_booked_date("not-a-date").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }
}
