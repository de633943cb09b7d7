//! Modelo de reservas
//!
//! Este módulo contiene el borrador de reserva que manejan los pickers,
//! el set de fechas ocupadas por vehículo y la reserva confirmada que
//! devuelve el backend.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::payment::{PaymentRecord, PaymentStatus};
use super::vehicle::Vehicle;
use crate::utils::validation::{merge_date_time, parse_booked_date};

/// Estado de una reserva según el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Remove,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Remove => "remove",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "remove" => Ok(BookingStatus::Remove),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BookingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Fechas ya reservadas de un vehículo, normalizadas a días naturales.
///
/// El backend ha devuelto tanto timestamps ISO como fechas desnudas; las
/// entradas no parseables se descartan con un warning en vez de tirar
/// toda la respuesta.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookedDateSet {
    dates: HashSet<NaiveDate>,
}

impl BookedDateSet {
    pub fn from_wire(values: &[String]) -> Self {
        let mut dates = HashSet::new();
        for value in values {
            match parse_booked_date(value) {
                Ok(date) => {
                    dates.insert(date);
                }
                Err(_) => {
                    log::warn!("⚠️ Fecha reservada no parseable, se ignora: {}", value);
                }
            }
        }
        Self { dates }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

/// Borrador de reserva: los cuatro pickers, todos opcionales hasta el submit.
/// Nunca se persiste.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

impl BookingDraft {
    /// ¿Están los cuatro campos seleccionados?
    pub fn is_complete(&self) -> bool {
        self.start_date.is_some()
            && self.start_time.is_some()
            && self.end_date.is_some()
            && self.end_time.is_some()
    }

    /// Mínimo seleccionable para el picker de fin: la fecha de inicio.
    /// Cambiar el inicio NO borra un fin ya elegido, solo mueve el mínimo.
    pub fn min_end_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Instantes combinados (inicio, fin) cuando el borrador está completo
    pub fn merged_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = merge_date_time(self.start_date?, self.start_time?);
        let end = merge_date_time(self.end_date?, self.end_time?);
        Some((start, end))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Reserva confirmada tal como la devuelve el backend al crearla
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedBooking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    #[serde(rename = "vehicle")]
    pub vehicle_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub total_days: Option<u32>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

/// Snapshot de vehículo que viaja con una reserva (campos de display, nada más)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub make: String,
    pub model: String,
    pub price_per_day: f64,
    #[serde(rename = "images", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl VehicleSnapshot {
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

impl From<&Vehicle> for VehicleSnapshot {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            price_per_day: vehicle.price_per_day,
            image_url: vehicle.image_url.clone(),
            location: Some(vehicle.location.clone()),
        }
    }
}

/// Fila de "mis reservas": reserva con vehículo poblado y pago adjunto
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithPayment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "user")]
    pub user_id: String,
    pub vehicle: VehicleSnapshot,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub total_days: Option<u32>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub payment: Option<PaymentRecord>,
}

impl BookingWithPayment {
    /// Solo las reservas confirmadas pueden reseñar el vehículo
    pub fn can_review(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Estado destino al cancelar: pendiente se elimina, confirmada se cancela.
    /// Las demás no ofrecen la acción.
    pub fn cancel_target(&self) -> Option<BookingStatus> {
        match self.status {
            BookingStatus::Pending => Some(BookingStatus::Remove),
            BookingStatus::Confirmed => Some(BookingStatus::Cancelled),
            BookingStatus::Cancelled | BookingStatus::Remove => None,
        }
    }

    /// ¿Hay un pago completado? Decide si la confirmación de cancelación
    /// menciona el plazo de reembolso.
    pub fn has_completed_payment(&self) -> bool {
        matches!(&self.payment, Some(payment) if payment.status == PaymentStatus::Paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_booking_status_parses_any_casing() {
        assert_eq!(
            "Confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(
            "PENDING".parse::<BookingStatus>().unwrap(),
            BookingStatus::Pending
        );
        assert_eq!(
            "remove".parse::<BookingStatus>().unwrap(),
            BookingStatus::Remove
        );
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_booked_set_accepts_mixed_wire_shapes_and_skips_garbage() {
        let wire = vec![
            "2024-06-10".to_string(),
            "2024-06-11T00:00:00.000Z".to_string(),
            "definitely-not-a-date".to_string(),
        ];
        let set = BookedDateSet::from_wire(&wire);
        assert_eq!(set.len(), 2);
        assert!(set.contains(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()));
        assert!(set.contains(NaiveDate::from_ymd_opt(2024, 6, 11).unwrap()));
    }

    #[test]
    fn test_draft_incomplete_until_all_four_picked() {
        let mut draft = BookingDraft::default();
        assert!(!draft.is_complete());
        assert!(draft.merged_window().is_none());

        draft.start_date = NaiveDate::from_ymd_opt(2024, 6, 11);
        draft.start_time = NaiveTime::from_hms_opt(10, 0, 0);
        draft.end_date = NaiveDate::from_ymd_opt(2024, 6, 12);
        assert!(!draft.is_complete());

        draft.end_time = NaiveTime::from_hms_opt(10, 0, 0);
        assert!(draft.is_complete());

        let (start, end) = draft.merged_window().unwrap();
        assert_eq!(start.to_rfc3339(), "2024-06-11T10:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2024-06-12T10:00:00+00:00");
    }

    #[test]
    fn test_changing_start_moves_minimum_without_clearing_end() {
        let mut draft = BookingDraft {
            start_date: NaiveDate::from_ymd_opt(2024, 6, 11),
            start_time: NaiveTime::from_hms_opt(10, 0, 0),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 15),
            end_time: NaiveTime::from_hms_opt(10, 0, 0),
        };
        draft.start_date = NaiveDate::from_ymd_opt(2024, 6, 14);
        assert_eq!(draft.min_end_date(), NaiveDate::from_ymd_opt(2024, 6, 14));
        assert_eq!(draft.end_date, NaiveDate::from_ymd_opt(2024, 6, 15));
    }

    #[test]
    fn test_confirmed_booking_parses_wire_shape() {
        let raw = r#"{
            "_id": "bk-9",
            "user": "u-1",
            "vehicle": "veh-1",
            "startDate": "2024-06-11T10:00:00.000Z",
            "endDate": "2024-06-12T10:00:00.000Z",
            "startTime": "10:00",
            "endTime": "10:00",
            "status": "pending",
            "totalDays": 1,
            "totalPrice": 55.0
        }"#;
        let booking: ConfirmedBooking = serde_json::from_str(raw).unwrap();
        assert_eq!(booking.id, "bk-9");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, Some(55.0));
    }

    #[test]
    fn test_cancel_target_depends_on_status() {
        let raw = r#"{
            "_id": "bk-1",
            "user": "u-1",
            "vehicle": {"_id": "veh-1", "make": "Kia", "model": "Rio", "pricePerDay": 40.0},
            "startDate": "2024-06-11T10:00:00Z",
            "endDate": "2024-06-12T10:00:00Z",
            "startTime": "10:00",
            "endTime": "10:00",
            "status": "pending"
        }"#;
        let mut row: BookingWithPayment = serde_json::from_str(raw).unwrap();
        assert_eq!(row.cancel_target(), Some(BookingStatus::Remove));
        assert!(!row.can_review());
        assert!(!row.has_completed_payment());

        row.status = BookingStatus::Confirmed;
        assert_eq!(row.cancel_target(), Some(BookingStatus::Cancelled));
        assert!(row.can_review());

        row.status = BookingStatus::Cancelled;
        assert_eq!(row.cancel_target(), None);
    }
}
