use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::booking::{BookingStatus, BookingWithPayment};
use crate::utils::validation::format_time_hm;

// Request de creación de reserva. El contrato del servidor exige fecha y
// hora por separado, pero los campos de fecha llevan el instante combinado
// completo; los campos de hora son el render HH:MM de ese mismo instante.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub user: String,
    pub vehicle: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
}

impl CreateBookingRequest {
    // Único constructor: las horas se derivan de los instantes, nunca se
    // pasan por separado
    pub fn new(
        user_id: &str,
        vehicle_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            user: user_id.to_string(),
            vehicle: vehicle_id.to_string(),
            start_date: start,
            end_date: end,
            start_time: format_time_hm(start.time()),
            end_time: format_time_hm(end.time()),
        }
    }
}

// Respuesta de fechas ocupadas por vehículo
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedDatesResponse {
    #[serde(default)]
    pub booked_dates: Vec<String>,
}

// Cambio de estado de una reserva (cancelar / eliminar / confirmar)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
    pub vehicle_id: String,
}

// Respuesta de "mis reservas" con pagos adjuntos
#[derive(Debug, Clone, Deserialize)]
pub struct UserBookingsResponse {
    #[serde(default)]
    pub bookings: Vec<BookingWithPayment>,
}
