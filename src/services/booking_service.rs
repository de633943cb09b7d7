//! Servicio de reservas
//!
//! Fechas ocupadas por vehículo, creación de reservas y cambios de estado.
//! La creación solo acepta 201 como confirmación; cualquier otra respuesta
//! conserva el mensaje del servidor para mostrarlo en pantalla.

use crate::client::ApiClient;
use crate::dto::booking_dto::{
    BookedDatesResponse, CreateBookingRequest, UpdateStatusRequest, UserBookingsResponse,
};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::booking::{BookedDateSet, BookingStatus, BookingWithPayment, ConfirmedBooking};
use crate::models::user::Session;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct BookingService {
    client: ApiClient,
}

impl BookingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fechas ya reservadas de un vehículo (sin auth)
    pub async fn booked_dates(&self, vehicle_id: &str) -> AppResult<BookedDateSet> {
        log::info!("📅 Fetching booked dates for vehicle {}", vehicle_id);

        let path = format!(
            "/booking/booked-dates/{}",
            urlencoding::encode(vehicle_id)
        );
        let response: BookedDatesResponse = self.client.get_json(&path, None).await?;

        let set = BookedDateSet::from_wire(&response.booked_dates);
        log::info!(
            "✅ {} booked dates for vehicle {}",
            set.len(),
            vehicle_id
        );
        Ok(set)
    }

    /// Crear una reserva. Solo HTTP 201 cuenta como confirmada.
    pub async fn create(
        &self,
        session: &Session,
        request: &CreateBookingRequest,
    ) -> AppResult<ConfirmedBooking> {
        log::info!(
            "🛎️ Creating booking for vehicle {} ({} → {})",
            request.vehicle,
            request.start_date,
            request.end_date
        );

        let booking: ConfirmedBooking = self
            .client
            .post_json_created("/booking/createBooking", request, Some(&session.token))
            .await?;

        log::info!("✅ Booking {} confirmed by server", booking.id);
        Ok(booking)
    }

    /// Reservas del usuario con sus pagos adjuntos
    pub async fn user_bookings(&self, session: &Session) -> AppResult<Vec<BookingWithPayment>> {
        log::info!("📋 Fetching bookings for user {}", session.id);

        let path = format!(
            "/booking/booking&payment/{}",
            urlencoding::encode(&session.id)
        );
        let response: UserBookingsResponse =
            self.client.get_json(&path, Some(&session.token)).await?;

        Ok(response.bookings)
    }

    /// Cambiar el estado de una reserva (cancelar, eliminar, confirmar)
    pub async fn update_status(
        &self,
        session: &Session,
        booking_id: &str,
        status: BookingStatus,
        vehicle_id: &str,
    ) -> AppResult<()> {
        log::info!("🔄 Updating booking {} to status {}", booking_id, status);

        let path = format!("/booking/updateStatus/{}", urlencoding::encode(booking_id));
        let body = UpdateStatusRequest {
            status,
            vehicle_id: vehicle_id.to_string(),
        };
        let _response: ApiResponse<serde_json::Value> = self
            .client
            .put_json(&path, &body, Some(&session.token))
            .await?;

        Ok(())
    }
}
