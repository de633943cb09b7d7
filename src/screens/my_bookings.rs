//! Pantalla "mis reservas"
//!
//! Lista las reservas del usuario con sus pagos. Cancelar pasa por una
//! confirmación explícita: una reserva pendiente se elimina, una
//! confirmada se cancela, y el aviso menciona el plazo de reembolso solo
//! cuando existe un pago completado.

use crate::models::booking::{BookingStatus, BookingWithPayment};
use crate::screens::reviews::ReviewPanel;
use crate::services::{BookingService, ReviewService};
use crate::session::SessionStore;
use crate::utils::errors::{validation_error, AppResult};

/// Confirmación pendiente de cancelación. Hasta que el usuario confirme
/// no se envía nada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelPrompt {
    pub booking_id: String,
    pub target: BookingStatus,
    pub message: String,
}

/// Resultado de cargar la pantalla
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    RedirectToLogin,
    Done,
}

pub struct MyBookingsScreen {
    booking_service: BookingService,
    review_service: ReviewService,
    store: SessionStore,
    rows: Vec<BookingWithPayment>,
    loading: bool,
    error: Option<String>,
    pending_cancel: Option<CancelPrompt>,
    /// Modal de reseña abierto desde una fila confirmada
    pub review_modal: Option<ReviewPanel>,
}

impl MyBookingsScreen {
    pub fn new(
        booking_service: BookingService,
        review_service: ReviewService,
        store: SessionStore,
    ) -> Self {
        Self {
            booking_service,
            review_service,
            store,
            rows: Vec::new(),
            loading: false,
            error: None,
            pending_cancel: None,
            review_modal: None,
        }
    }

    /// Cargar las reservas del usuario (requiere sesión)
    pub async fn load(&mut self) -> LoadOutcome {
        let Some(session) = self.store.current().await else {
            return LoadOutcome::RedirectToLogin;
        };

        self.loading = true;
        self.error = None;
        match self.booking_service.user_bookings(&session).await {
            Ok(rows) => {
                self.rows = rows;
            }
            Err(error) => {
                log::error!("❌ Failed to load bookings: {}", error);
                self.error = Some(error.user_message());
            }
        }
        self.loading = false;
        LoadOutcome::Done
    }

    /// Pedir confirmación de cancelación. No toca la red: solo arma el
    /// aviso según estado y pago de la fila.
    pub fn request_cancel(&mut self, booking_id: &str) -> Result<CancelPrompt, String> {
        let Some(row) = self.rows.iter().find(|row| row.id == booking_id) else {
            return Err("Booking not found".to_string());
        };
        let Some(target) = row.cancel_target() else {
            return Err("This booking cannot be cancelled".to_string());
        };

        let mut message = "Are you sure you want to cancel this booking?".to_string();
        if row.has_completed_payment() {
            message.push_str(" Your refund will be processed within 5-7 business days.");
        }

        let prompt = CancelPrompt {
            booking_id: booking_id.to_string(),
            target,
            message,
        };
        self.pending_cancel = Some(prompt.clone());
        Ok(prompt)
    }

    pub fn dismiss_cancel(&mut self) {
        self.pending_cancel = None;
    }

    /// Ejecutar la cancelación confirmada y recargar la lista
    pub async fn confirm_cancel(&mut self) -> AppResult<()> {
        let Some(prompt) = self.pending_cancel.take() else {
            return Err(validation_error("cancel", "Nothing pending confirmation"));
        };
        let session = self.store.require().await?;

        let vehicle_id = self
            .rows
            .iter()
            .find(|row| row.id == prompt.booking_id)
            .map(|row| row.vehicle.id.clone())
            .unwrap_or_default();

        self.booking_service
            .update_status(&session, &prompt.booking_id, prompt.target, &vehicle_id)
            .await?;

        log::info!(
            "✅ Booking {} moved to {}, reloading list",
            prompt.booking_id,
            prompt.target
        );
        self.load().await;
        Ok(())
    }

    /// Abrir el modal de reseña para una fila confirmada
    pub fn open_review(&mut self, booking_id: &str) -> AppResult<()> {
        let Some(row) = self.rows.iter().find(|row| row.id == booking_id) else {
            return Err(validation_error("review", "Booking not found"));
        };
        if !row.can_review() {
            return Err(validation_error(
                "review",
                "Only confirmed bookings can be reviewed",
            ));
        }

        self.review_modal = Some(ReviewPanel::new(
            self.review_service.clone(),
            self.store.clone(),
            Some(row.vehicle.id.clone()),
        ));
        Ok(())
    }

    pub fn close_review(&mut self) {
        self.review_modal = None;
    }

    pub fn rows(&self) -> &[BookingWithPayment] {
        &self.rows
    }

    pub fn pending_cancel(&self) -> Option<&CancelPrompt> {
        self.pending_cancel.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
