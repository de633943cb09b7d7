//! Pantalla de pago
//!
//! Recibe la reserva confirmada y el snapshot del vehículo desde la
//! pantalla de reserva. Crear el checkout devuelve una URL externa que el
//! shell debe tratar como navegación completa fuera de la aplicación.

use crate::dto::payment_dto::CreatePaymentRequest;
use crate::models::booking::{ConfirmedBooking, VehicleSnapshot};
use crate::router::{Navigation, Route};
use crate::services::PaymentService;
use crate::session::SessionStore;
use crate::utils::validation::validate_positive;

/// Estado de navegación que necesita la pantalla de pago
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentContext {
    pub booking: ConfirmedBooking,
    pub vehicle: VehicleSnapshot,
}

/// Resultado de pulsar "Pay Now"
#[derive(Debug, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Entregar esta URL al shell como navegación externa completa
    CheckoutRedirect(String),
    /// Sin sesión: a /login sin tocar la red
    RedirectToLogin,
    /// Error mostrado inline; no se navega a ningún lado
    Stay,
    /// Ya hay un intento en vuelo: el botón está deshabilitado
    Ignored,
}

pub struct PaymentScreen {
    service: PaymentService,
    store: SessionStore,
    context: Option<PaymentContext>,
    in_flight: bool,
    error: Option<String>,
}

impl PaymentScreen {
    pub fn new(service: PaymentService, store: SessionStore, context: Option<PaymentContext>) -> Self {
        if context.is_none() {
            log::warn!("⚠️ Payment screen reached without a booking");
        }
        Self {
            service,
            store,
            context,
            in_flight: false,
            error: None,
        }
    }

    /// Render terminal "Booking Not Found" cuando no llegó la reserva
    pub fn is_missing_booking(&self) -> bool {
        self.context.is_none()
    }

    pub fn return_home(&self) -> Navigation {
        Navigation::Internal(Route::Home)
    }

    /// Importe a cobrar: el total del servidor, o días por precio como
    /// respaldo si la reserva llegó sin total
    pub fn amount(&self) -> Option<f64> {
        let context = self.context.as_ref()?;
        Some(context.booking.total_price.unwrap_or_else(|| {
            let days = context.booking.total_days.unwrap_or(1);
            f64::from(days) * context.vehicle.price_per_day
        }))
    }

    /// Iniciar el checkout. Deshabilitado mientras hay un intento en vuelo.
    pub async fn pay_now(&mut self) -> PaymentOutcome {
        if self.in_flight {
            return PaymentOutcome::Ignored;
        }
        let Some(context) = self.context.clone() else {
            return PaymentOutcome::Stay;
        };
        let Some(session) = self.store.current().await else {
            return PaymentOutcome::RedirectToLogin;
        };
        let Some(amount) = self.amount() else {
            return PaymentOutcome::Stay;
        };
        if validate_positive(amount).is_err() {
            log::warn!("⚠️ Refusing checkout for non-positive amount {}", amount);
            self.error = Some("Invalid payment amount".to_string());
            return PaymentOutcome::Stay;
        }

        self.in_flight = true;
        self.error = None;

        let request = CreatePaymentRequest {
            booking_id: context.booking.id.clone(),
            user_id: session.id.clone(),
            amount,
            vehicle_name: context.vehicle.title(),
        };

        match self.service.create_checkout(&session, &request).await {
            Ok(response) => {
                // in_flight queda activo: la página está saliendo al checkout
                PaymentOutcome::CheckoutRedirect(response.url)
            }
            Err(error) => {
                log::error!("❌ Checkout session creation failed: {}", error);
                self.in_flight = false;
                self.error = Some(error.user_message());
                PaymentOutcome::Stay
            }
        }
    }

    pub fn context(&self) -> Option<&PaymentContext> {
        self.context.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
