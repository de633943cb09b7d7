//! Servicio de pagos
//!
//! Crea la sesión de checkout externo y confirma el pago al volver.
//! La confirmación es idempotente en el backend; el cliente solo la envía
//! cuando tiene el set completo de identificadores de retorno.

use crate::client::ApiClient;
use crate::dto::payment_dto::{
    ConfirmPaymentRequest, ConfirmPaymentResponse, CreatePaymentRequest, CreatePaymentResponse,
};
use crate::models::user::Session;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct PaymentService {
    client: ApiClient,
}

impl PaymentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Crear la sesión de checkout. La URL devuelta se entrega al shell
    /// como navegación externa completa.
    pub async fn create_checkout(
        &self,
        session: &Session,
        request: &CreatePaymentRequest,
    ) -> AppResult<CreatePaymentResponse> {
        log::info!(
            "💳 Creating checkout session for booking {} (amount {})",
            request.booking_id,
            request.amount
        );

        let response: CreatePaymentResponse = self
            .client
            .post_json("/payment/createPayment", request, Some(&session.token))
            .await?;

        log::info!("✅ Checkout session created, redirect URL received");
        Ok(response)
    }

    /// Confirmar el pago con los identificadores de la query de retorno
    pub async fn confirm(&self, request: &ConfirmPaymentRequest) -> AppResult<ConfirmPaymentResponse> {
        log::info!(
            "🧾 Confirming payment for booking {} (session {})",
            request.booking_id,
            request.session_id
        );

        let response: ConfirmPaymentResponse = self
            .client
            .post_json("/payment/success", request, None)
            .await?;

        log::info!("✅ Payment confirmed for booking {}", request.booking_id);
        Ok(response)
    }
}
