use serde::{Deserialize, Serialize};

use crate::models::booking::ConfirmedBooking;
use crate::models::payment::PaymentRecord;

// Request de sesión de checkout - el backend responde con la URL externa
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub booking_id: String,
    pub user_id: String,
    pub amount: f64,
    // Nombre mostrado en la línea del checkout
    pub vehicle_name: String,
}

// Respuesta de creación: URL de redirección al checkout externo
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentResponse {
    pub url: String,
}

// Confirmación tras volver del checkout. Los tres identificadores vienen
// de la query de retorno; sin el set completo NO se confirma.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub session_id: String,
    pub booking_id: String,
    pub user_id: String,
}

// Respuesta de confirmación
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPaymentResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payment: Option<PaymentRecord>,
    #[serde(default)]
    pub booking: Option<ConfirmedBooking>,
}
