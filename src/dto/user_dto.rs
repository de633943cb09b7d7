use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::booking::ConfirmedBooking;
use crate::models::payment::PaymentRecord;

// Edición de perfil - el email es de solo lectura y no se envía
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

// Usuario con su actividad: filas del endpoint users&bookings&payments
#[derive(Debug, Clone, Deserialize)]
pub struct UserWithActivity {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bookings: Vec<ConfirmedBooking>,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}
