use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{FuelType, Transmission};

// Payload de vehículo para crear y actualizar.
// La actualización reenvía TODOS los campos aunque no hayan cambiado;
// el backend no acepta parches parciales.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    #[validate(length(min = 1, max = 50))]
    pub make: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1950, max = 2035))]
    pub year: i32,

    #[validate(range(min = 0.01))]
    pub price_per_day: f64,

    #[validate(length(min = 1, max = 100))]
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 20))]
    pub seats: u8,

    pub fuel_type: FuelType,

    pub transmission: Transmission,

    pub availability: bool,

    #[serde(rename = "images", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// Envelope genérico del backend para endpoints de listado y mutación
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}
