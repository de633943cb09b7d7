//! Servicio de vehículos
//!
//! Catálogo público y CRUD de administración. Las mutaciones reenvían el
//! payload completo; el backend no acepta parches parciales.

use validator::Validate;

use crate::client::ApiClient;
use crate::dto::vehicle_dto::{ApiResponse, VehiclePayload};
use crate::models::user::Session;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct VehicleService {
    client: ApiClient,
}

impl VehicleService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Listar el catálogo completo (sin auth)
    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        log::info!("🚗 Fetching vehicle catalog");

        let response: ApiResponse<Vec<Vehicle>> = self
            .client
            .get_json("/vehicle/getAllVehicles", None)
            .await?;

        let vehicles = response.data.unwrap_or_default();
        log::info!("✅ Catalog loaded: {} vehicles", vehicles.len());
        Ok(vehicles)
    }

    /// Crear un vehículo (solo admin)
    pub async fn create(&self, session: &Session, payload: &VehiclePayload) -> AppResult<Vehicle> {
        payload.validate()?;
        log::info!("🆕 Creating vehicle {} {}", payload.make, payload.model);

        let response: ApiResponse<Vehicle> = self
            .client
            .post_json("/vehicle/create", payload, Some(&session.token))
            .await?;

        response.data.ok_or_else(|| {
            AppError::InvalidResponse("create vehicle response had no data".to_string())
        })
    }

    /// Actualizar un vehículo (solo admin). Reenvía todos los campos.
    pub async fn update(
        &self,
        session: &Session,
        vehicle_id: &str,
        payload: &VehiclePayload,
    ) -> AppResult<Vehicle> {
        payload.validate()?;
        log::info!("✏️ Updating vehicle {}", vehicle_id);

        let path = format!("/vehicle/update/{}", urlencoding::encode(vehicle_id));
        let response: ApiResponse<Vehicle> = self
            .client
            .put_json(&path, payload, Some(&session.token))
            .await?;

        response.data.ok_or_else(|| {
            AppError::InvalidResponse("update vehicle response had no data".to_string())
        })
    }

    /// Eliminar un vehículo (solo admin)
    pub async fn delete(&self, session: &Session, vehicle_id: &str) -> AppResult<()> {
        log::info!("🗑️ Deleting vehicle {}", vehicle_id);

        let path = format!("/vehicle/delete/{}", urlencoding::encode(vehicle_id));
        let _response: ApiResponse<serde_json::Value> = self
            .client
            .delete_json(&path, Some(&session.token))
            .await?;

        Ok(())
    }
}
