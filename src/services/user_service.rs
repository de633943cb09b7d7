//! Servicio de usuarios
//!
//! Perfil propio, listado de perfiles (admin) y el endpoint combinado de
//! usuarios con reservas y pagos.

use validator::Validate;

use crate::client::ApiClient;
use crate::dto::user_dto::{UpdateProfileRequest, UserWithActivity};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::user::{Session, UserProfile};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Perfil de la cuenta autenticada
    pub async fn profile(&self, session: &Session) -> AppResult<UserProfile> {
        log::info!("👤 Fetching profile for user {}", session.id);

        let path = format!("/user/userProfile/{}", urlencoding::encode(&session.id));
        self.client.get_json(&path, Some(&session.token)).await
    }

    /// Actualizar el perfil propio. El email no viaja: es de solo lectura.
    pub async fn update_profile(
        &self,
        session: &Session,
        request: &UpdateProfileRequest,
    ) -> AppResult<UserProfile> {
        request.validate()?;
        log::info!("✏️ Updating profile for user {}", session.id);

        let path = format!("/user/updateProfile/{}", urlencoding::encode(&session.id));
        self.client
            .put_json(&path, request, Some(&session.token))
            .await
    }

    /// Todos los perfiles (solo admin)
    pub async fn all_profiles(&self, session: &Session) -> AppResult<Vec<UserProfile>> {
        log::info!("👥 Fetching all user profiles");

        let response: ApiResponse<Vec<UserProfile>> = self
            .client
            .get_json("/user/getAllProfile", Some(&session.token))
            .await?;

        Ok(response.data.unwrap_or_default())
    }

    /// Usuarios con sus reservas y pagos. Con `user_id` limita al usuario
    /// (la vista dashboard); sin él devuelve todos (consola de admin).
    pub async fn activity(
        &self,
        session: &Session,
        user_id: Option<&str>,
    ) -> AppResult<Vec<UserWithActivity>> {
        let path = match user_id {
            Some(id) => format!(
                "/user/users&bookings&payments/{}",
                urlencoding::encode(id)
            ),
            None => "/user/users&bookings&payments".to_string(),
        };

        let response: ApiResponse<Vec<UserWithActivity>> =
            self.client.get_json(&path, Some(&session.token)).await?;

        Ok(response.data.unwrap_or_default())
    }
}
