//! Servicio de autenticación
//!
//! Login y registro contra el backend. El login devuelve la sesión
//! completa; el registro NO inicia sesión.

use validator::Validate;

use crate::client::ApiClient;
use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::user::Session;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Iniciar sesión. La respuesta es el documento de sesión literal
    /// ({_id, name, email, role, token}); se guarda sin transformar.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<Session> {
        request.validate()?;
        log::info!("🔑 Logging in as {}", request.email);

        let session: Session = self.client.post_json("/auth/login", request, None).await?;

        log::info!(
            "✅ Login successful for {} (role: {})",
            session.email,
            session.role
        );
        Ok(session)
    }

    /// Registrar una cuenta nueva. Solo interesa que el backend acepte;
    /// el flujo sigue en la pantalla de login.
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        request.validate()?;
        log::info!("📝 Registering account for {}", request.email);

        let _response: ApiResponse<serde_json::Value> = self
            .client
            .post_json("/auth/register", request, None)
            .await?;

        log::info!("✅ Account registered for {}", request.email);
        Ok(())
    }
}
