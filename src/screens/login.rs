//! Pantalla de login
//!
//! Autentica y publica la sesión por el único punto de mutación del
//! SessionStore. El destino tras el login depende del rol: admin va a
//! su consola, el resto al dashboard.

use crate::dto::auth_dto::LoginRequest;
use crate::router::Route;
use crate::services::AuthService;
use crate::session::SessionStore;

/// Resultado del submit de login
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Redirect(Route),
    /// Error mostrado inline; los campos quedan como estaban
    Stay,
}

pub struct LoginScreen {
    service: AuthService,
    store: SessionStore,
    pub email: String,
    pub password: String,
    error: Option<String>,
}

impl LoginScreen {
    pub fn new(service: AuthService, store: SessionStore) -> Self {
        Self {
            service,
            store,
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub async fn submit(&mut self) -> LoginOutcome {
        self.error = None;
        let request = LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };

        let session = match self.service.login(&request).await {
            Ok(session) => session,
            Err(error) => {
                self.error = Some(error.user_message());
                return LoginOutcome::Stay;
            }
        };

        let destination = if session.is_admin() {
            Route::Admin
        } else {
            Route::Dashboard
        };

        if let Err(error) = self.store.login(session).await {
            log::error!("❌ Could not persist session: {}", error);
            self.error = Some(error.user_message());
            return LoginOutcome::Stay;
        }

        LoginOutcome::Redirect(destination)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
