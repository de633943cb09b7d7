//! Pantalla de registro
//!
//! Da de alta la cuenta y lleva a /login. El registro nunca inicia
//! sesión por sí mismo.

use crate::dto::auth_dto::RegisterRequest;
use crate::router::Route;
use crate::services::AuthService;

/// Resultado del submit de registro
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Redirect(Route),
    Stay,
}

pub struct RegisterScreen {
    service: AuthService,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    error: Option<String>,
}

impl RegisterScreen {
    pub fn new(service: AuthService) -> Self {
        Self {
            service,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            phone: None,
            error: None,
        }
    }

    pub async fn submit(&mut self) -> RegisterOutcome {
        self.error = None;
        let request = RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: self.phone.clone(),
        };

        match self.service.register(&request).await {
            Ok(()) => RegisterOutcome::Redirect(Route::Login),
            Err(error) => {
                self.error = Some(error.user_message());
                RegisterOutcome::Stay
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
