//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente
//! y su construcción a partir de respuestas del servicio remoto.

use reqwest::StatusCode;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Acción que requiere sesión intentada sin sesión activa.
    /// Se maneja redirigiendo a /login antes de cualquier request.
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Pantalla alcanzada sin el estado de navegación que necesita
    /// (sin vehículo, sin reserva). Nunca debe provocar un pánico.
    #[error("Missing navigation state: {0}")]
    MissingState(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// Construir el error tipado que corresponde a un status HTTP no-2xx,
    /// usando el mensaje del servidor cuando exista.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message =
            message.unwrap_or_else(|| "The server did not provide an error message".to_string());

        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::CONFLICT => AppError::Conflict(message),
            StatusCode::BAD_REQUEST => AppError::BadRequest(message),
            _ => AppError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Mensaje apto para mostrar al usuario: el del servidor cuando llegó,
    /// fallback genérico cuando no hay nada mejor.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthenticationRequired => "Please login to continue".to_string(),
            AppError::Validation(errors) => format!("Invalid input: {}", errors),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg) => msg.clone(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Network(_) => "Network error. Please try again.".to_string(),
            AppError::InvalidResponse(_) => "Unexpected response from server".to_string(),
            AppError::MissingState(msg) => msg.clone(),
            AppError::Storage(_) | AppError::Config(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    /// Rechazo por solapamiento de fechas descubierto recién en el submit
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de estado de navegación faltante
pub fn missing_state_error(what: &str) -> AppError {
    AppError::MissingState(format!("No {} selected", what))
}
