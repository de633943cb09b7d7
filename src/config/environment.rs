//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub session_file: String,
    /// Si el cálculo de fechas reservadas falla, `true` deja reservar igualmente
    /// y delega el conflicto al backend; `false` bloquea el submit.
    pub booked_dates_fail_open: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: env::var("RENTAL_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
            request_timeout_secs: env::var("RENTAL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(30),
            session_file: env::var("RENTAL_SESSION_FILE")
                .unwrap_or_else(|_| "rentauto_session.json".to_string()),
            booked_dates_fail_open: env::var("RENTAL_BOOKED_DATES_FAIL_OPEN")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(true),
        }
    }
}

