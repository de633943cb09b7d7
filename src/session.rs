//! Titular de sesión compartido
//!
//! Este módulo guarda la identidad autenticada detrás de un RwLock: un
//! escritor (login/logout), muchos lectores. La sesión se persiste como
//! JSON en disco y se restaura al arrancar, así que sobrevive reinicios.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::EnvironmentConfig;
use crate::models::user::Session;
use crate::utils::errors::{AppError, AppResult};

/// Titular de la sesión activa con persistencia en disco
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Option<Session>>>,
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
            file_path: file_path.into(),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(config.session_file.clone())
    }

    /// Restaurar la sesión persistida, si existe. Un archivo corrupto o
    /// ilegible se ignora con un warning: nunca impide arrancar.
    pub async fn load(&self) -> AppResult<Option<Session>> {
        let mut guard = self.session.write().await;

        match tokio::fs::read_to_string(&self.file_path).await {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    log::info!("🔓 Session restored for {}", session.email);
                    *guard = Some(session.clone());
                    Ok(Some(session))
                }
                Err(error) => {
                    log::warn!("⚠️ Stored session is not parseable, ignoring: {}", error);
                    *guard = None;
                    Ok(None)
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                *guard = None;
                Ok(None)
            }
            Err(error) => Err(AppError::Storage(format!(
                "failed to read session file: {}",
                error
            ))),
        }
    }

    /// Único punto de mutación al iniciar sesión: persiste primero y recién
    /// entonces publica en memoria, así disco y memoria nunca divergen.
    pub async fn login(&self, session: Session) -> AppResult<()> {
        let mut guard = self.session.write().await;

        let raw = serde_json::to_string_pretty(&session)
            .map_err(|error| AppError::Storage(format!("failed to encode session: {}", error)))?;
        tokio::fs::write(&self.file_path, raw)
            .await
            .map_err(|error| AppError::Storage(format!("failed to write session file: {}", error)))?;

        log::info!("💾 Session stored for {} ({})", session.email, session.role);
        *guard = Some(session);
        Ok(())
    }

    /// Cerrar sesión: limpia memoria y borra el archivo. Un fallo al borrar
    /// se registra pero no bloquea el logout.
    pub async fn logout(&self) {
        let mut guard = self.session.write().await;
        *guard = None;

        match tokio::fs::remove_file(&self.file_path).await {
            Ok(()) => log::info!("👋 Session file removed"),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => log::warn!("⚠️ Could not remove session file: {}", error),
        }
    }

    /// Sesión activa, si la hay
    pub async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Sesión activa o error de autenticación requerida
    pub async fn require(&self) -> AppResult<Session> {
        self.current()
            .await
            .ok_or(AppError::AuthenticationRequired)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    pub async fn is_admin(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.is_admin())
            .unwrap_or(false)
    }
}
