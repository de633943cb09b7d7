//! Cliente HTTP del backend de alquiler
//!
//! Este módulo contiene el wrapper de reqwest compartido por todos los
//! servicios: una base URL configurada, bearer token opcional por request
//! y decodificación centralizada de respuestas y errores.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

/// Forma mínima del body de error que devuelve el backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Cliente HTTP compartido
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Crear nuevo cliente con base URL y timeout configurables
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Crear cliente desde la configuración del entorno
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// GET con decodificación tipada
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> AppResult<T> {
        let response = self.request(Method::GET, path, token).send().await?;
        Self::decode(response).await
    }

    /// POST con body JSON y decodificación tipada
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> AppResult<T> {
        let response = self
            .request(Method::POST, path, token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// POST que solo acepta 201 Created como éxito.
    /// Cualquier otro status, incluidos otros 2xx, se trata como rechazo
    /// y conserva el mensaje del servidor.
    pub async fn post_json_created<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> AppResult<T> {
        let response = self
            .request(Method::POST, path, token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let message = Self::error_message(response).await;
            return Err(AppError::from_status(status, message));
        }
        Self::parse_body(response).await
    }

    /// PUT con body JSON y decodificación tipada
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> AppResult<T> {
        let response = self
            .request(Method::PUT, path, token)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// DELETE con decodificación tipada
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> AppResult<T> {
        let response = self.request(Method::DELETE, path, token).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(AppError::from_status(status, message));
        }
        Self::parse_body(response).await
    }

    /// Extraer el campo `message` del body de error, si llegó como JSON
    async fn error_message(response: Response) -> Option<String> {
        let body = response.text().await.ok()?;
        serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
    }

    async fn parse_body<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|error| AppError::InvalidResponse(format!("{} (body: {})", error, body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_duplicate_slashes() {
        let client = ApiClient::new("http://localhost:5000/api/", 30).unwrap();
        assert_eq!(
            client.url("/vehicle/getAllVehicles"),
            "http://localhost:5000/api/vehicle/getAllVehicles"
        );
        assert_eq!(
            client.url("auth/login"),
            "http://localhost:5000/api/auth/login"
        );
    }
}
