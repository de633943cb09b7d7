//! Servicio de reseñas
//!
//! Listado y creación de reseñas por vehículo, más el agregado de rating
//! que consume el catálogo.

use validator::Validate;

use crate::client::ApiClient;
use crate::dto::review_dto::CreateReviewRequest;
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::review::{RatingSummary, Review};
use crate::models::user::Session;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct ReviewService {
    client: ApiClient,
}

impl ReviewService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Reseñas de un vehículo (sin auth)
    pub async fn list_for_vehicle(&self, vehicle_id: &str) -> AppResult<Vec<Review>> {
        log::info!("⭐ Fetching reviews for vehicle {}", vehicle_id);

        let path = format!(
            "/review/getAllReviewById/{}",
            urlencoding::encode(vehicle_id)
        );
        let response: ApiResponse<Vec<Review>> = self.client.get_json(&path, None).await?;

        Ok(response.data.unwrap_or_default())
    }

    /// Crear una reseña; el backend identifica al autor por el token
    pub async fn create(
        &self,
        session: &Session,
        vehicle_id: &str,
        request: &CreateReviewRequest,
    ) -> AppResult<Review> {
        request.validate()?;
        log::info!(
            "📝 Creating review for vehicle {} ({} stars)",
            vehicle_id,
            request.rating
        );

        let path = format!(
            "/review/createReview/{}",
            urlencoding::encode(vehicle_id)
        );
        let response: ApiResponse<Review> = self
            .client
            .post_json(&path, request, Some(&session.token))
            .await?;

        response.data.ok_or_else(|| {
            AppError::InvalidResponse("create review response had no data".to_string())
        })
    }

    /// Agregado de rating del servidor (fuente del catálogo, no del panel)
    pub async fn average_rating(&self, vehicle_id: &str) -> AppResult<RatingSummary> {
        let path = format!(
            "/review/{}/average-rating",
            urlencoding::encode(vehicle_id)
        );
        self.client.get_json(&path, None).await
    }
}
