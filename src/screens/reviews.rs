//! Panel de reseñas
//!
//! Reutilizado por la pantalla de reserva (inline) y por "mis reservas"
//! (modal). El rating que muestra es el promedio local de las reseñas
//! cargadas, redondeado a 1 decimal; el agregado del servidor es cosa
//! del catálogo.

use crate::dto::review_dto::CreateReviewRequest;
use crate::models::review::{average_of, Review};
use crate::services::ReviewService;
use crate::session::SessionStore;
use crate::utils::validation::validate_rating;

/// Formulario de nueva reseña
#[derive(Debug, Clone, Default)]
pub struct ReviewForm {
    pub rating: Option<u8>,
    pub comment: String,
}

/// Resultado de enviar una reseña
#[derive(Debug, PartialEq, Eq)]
pub enum ReviewSubmitOutcome {
    /// Sin sesión: a /login, sin tocar la red
    RedirectToLogin,
    /// Error de validación o del servidor, mostrado en el panel
    Stay,
    /// Reseña aceptada y añadida a la lista
    Submitted,
}

pub struct ReviewPanel {
    service: ReviewService,
    store: SessionStore,
    vehicle_id: Option<String>,
    reviews: Vec<Review>,
    loading: bool,
    error: Option<String>,
    form: ReviewForm,
}

impl ReviewPanel {
    pub fn new(service: ReviewService, store: SessionStore, vehicle_id: Option<String>) -> Self {
        Self {
            service,
            store,
            vehicle_id,
            reviews: Vec::new(),
            loading: false,
            error: None,
            form: ReviewForm::default(),
        }
    }

    /// Cambiar de vehículo (el modal de "mis reservas" reutiliza el panel)
    pub fn set_vehicle(&mut self, vehicle_id: String) {
        self.vehicle_id = Some(vehicle_id);
        self.reviews.clear();
        self.error = None;
        self.form = ReviewForm::default();
    }

    /// Cargar las reseñas del vehículo (sin auth)
    pub async fn load(&mut self) {
        let Some(vehicle_id) = self.vehicle_id.clone() else {
            return;
        };
        self.loading = true;
        self.error = None;

        match self.service.list_for_vehicle(&vehicle_id).await {
            Ok(reviews) => {
                self.reviews = reviews;
            }
            Err(error) => {
                log::error!("❌ Failed to load reviews for {}: {}", vehicle_id, error);
                self.error = Some(error.user_message());
            }
        }
        self.loading = false;
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.form.rating = Some(rating);
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.form.comment = comment.to_string();
    }

    /// Enviar la reseña. Sin sesión no se toca la red.
    pub async fn submit(&mut self) -> ReviewSubmitOutcome {
        let Some(vehicle_id) = self.vehicle_id.clone() else {
            self.error = Some("No vehicle selected".to_string());
            return ReviewSubmitOutcome::Stay;
        };

        let Some(session) = self.store.current().await else {
            return ReviewSubmitOutcome::RedirectToLogin;
        };

        let Some(rating) = self.form.rating else {
            self.error = Some("Please select a rating".to_string());
            return ReviewSubmitOutcome::Stay;
        };
        if validate_rating(rating).is_err() {
            self.error = Some("Rating must be between 1 and 5".to_string());
            return ReviewSubmitOutcome::Stay;
        }
        if self.form.comment.trim().is_empty() {
            self.error = Some("Please write a comment".to_string());
            return ReviewSubmitOutcome::Stay;
        }

        let request = CreateReviewRequest {
            rating,
            comment: self.form.comment.trim().to_string(),
        };

        match self.service.create(&session, &vehicle_id, &request).await {
            Ok(review) => {
                // La respuesta trae la reseña persistida; se añade tal cual
                self.reviews.push(review);
                self.form = ReviewForm::default();
                self.error = None;
                ReviewSubmitOutcome::Submitted
            }
            Err(error) => {
                log::error!("❌ Review submission failed: {}", error);
                self.error = Some(error.user_message());
                ReviewSubmitOutcome::Stay
            }
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Promedio local con 1 decimal (la única fuente de rating de esta vista)
    pub fn average(&self) -> f64 {
        average_of(&self.reviews)
    }

    pub fn count(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> &ReviewForm {
        &self.form
    }
}
