//! Catálogo de vehículos
//!
//! Carga el catálogo completo y después, en paralelo y al mejor esfuerzo,
//! el agregado de rating de cada vehículo. Un rating que no llega se
//! muestra como neutro (0.0, sin reseñas); nunca rompe el catálogo.

use futures::future::join_all;
use std::collections::HashMap;

use crate::models::review::RatingSummary;
use crate::models::vehicle::Vehicle;
use crate::router::{Navigation, Route};
use crate::services::{ReviewService, VehicleService};
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct HomeScreen {
    vehicle_service: VehicleService,
    review_service: ReviewService,
    vehicles: Vec<Vehicle>,
    ratings: HashMap<String, RatingSummary>,
    filter: String,
    loading: bool,
    error: Option<String>,
}

impl HomeScreen {
    pub fn new(vehicle_service: VehicleService, review_service: ReviewService) -> Self {
        Self {
            vehicle_service,
            review_service,
            vehicles: Vec::new(),
            ratings: HashMap::new(),
            filter: String::new(),
            loading: false,
            error: None,
        }
    }

    /// Cargar catálogo y ratings. El catálogo fallido sí es un error de
    /// pantalla; los ratings fallidos solo se registran.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.vehicle_service.list().await {
            Ok(vehicles) => {
                self.vehicles = vehicles;
            }
            Err(error) => {
                log::error!("❌ Failed to load catalog: {}", error);
                self.error = Some(error.user_message());
                self.loading = false;
                return;
            }
        }

        let fetches = self.vehicles.iter().map(|vehicle| {
            let service = self.review_service.clone();
            let vehicle_id = vehicle.id.clone();
            async move {
                let result = service.average_rating(&vehicle_id).await;
                (vehicle_id, result)
            }
        });

        for (vehicle_id, result) in join_all(fetches).await {
            match result {
                Ok(summary) => {
                    self.ratings.insert(vehicle_id, summary);
                }
                Err(error) => {
                    log::warn!("⚠️ Rating fetch failed for {}: {}", vehicle_id, error);
                    self.ratings.insert(vehicle_id, RatingSummary::default());
                }
            }
        }

        self.loading = false;
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
    }

    /// Vehículos visibles con el filtro actual
    pub fn visible(&self) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|vehicle| vehicle.matches_filter(&self.filter))
            .collect()
    }

    /// Rating de catálogo del vehículo (el agregado del servidor)
    pub fn rating_for(&self, vehicle_id: &str) -> RatingSummary {
        self.ratings.get(vehicle_id).cloned().unwrap_or_default()
    }

    /// "Rent Now": entrega el vehículo elegido para llevarlo a /booking.
    /// Solo los disponibles lo ofrecen.
    pub fn rent_now(&self, vehicle_id: &str) -> AppResult<(Navigation, Vehicle)> {
        let vehicle = self
            .vehicles
            .iter()
            .find(|vehicle| vehicle.id == vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        if !vehicle.availability {
            return Err(validation_error(
                "vehicle",
                "This vehicle is not available",
            ));
        }

        Ok((Navigation::Internal(Route::Booking), vehicle.clone()))
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
