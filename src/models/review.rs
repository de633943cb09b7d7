//! Modelo de reseñas
//!
//! Reseñas por vehículo y el agregado de rating que publica el backend.
//! Cada vista usa una única fuente de rating: el catálogo consume el
//! agregado del servidor, el panel de reseñas promedia lo que tiene cargado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Autor de una reseña. El backend puebla el campo `user` con el documento
/// del autor, pero listados antiguos lo dejaban como id plano.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReviewAuthor {
    Populated {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        name: String,
    },
    Id(String),
}

impl ReviewAuthor {
    /// Nombre a mostrar; los ids planos no traen nombre
    pub fn display_name(&self) -> &str {
        match self {
            ReviewAuthor::Populated { name, .. } => name.as_str(),
            ReviewAuthor::Id(_) => "Anonymous",
        }
    }
}

/// Reseña de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "vehicle")]
    pub vehicle_id: String,
    #[serde(rename = "user", default)]
    pub author: Option<ReviewAuthor>,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Agregado de rating que devuelve el backend para el catálogo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub total_reviews: u32,
}

impl Default for RatingSummary {
    /// Neutro para vehículos sin reseñas o con fetch fallido
    fn default() -> Self {
        Self {
            average_rating: 0.0,
            total_reviews: 0,
        }
    }
}

/// Promedio local sobre las reseñas cargadas, redondeado a 1 decimal.
/// Es la fuente de rating del panel de reseñas (no el agregado del servidor).
pub fn average_of(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();
    let average = sum as f64 / reviews.len() as f64;
    (average * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: format!("rev-{}", rating),
            vehicle_id: "veh-1".to_string(),
            author: None,
            rating,
            comment: "ok".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_review_parses_populated_author() {
        let raw = r#"{
            "_id": "rev-1",
            "vehicle": "veh-1",
            "user": {"_id": "u-2", "name": "Marta"},
            "rating": 4,
            "comment": "Smooth ride",
            "createdAt": "2024-06-12T09:00:00Z"
        }"#;
        let parsed: Review = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.rating, 4);
        assert_eq!(
            parsed.author.as_ref().map(|author| author.display_name()),
            Some("Marta")
        );
    }

    #[test]
    fn test_review_parses_plain_author_id() {
        let raw = r#"{
            "_id": "rev-2",
            "vehicle": "veh-1",
            "user": "u-9",
            "rating": 5,
            "comment": "Great"
        }"#;
        let parsed: Review = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.author.as_ref().map(|author| author.display_name()),
            Some("Anonymous")
        );
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let reviews = vec![review(5), review(4), review(4)];
        assert_eq!(average_of(&reviews), 4.3);
    }

    #[test]
    fn test_average_of_empty_is_neutral_zero() {
        assert_eq!(average_of(&[]), 0.0);
    }

    #[test]
    fn test_rating_summary_default_is_neutral() {
        let summary = RatingSummary::default();
        assert_eq!(summary.average_rating, 0.0);
        assert_eq!(summary.total_reviews, 0);
    }
}
