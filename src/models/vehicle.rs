//! Modelo de vehículo
//!
//! Este módulo contiene el struct Vehicle tal como lo publica el catálogo.
//! Mapea el documento del backend: `_id` como clave y campos en camelCase.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Tipo de combustible ofrecido por el formulario de administración
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Petrol => "petrol",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
        }
    }
}

impl FromStr for FuelType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "petrol" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            "electric" => Ok(FuelType::Electric),
            other => Err(format!("unknown fuel type: {}", other)),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FuelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FuelType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Tipo de transmisión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Manual => "manual",
            Transmission::Automatic => "automatic",
        }
    }
}

impl FromStr for Transmission {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "manual" => Ok(Transmission::Manual),
            "automatic" => Ok(Transmission::Automatic),
            other => Err(format!("unknown transmission: {}", other)),
        }
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Transmission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Transmission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Vehículo del catálogo
///
/// El backend guarda la imagen bajo `images` aunque es un único URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    pub seats: u8,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(rename = "images", default)]
    pub image_url: Option<String>,
}

fn default_availability() -> bool {
    true
}

impl Vehicle {
    /// Nombre mostrado en catálogo y resúmenes ("Make Model")
    pub fn title(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    /// ¿Coincide con el filtro de búsqueda del catálogo?
    /// Subcadena sobre make, model y location, sin distinguir mayúsculas.
    pub fn matches_filter(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.make.to_lowercase().contains(&needle)
            || self.model.to_lowercase().contains(&needle)
            || self.location.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "_id": "veh-1",
            "make": "Toyota",
            "model": "Corolla",
            "year": 2022,
            "pricePerDay": 55.0,
            "location": "Madrid",
            "description": "Compact sedan",
            "seats": 5,
            "fuelType": "Petrol",
            "transmission": "AUTOMATIC",
            "availability": true,
            "images": "https://cdn.example.com/corolla.jpg"
        }"#
    }

    #[test]
    fn test_vehicle_parses_wire_shape() {
        let vehicle: Vehicle = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(vehicle.id, "veh-1");
        assert_eq!(vehicle.price_per_day, 55.0);
        assert_eq!(vehicle.fuel_type, FuelType::Petrol);
        assert_eq!(vehicle.transmission, Transmission::Automatic);
        assert_eq!(
            vehicle.image_url.as_deref(),
            Some("https://cdn.example.com/corolla.jpg")
        );
        assert_eq!(vehicle.title(), "Toyota Corolla");
    }

    #[test]
    fn test_vehicle_defaults_availability_when_absent() {
        let raw = r#"{
            "_id": "veh-2",
            "make": "Kia",
            "model": "Rio",
            "year": 2021,
            "pricePerDay": 40.0,
            "location": "Valencia",
            "seats": 5,
            "fuelType": "diesel",
            "transmission": "manual"
        }"#;
        let vehicle: Vehicle = serde_json::from_str(raw).unwrap();
        assert!(vehicle.availability);
        assert!(vehicle.image_url.is_none());
    }

    #[test]
    fn test_matches_filter_is_case_insensitive_substring() {
        let vehicle: Vehicle = serde_json::from_str(sample_json()).unwrap();
        assert!(vehicle.matches_filter("toy"));
        assert!(vehicle.matches_filter("COROLLA"));
        assert!(vehicle.matches_filter("madrid"));
        assert!(vehicle.matches_filter("  "));
        assert!(!vehicle.matches_filter("tesla"));
    }
}
