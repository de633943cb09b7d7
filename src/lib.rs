//! RentAuto - cliente del marketplace de alquiler de vehículos
//!
//! Cliente headless contra la API HTTP del backend: catálogo, reservas con
//! verificación de disponibilidad, pago vía checkout externo, reseñas y
//! back office de administración. Cada pantalla mantiene su estado y sus
//! reglas de navegación; el renderizado queda fuera de este crate.

pub mod client;
pub mod config;
pub mod dto;
pub mod models;
pub mod router;
pub mod screens;
pub mod services;
pub mod session;
pub mod utils;
