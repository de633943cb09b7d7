//! DTOs de la interfaz remota
//!
//! Formas de request y response por recurso, separadas de los modelos
//! del dominio.

pub mod auth_dto;
pub mod booking_dto;
pub mod payment_dto;
pub mod review_dto;
pub mod user_dto;
pub mod vehicle_dto;
