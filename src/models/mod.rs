//! Modelos del dominio
//!
//! Este módulo contiene los tipos de datos que mapean los documentos del
//! backend, parseados y validados en la frontera de red.

pub mod booking;
pub mod payment;
pub mod review;
pub mod user;
pub mod vehicle;
