//! Services module
//!
//! Este módulo contiene los servicios REST, uno por recurso remoto.
//! Cada servicio encapsula sus endpoints, la autenticación que requieren
//! y la forma de sus respuestas.

pub mod auth_service;
pub mod booking_service;
pub mod payment_service;
pub mod review_service;
pub mod user_service;
pub mod vehicle_service;

pub use auth_service::AuthService;
pub use booking_service::BookingService;
pub use payment_service::PaymentService;
pub use review_service::ReviewService;
pub use user_service::UserService;
pub use vehicle_service::VehicleService;
