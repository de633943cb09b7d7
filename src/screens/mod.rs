//! Pantallas de la aplicación
//!
//! Cada pantalla es el estado de una ruta: carga sus datos, valida la
//! entrada del usuario y decide la navegación. Ninguna pinta nada; el
//! frontend que las monte consulta sus accessors.

pub mod admin;
pub mod booking;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod my_bookings;
pub mod payment;
pub mod payment_result;
pub mod profile;
pub mod register;
pub mod reviews;

pub use admin::AdminScreen;
pub use booking::{BookingScreen, BookingStage, SubmitOutcome};
pub use dashboard::DashboardScreen;
pub use home::HomeScreen;
pub use login::{LoginOutcome, LoginScreen};
pub use my_bookings::MyBookingsScreen;
pub use payment::{PaymentContext, PaymentOutcome, PaymentScreen};
pub use payment_result::{PaymentResultScreen, PaymentResultView, PaymentReturnQuery};
pub use profile::ProfileScreen;
pub use register::{RegisterOutcome, RegisterScreen};
pub use reviews::{ReviewPanel, ReviewSubmitOutcome};
