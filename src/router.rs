//! Shell de navegación
//!
//! Este módulo traduce paths a pantallas y aplica la única regla de acceso
//! del router: `/admin` solo resuelve para una sesión de administrador.
//! El resto de pantallas se protegen solas redirigiendo a `/login`.

use crate::models::user::Session;
use crate::session::SessionStore;

/// Pantallas navegables, con sus paths literales
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    Register,
    Login,
    Booking,
    Payment,
    /// Retorno del checkout; conserva la query cruda con los identificadores
    PaymentSuccess { query: String },
    PaymentFailed,
    MyBookings,
    Profile,
    Admin,
    NotFound(String),
}

impl Route {
    /// Parsear un target de navegación. La query solo importa en el
    /// retorno de pago; en el resto se descarta.
    pub fn parse(target: &str) -> Route {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };

        match path {
            "/" => Route::Home,
            "/Dashboard" => Route::Dashboard,
            "/register" => Route::Register,
            "/login" => Route::Login,
            "/booking" => Route::Booking,
            "/payment" => Route::Payment,
            "/payment-success" => Route::PaymentSuccess {
                query: query.to_string(),
            },
            "/payment-failed" => Route::PaymentFailed,
            "/orders&bookings" => Route::MyBookings,
            "/userProfile" => Route::Profile,
            "/admin" => Route::Admin,
            other => Route::NotFound(other.to_string()),
        }
    }

    /// Path canónico de la pantalla (sin query)
    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/Dashboard",
            Route::Register => "/register",
            Route::Login => "/login",
            Route::Booking => "/booking",
            Route::Payment => "/payment",
            Route::PaymentSuccess { .. } => "/payment-success",
            Route::PaymentFailed => "/payment-failed",
            Route::MyBookings => "/orders&bookings",
            Route::Profile => "/userProfile",
            Route::Admin => "/admin",
            Route::NotFound(path) => path,
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin)
    }
}

/// Destino de una navegación disparada por una pantalla
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Cambio de pantalla dentro de la aplicación
    Internal(Route),
    /// Salida completa al checkout externo
    External(String),
}

/// Resultado de resolver un target contra la sesión activa
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

/// Regla de acceso del router, separada del estado para poder testearla
pub fn resolve_with_session(route: Route, session: Option<&Session>) -> Resolution {
    if route.requires_admin() {
        let is_admin = session.map(|session| session.is_admin()).unwrap_or(false);
        if !is_admin {
            log::warn!("🚫 Non-admin navigation to /admin, redirecting to /");
            return Resolution::Redirect(Route::Home);
        }
    }
    Resolution::Render(route)
}

/// Router de la aplicación
pub struct Router {
    store: SessionStore,
}

impl Router {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Resolver un target de navegación contra la sesión activa
    pub async fn resolve(&self, target: &str) -> Resolution {
        let route = Route::parse(target);
        let session = self.store.current().await;
        resolve_with_session(route, session.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn session(role: Role) -> Session {
        Session {
            id: "u-1".to_string(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            role,
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_route_parse_and_path_round_trip() {
        let paths = [
            "/",
            "/Dashboard",
            "/register",
            "/login",
            "/booking",
            "/payment",
            "/payment-success",
            "/payment-failed",
            "/orders&bookings",
            "/userProfile",
            "/admin",
        ];
        for path in paths {
            assert_eq!(Route::parse(path).path(), path);
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let route = Route::parse("/no-such-page");
        assert_eq!(route, Route::NotFound("/no-such-page".to_string()));
        assert_eq!(route.path(), "/no-such-page");
    }

    #[test]
    fn test_payment_success_keeps_query() {
        let route = Route::parse("/payment-success?session_id=cs_1&bookingId=bk-1&userId=u-1");
        match route {
            Route::PaymentSuccess { query } => {
                assert_eq!(query, "session_id=cs_1&bookingId=bk-1&userId=u-1");
            }
            other => panic!("expected PaymentSuccess, got {:?}", other),
        }
    }

    #[test]
    fn test_admin_route_requires_admin_session() {
        assert_eq!(
            resolve_with_session(Route::Admin, None),
            Resolution::Redirect(Route::Home)
        );
        assert_eq!(
            resolve_with_session(Route::Admin, Some(&session(Role::User))),
            Resolution::Redirect(Route::Home)
        );
        assert_eq!(
            resolve_with_session(Route::Admin, Some(&session(Role::Admin))),
            Resolution::Render(Route::Admin)
        );
    }

    #[test]
    fn test_public_routes_resolve_without_session() {
        assert_eq!(
            resolve_with_session(Route::Home, None),
            Resolution::Render(Route::Home)
        );
        assert_eq!(
            resolve_with_session(Route::Booking, None),
            Resolution::Render(Route::Booking)
        );
    }
}
