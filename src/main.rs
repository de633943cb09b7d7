use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info};

use vehicle_rental::client::ApiClient;
use vehicle_rental::config::EnvironmentConfig;
use vehicle_rental::router::{Resolution, Router};
use vehicle_rental::screens::booking::BookedDates;
use vehicle_rental::screens::{BookingScreen, HomeScreen};
use vehicle_rental::services::{BookingService, ReviewService, VehicleService};
use vehicle_rental::session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 RentAuto - Cliente del marketplace de alquiler");
    info!("=================================================");

    let config = EnvironmentConfig::default();
    info!("🌐 Backend: {}", config.api_base_url);

    let client = match ApiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error creando el cliente HTTP: {}", e);
            return Err(anyhow::anyhow!("Error de cliente HTTP: {}", e));
        }
    };

    // Restaurar la sesión guardada, si la hay
    let store = SessionStore::from_config(&config);
    match store.load().await {
        Ok(Some(session)) => {
            info!("🔑 Sesión restaurada: {} ({})", session.name, session.role.as_str());
        }
        Ok(None) => info!("👤 Sin sesión guardada, navegando como invitado"),
        Err(e) => error!("❌ Error leyendo la sesión guardada: {}", e),
    }

    // Resolución de rutas de ejemplo
    let router = Router::new(store.clone());
    for path in ["/", "/Dashboard", "/admin"] {
        match router.resolve(path).await {
            Resolution::Render(route) => info!("🧭 {} -> render {:?}", path, route),
            Resolution::Redirect(route) => info!("🧭 {} -> redirect {:?}", path, route),
        }
    }

    // Catálogo con ratings
    let mut home = HomeScreen::new(
        VehicleService::new(client.clone()),
        ReviewService::new(client.clone()),
    );
    home.load().await;

    if let Some(message) = home.error() {
        error!("❌ No se pudo cargar el catálogo: {}", message);
        return Err(anyhow::anyhow!("Catálogo no disponible: {}", message));
    }

    info!("📋 Catálogo: {} vehículos", home.visible().len());
    for vehicle in home.visible() {
        let rating = home.rating_for(&vehicle.id);
        info!(
            "   🚙 {} ({}) - {:.2}/día en {} - ⭐ {:.1} ({} reseñas)",
            vehicle.title(),
            vehicle.year,
            vehicle.price_per_day,
            vehicle.location,
            rating.average_rating,
            rating.total_reviews
        );
    }

    // Disponibilidad del primer vehículo del catálogo
    if let Some(vehicle) = home.vehicles().first().cloned() {
        info!("📅 Fechas ocupadas de {}:", vehicle.title());
        let mut booking = BookingScreen::new(
            BookingService::new(client.clone()),
            ReviewService::new(client),
            store,
            config.booked_dates_fail_open,
            Some(vehicle),
        );
        booking.start();
        booking.await_booked_dates().await;
        match booking.booked() {
            BookedDates::Loaded(set) => info!("   {} días reservados", set.len()),
            BookedDates::Unavailable => {
                info!("   Sin datos de disponibilidad (fail-open: {})", config.booked_dates_fail_open)
            }
            BookedDates::Loading => {}
        }
    }

    info!("👋 Demo terminada");
    Ok(())
}
