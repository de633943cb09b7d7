//! Dashboard del usuario
//!
//! Dos cargas independientes: los pagos completados del usuario (requiere
//! sesión; un fallo se registra y deja la lista vacía) y la grilla de
//! vehículos (pública; un fallo sí muestra error).

use crate::models::payment::{PaymentRecord, PaymentStatus};
use crate::models::vehicle::Vehicle;
use crate::services::{UserService, VehicleService};
use crate::session::SessionStore;

pub struct DashboardScreen {
    user_service: UserService,
    vehicle_service: VehicleService,
    store: SessionStore,
    payments: Vec<PaymentRecord>,
    vehicles: Vec<Vehicle>,
    vehicles_error: Option<String>,
    loading: bool,
}

impl DashboardScreen {
    pub fn new(
        user_service: UserService,
        vehicle_service: VehicleService,
        store: SessionStore,
    ) -> Self {
        Self {
            user_service,
            vehicle_service,
            store,
            payments: Vec::new(),
            vehicles: Vec::new(),
            vehicles_error: None,
            loading: false,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.load_vehicles().await;
        self.load_payments().await;
        self.loading = false;
    }

    async fn load_vehicles(&mut self) {
        self.vehicles_error = None;
        match self.vehicle_service.list().await {
            Ok(vehicles) => {
                self.vehicles = vehicles;
            }
            Err(error) => {
                log::error!("❌ Dashboard vehicle grid failed: {}", error);
                self.vehicles_error = Some(error.user_message());
            }
        }
    }

    async fn load_payments(&mut self) {
        let Some(session) = self.store.current().await else {
            self.payments.clear();
            return;
        };

        match self.user_service.activity(&session, Some(&session.id)).await {
            Ok(rows) => {
                self.payments = rows
                    .into_iter()
                    .flat_map(|row| row.payments)
                    .filter(|payment| payment.status == PaymentStatus::Paid)
                    .collect();
            }
            Err(error) => {
                // La lista de pagos es secundaria: se registra y queda vacía
                log::warn!("⚠️ Completed payments fetch failed: {}", error);
                self.payments.clear();
            }
        }
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicles_error(&self) -> Option<&str> {
        self.vehicles_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
