//! Consola de administración
//!
//! Tres paneles con carga y error independientes: CRUD de vehículos,
//! perfiles de usuario en solo lectura y pagos completados. La edición de
//! vehículo reenvía el formulario completo (el backend no acepta parches)
//! y el borrado exige confirmación explícita antes de tocar la red.

use crate::dto::vehicle_dto::VehiclePayload;
use crate::models::payment::{PaymentRecord, PaymentStatus};
use crate::models::user::UserProfile;
use crate::models::vehicle::{FuelType, Transmission, Vehicle};
use crate::services::{UserService, VehicleService};
use crate::session::SessionStore;
use crate::utils::errors::{validation_error, AppResult};

/// Estado de un panel con su propia carga y error
#[derive(Debug, Clone, Default)]
pub struct PanelState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

/// Fila del panel de pagos: pago completado con el nombre del usuario
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub user_name: String,
    pub payment: PaymentRecord,
}

/// Formulario de vehículo. Sirve para alta y edición; en edición se
/// rellena entero desde el vehículo y se reenvía entero.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleForm {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_per_day: f64,
    pub location: String,
    pub description: Option<String>,
    pub seats: u8,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub availability: bool,
    pub image_url: Option<String>,
}

impl Default for VehicleForm {
    fn default() -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: 2024,
            price_per_day: 0.0,
            location: String::new(),
            description: None,
            seats: 5,
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Manual,
            availability: true,
            image_url: None,
        }
    }
}

impl VehicleForm {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            price_per_day: vehicle.price_per_day,
            location: vehicle.location.clone(),
            description: vehicle.description.clone(),
            seats: vehicle.seats,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            availability: vehicle.availability,
            image_url: vehicle.image_url.clone(),
        }
    }

    /// Payload completo, campo por campo, también los que no cambiaron
    pub fn to_payload(&self) -> VehiclePayload {
        VehiclePayload {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            price_per_day: self.price_per_day,
            location: self.location.trim().to_string(),
            description: self.description.clone(),
            seats: self.seats,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            availability: self.availability,
            image_url: self.image_url.clone(),
        }
    }
}

pub struct AdminScreen {
    vehicle_service: VehicleService,
    user_service: UserService,
    store: SessionStore,
    vehicles: PanelState<Vec<Vehicle>>,
    profiles: PanelState<Vec<UserProfile>>,
    payments: PanelState<Vec<PaymentRow>>,
    pub form: VehicleForm,
    editing_id: Option<String>,
    pending_delete: Option<String>,
}

impl AdminScreen {
    pub fn new(
        vehicle_service: VehicleService,
        user_service: UserService,
        store: SessionStore,
    ) -> Self {
        Self {
            vehicle_service,
            user_service,
            store,
            vehicles: PanelState::default(),
            profiles: PanelState::default(),
            payments: PanelState::default(),
            form: VehicleForm::default(),
            editing_id: None,
            pending_delete: None,
        }
    }

    /// Cargar el panel de vehículos
    pub async fn load_vehicles(&mut self) {
        self.vehicles.loading = true;
        self.vehicles.error = None;
        match self.vehicle_service.list().await {
            Ok(vehicles) => self.vehicles.data = vehicles,
            Err(error) => {
                log::error!("❌ Admin vehicle panel failed: {}", error);
                self.vehicles.error = Some(error.user_message());
            }
        }
        self.vehicles.loading = false;
    }

    /// Cargar el panel de perfiles (solo lectura)
    pub async fn load_profiles(&mut self) {
        let Ok(session) = self.store.require().await else {
            self.profiles.error = Some("Please login to continue".to_string());
            return;
        };

        self.profiles.loading = true;
        self.profiles.error = None;
        match self.user_service.all_profiles(&session).await {
            Ok(profiles) => self.profiles.data = profiles,
            Err(error) => {
                log::error!("❌ Admin profile panel failed: {}", error);
                self.profiles.error = Some(error.user_message());
            }
        }
        self.profiles.loading = false;
    }

    /// Cargar el panel de pagos completados de todos los usuarios
    pub async fn load_payments(&mut self) {
        let Ok(session) = self.store.require().await else {
            self.payments.error = Some("Please login to continue".to_string());
            return;
        };

        self.payments.loading = true;
        self.payments.error = None;
        match self.user_service.activity(&session, None).await {
            Ok(rows) => {
                self.payments.data = rows
                    .into_iter()
                    .flat_map(|row| {
                        let user_name = row.name;
                        row.payments
                            .into_iter()
                            .filter(|payment| payment.status == PaymentStatus::Paid)
                            .map(move |payment| PaymentRow {
                                user_name: user_name.clone(),
                                payment,
                            })
                            .collect::<Vec<_>>()
                    })
                    .collect();
            }
            Err(error) => {
                log::error!("❌ Admin payment panel failed: {}", error);
                self.payments.error = Some(error.user_message());
            }
        }
        self.payments.loading = false;
    }

    /// Entrar en edición sembrando el formulario completo desde la fila
    pub fn start_edit(&mut self, vehicle_id: &str) -> Result<(), String> {
        let Some(vehicle) = self
            .vehicles
            .data
            .iter()
            .find(|vehicle| vehicle.id == vehicle_id)
        else {
            return Err("Vehicle not found".to_string());
        };
        self.form = VehicleForm::from_vehicle(vehicle);
        self.editing_id = Some(vehicle_id.to_string());
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.form = VehicleForm::default();
        self.editing_id = None;
    }

    /// Crear o actualizar según el modo del formulario. En éxito el
    /// formulario se resetea y la lista local se parchea sin recargar.
    pub async fn submit_form(&mut self) -> AppResult<()> {
        let session = self.store.require().await?;
        let payload = self.form.to_payload();

        match self.editing_id.clone() {
            None => {
                let created = self.vehicle_service.create(&session, &payload).await?;
                log::info!("✅ Vehicle {} created", created.id);
                self.vehicles.data.push(created);
            }
            Some(vehicle_id) => {
                let updated = self
                    .vehicle_service
                    .update(&session, &vehicle_id, &payload)
                    .await?;
                log::info!("✅ Vehicle {} updated", updated.id);
                if let Some(slot) = self
                    .vehicles
                    .data
                    .iter_mut()
                    .find(|vehicle| vehicle.id == vehicle_id)
                {
                    *slot = updated;
                }
                self.editing_id = None;
            }
        }

        self.form = VehicleForm::default();
        Ok(())
    }

    /// Marcar un vehículo para borrado. Sin confirmación no hay request.
    pub fn request_delete(&mut self, vehicle_id: &str) {
        self.pending_delete = Some(vehicle_id.to_string());
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Ejecutar el borrado confirmado
    pub async fn confirm_delete(&mut self) -> AppResult<()> {
        let Some(vehicle_id) = self.pending_delete.take() else {
            return Err(validation_error("delete", "Nothing pending confirmation"));
        };
        let session = self.store.require().await?;

        self.vehicle_service.delete(&session, &vehicle_id).await?;
        self.vehicles.data.retain(|vehicle| vehicle.id != vehicle_id);
        log::info!("🗑️ Vehicle {} deleted", vehicle_id);
        Ok(())
    }

    pub fn vehicles(&self) -> &PanelState<Vec<Vehicle>> {
        &self.vehicles
    }

    pub fn profiles(&self) -> &PanelState<Vec<UserProfile>> {
        &self.profiles
    }

    pub fn payments(&self) -> &PanelState<Vec<PaymentRow>> {
        &self.payments
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }
}
