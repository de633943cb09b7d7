//! Pantalla de reserva
//!
//! El núcleo de la aplicación: cuatro pickers independientes, fechas
//! ocupadas con exclusión visual, y el submit con sus puertas en orden
//! (sesión, completitud, disponibilidad, orden temporal) antes de tocar
//! la red. Solo un 201 del backend confirma la reserva.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tokio::task::{AbortHandle, JoinHandle};

use crate::models::booking::{BookedDateSet, BookingDraft, ConfirmedBooking, VehicleSnapshot};
use crate::models::vehicle::Vehicle;
use crate::screens::payment::PaymentContext;
use crate::screens::reviews::ReviewPanel;
use crate::services::{BookingService, ReviewService};
use crate::session::SessionStore;
use crate::utils::errors::{missing_state_error, AppResult};
use crate::dto::booking_dto::CreateBookingRequest;

/// Etapas de la pantalla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    /// Se llegó sin vehículo en el estado de navegación: render terminal,
    /// nunca un pánico
    NoVehicleSelected,
    SelectingDates,
    Submitting,
    Confirmed,
}

/// Estado del set de fechas ocupadas
#[derive(Debug, Clone, PartialEq)]
pub enum BookedDates {
    Loading,
    Loaded(BookedDateSet),
    /// El fetch falló. Con fail-open se puede reservar igual y el backend
    /// resuelve el conflicto; con fail-closed el submit queda bloqueado
    /// hasta un refetch exitoso.
    Unavailable,
}

/// Resultado del submit
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Sin sesión: a /login sin tocar la red
    RedirectToLogin,
    /// Sigue en selección, con el error en pantalla y el borrador intacto
    Stay,
    /// El backend devolvió 201: reserva confirmada
    Confirmed,
}

/// Resumen mostrado tras la confirmación
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub vehicle: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_days: i64,
    pub total_price: f64,
}

type BookedDatesFetch = JoinHandle<(String, AppResult<BookedDateSet>)>;

pub struct BookingScreen {
    booking_service: BookingService,
    store: SessionStore,
    fail_open: bool,
    vehicle: Option<Vehicle>,
    stage: BookingStage,
    draft: BookingDraft,
    booked: BookedDates,
    error: Option<String>,
    confirmed: Option<ConfirmedBooking>,
    fetch: Option<BookedDatesFetch>,
    fetch_abort: Option<AbortHandle>,
    /// Panel de reseñas embebido bajo el formulario
    pub reviews: ReviewPanel,
}

impl BookingScreen {
    pub fn new(
        booking_service: BookingService,
        review_service: ReviewService,
        store: SessionStore,
        fail_open: bool,
        vehicle: Option<Vehicle>,
    ) -> Self {
        let stage = if vehicle.is_some() {
            BookingStage::SelectingDates
        } else {
            log::warn!("⚠️ Booking screen reached without a vehicle");
            BookingStage::NoVehicleSelected
        };
        let vehicle_id = vehicle.as_ref().map(|vehicle| vehicle.id.clone());
        let reviews = ReviewPanel::new(review_service, store.clone(), vehicle_id);

        Self {
            booking_service,
            store,
            fail_open,
            vehicle,
            stage,
            draft: BookingDraft::default(),
            booked: BookedDates::Loading,
            error: None,
            confirmed: None,
            fetch: None,
            fetch_abort: None,
            reviews,
        }
    }

    /// Lanzar el fetch de fechas ocupadas en background. El handle queda
    /// guardado para poder abortarlo al desmontar la pantalla.
    pub fn start(&mut self) {
        let Some(vehicle) = &self.vehicle else {
            return;
        };
        let vehicle_id = vehicle.id.clone();

        self.abort_fetch();
        self.booked = BookedDates::Loading;

        let service = self.booking_service.clone();
        let handle = tokio::spawn(async move {
            let result = service.booked_dates(&vehicle_id).await;
            (vehicle_id, result)
        });
        self.fetch_abort = Some(handle.abort_handle());
        self.fetch = Some(handle);
    }

    /// Esperar el fetch en curso y aplicar su resultado
    pub async fn await_booked_dates(&mut self) {
        let Some(handle) = self.fetch.take() else {
            return;
        };
        self.fetch_abort = None;

        match handle.await {
            Ok((vehicle_id, result)) => self.apply_booked_dates(&vehicle_id, result),
            Err(error) if error.is_cancelled() => {}
            Err(error) => {
                log::error!("❌ Booked dates task failed: {}", error);
                self.apply_fetch_failure();
            }
        }
    }

    /// Aplicar una respuesta de fechas ocupadas. Una respuesta de otro
    /// vehículo (la pantalla cambió mientras viajaba) se descarta entera.
    pub fn apply_booked_dates(&mut self, vehicle_id: &str, result: AppResult<BookedDateSet>) {
        let current_id = self.vehicle.as_ref().map(|vehicle| vehicle.id.as_str());
        if current_id != Some(vehicle_id) {
            log::warn!(
                "⚠️ Discarding stale booked dates for vehicle {} (showing {:?})",
                vehicle_id,
                current_id
            );
            return;
        }

        match result {
            Ok(set) => {
                self.booked = BookedDates::Loaded(set);
            }
            Err(error) => {
                log::error!("❌ Booked dates fetch failed: {}", error);
                self.apply_fetch_failure();
            }
        }
    }

    fn apply_fetch_failure(&mut self) {
        self.booked = BookedDates::Unavailable;
        if !self.fail_open {
            self.error = Some("Could not verify availability. Please try again.".to_string());
        }
    }

    /// Abortar el fetch en vuelo (desmontaje de pantalla)
    pub fn unmount(&mut self) {
        self.abort_fetch();
    }

    fn abort_fetch(&mut self) {
        if let Some(abort) = self.fetch_abort.take() {
            abort.abort();
        }
        self.fetch = None;
    }

    /// ¿Está la fecha ocupada? Alimenta el marcado visual de los pickers.
    pub fn is_date_excluded(&self, date: NaiveDate) -> bool {
        match &self.booked {
            BookedDates::Loaded(set) => set.contains(date),
            BookedDates::Loading | BookedDates::Unavailable => false,
        }
    }

    pub fn select_start_date(&mut self, date: NaiveDate) -> Result<(), String> {
        if self.is_date_excluded(date) {
            return Err("This date is already booked".to_string());
        }
        self.draft.start_date = Some(date);
        Ok(())
    }

    pub fn select_start_time(&mut self, time: NaiveTime) {
        self.draft.start_time = Some(time);
    }

    pub fn select_end_date(&mut self, date: NaiveDate) -> Result<(), String> {
        if let Some(min) = self.draft.min_end_date() {
            if date < min {
                return Err("Drop-off date cannot be before pick-up date".to_string());
            }
        }
        if self.is_date_excluded(date) {
            return Err("This date is already booked".to_string());
        }
        self.draft.end_date = Some(date);
        Ok(())
    }

    pub fn select_end_time(&mut self, time: NaiveTime) {
        self.draft.end_time = Some(time);
    }

    /// Vaciar los cuatro pickers y el error; la pantalla sigue en selección
    pub fn clear(&mut self) {
        self.draft.clear();
        self.error = None;
    }

    /// Enviar la reserva. Las puertas se evalúan en orden y ninguna de
    /// ellas toca la red; solo el request final lo hace.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.stage != BookingStage::SelectingDates {
            return SubmitOutcome::Stay;
        }
        let Some(vehicle) = self.vehicle.clone() else {
            return SubmitOutcome::Stay;
        };

        let Some(session) = self.store.current().await else {
            return SubmitOutcome::RedirectToLogin;
        };

        if !self.draft.is_complete() {
            self.error = Some("Please select pick-up and drop-off dates and times".to_string());
            return SubmitOutcome::Stay;
        }

        if self.booked == BookedDates::Unavailable && !self.fail_open {
            self.error = Some("Could not verify availability. Please try again.".to_string());
            self.start();
            return SubmitOutcome::Stay;
        }

        let Some((start, end)) = self.draft.merged_window() else {
            return SubmitOutcome::Stay;
        };
        if start >= end {
            self.error = Some("Drop-off must be after pick-up".to_string());
            return SubmitOutcome::Stay;
        }

        self.stage = BookingStage::Submitting;
        self.error = None;

        let request = CreateBookingRequest::new(&session.id, &vehicle.id, start, end);
        match self.booking_service.create(&session, &request).await {
            Ok(booking) => {
                self.confirmed = Some(booking);
                self.stage = BookingStage::Confirmed;
                SubmitOutcome::Confirmed
            }
            Err(error) => {
                if error.is_conflict() {
                    log::warn!("📅 Booking rejected by availability check: {}", error);
                } else {
                    log::error!("❌ Booking submission failed: {}", error);
                }
                // El borrador queda intacto para reintentar
                self.error = Some(error.user_message());
                self.stage = BookingStage::SelectingDates;
                SubmitOutcome::Stay
            }
        }
    }

    /// Resumen de la reserva confirmada
    pub fn summary(&self) -> Option<BookingSummary> {
        let booking = self.confirmed.as_ref()?;
        let vehicle = self.vehicle.as_ref()?;
        let estimated = estimated_days(booking.start_date, booking.end_date);
        let total_days = booking.total_days.map(i64::from).unwrap_or(estimated);
        let total_price = booking
            .total_price
            .unwrap_or(total_days as f64 * vehicle.price_per_day);

        Some(BookingSummary {
            vehicle: vehicle.title(),
            start: booking.start_date,
            end: booking.end_date,
            total_days,
            total_price,
        })
    }

    /// Pasar al pago con la reserva confirmada y el snapshot del vehículo
    pub fn proceed_to_pay(&self) -> AppResult<PaymentContext> {
        let booking = self
            .confirmed
            .clone()
            .ok_or_else(|| missing_state_error("booking"))?;
        let vehicle = self
            .vehicle
            .as_ref()
            .ok_or_else(|| missing_state_error("vehicle"))?;

        Ok(PaymentContext {
            booking,
            vehicle: VehicleSnapshot::from(vehicle),
        })
    }

    pub fn stage(&self) -> BookingStage {
        self.stage
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn booked(&self) -> &BookedDates {
        &self.booked
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Drop for BookingScreen {
    fn drop(&mut self) {
        self.abort_fetch();
    }
}

/// Días facturables entre dos instantes, redondeando hacia arriba
fn estimated_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds();
    ((seconds + 86_399) / 86_400).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::models::user::{Role, Session};
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn offline_screen(vehicle: Option<Vehicle>) -> BookingScreen {
        // Base URL sin servidor: cualquier request fallaría, así que los
        // tests de puertas demuestran que no se intenta ninguno
        let client = ApiClient::new("http://127.0.0.1:9", 1).unwrap();
        let store = SessionStore::new(std::env::temp_dir().join(format!(
            "booking_screen_test_{}_{}.json",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        )));
        BookingScreen::new(
            BookingService::new(client.clone()),
            ReviewService::new(client),
            store,
            true,
            vehicle,
        )
    }

    fn sample_vehicle() -> Vehicle {
        serde_json::from_value(serde_json::json!({
            "_id": "veh-1",
            "make": "Toyota",
            "model": "Corolla",
            "year": 2022,
            "pricePerDay": 55.0,
            "location": "Madrid",
            "seats": 5,
            "fuelType": "petrol",
            "transmission": "automatic",
            "availability": true
        }))
        .unwrap()
    }

    fn sample_session() -> Session {
        Session {
            id: "u-1".to_string(),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            role: Role::User,
            token: "tok".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[tokio::test]
    async fn test_no_vehicle_is_terminal_not_a_crash() {
        let mut screen = offline_screen(None);
        assert_eq!(screen.stage(), BookingStage::NoVehicleSelected);
        assert_eq!(screen.submit().await, SubmitOutcome::Stay);
    }

    #[tokio::test]
    async fn test_unauthenticated_submit_redirects_without_network() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        screen.select_start_date(date(2024, 6, 11)).unwrap();
        screen.select_start_time(time(10, 0));
        screen.select_end_date(date(2024, 6, 12)).unwrap();
        screen.select_end_time(time(10, 0));

        assert_eq!(screen.submit().await, SubmitOutcome::RedirectToLogin);
        assert!(screen.error().is_none());
    }

    #[tokio::test]
    async fn test_incomplete_draft_blocks_submit() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        let session = sample_session();
        screen.store.login(session).await.unwrap();

        screen.select_start_date(date(2024, 6, 11)).unwrap();
        assert_eq!(screen.submit().await, SubmitOutcome::Stay);
        assert_eq!(
            screen.error(),
            Some("Please select pick-up and drop-off dates and times")
        );

        screen.store.logout().await;
    }

    #[tokio::test]
    async fn test_inverted_window_blocks_submit_with_zero_network_calls() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        let session = sample_session();
        screen.store.login(session).await.unwrap();

        // Mismo día, hora de fin anterior a la de inicio
        screen.select_start_date(date(2024, 6, 11)).unwrap();
        screen.select_start_time(time(14, 0));
        screen.select_end_date(date(2024, 6, 11)).unwrap();
        screen.select_end_time(time(10, 0));

        assert_eq!(screen.submit().await, SubmitOutcome::Stay);
        assert_eq!(screen.error(), Some("Drop-off must be after pick-up"));
        // El borrador sobrevive al rechazo
        assert!(screen.draft().is_complete());

        screen.store.logout().await;
    }

    #[test]
    fn test_excluded_dates_are_flagged_and_rejected() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        let set = BookedDateSet::from_wire(&["2024-06-15".to_string()]);
        screen.apply_booked_dates("veh-1", Ok(set));

        assert!(screen.is_date_excluded(date(2024, 6, 15)));
        assert!(screen.select_start_date(date(2024, 6, 15)).is_err());
        assert!(screen.draft().start_date.is_none());
        assert!(screen.select_start_date(date(2024, 6, 16)).is_ok());
    }

    #[test]
    fn test_stale_booked_dates_response_is_discarded() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        let stale = BookedDateSet::from_wire(&["2024-06-15".to_string()]);
        screen.apply_booked_dates("veh-OTHER", Ok(stale));

        // Sigue en Loading: la respuesta era de otro vehículo
        assert_eq!(screen.booked(), &BookedDates::Loading);
        assert!(!screen.is_date_excluded(date(2024, 6, 15)));
    }

    #[test]
    fn test_fetch_failure_fail_open_allows_selection() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        screen.apply_booked_dates(
            "veh-1",
            Err(crate::utils::errors::AppError::InvalidResponse(
                "boom".to_string(),
            )),
        );

        assert_eq!(screen.booked(), &BookedDates::Unavailable);
        // Fail-open: nada se excluye y no hay error bloqueante
        assert!(!screen.is_date_excluded(date(2024, 6, 15)));
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_end_date_respects_start_minimum_without_clearing() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        screen.select_start_date(date(2024, 6, 11)).unwrap();
        screen.select_end_date(date(2024, 6, 15)).unwrap();

        // Mover el inicio no borra el fin ya elegido
        screen.select_start_date(date(2024, 6, 13)).unwrap();
        assert_eq!(screen.draft().end_date, Some(date(2024, 6, 15)));

        // Pero un fin nuevo por debajo del mínimo se rechaza
        assert!(screen.select_end_date(date(2024, 6, 12)).is_err());
    }

    #[test]
    fn test_clear_resets_draft_and_error() {
        let mut screen = offline_screen(Some(sample_vehicle()));
        screen.select_start_date(date(2024, 6, 11)).unwrap();
        screen.select_start_time(time(10, 0));
        screen.clear();
        assert_eq!(screen.draft(), &BookingDraft::default());
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_estimated_days_rounds_up_and_never_zero() {
        let start = date(2024, 6, 11).and_time(time(10, 0)).and_utc();
        assert_eq!(
            estimated_days(start, date(2024, 6, 12).and_time(time(10, 0)).and_utc()),
            1
        );
        assert_eq!(
            estimated_days(start, date(2024, 6, 12).and_time(time(18, 0)).and_utc()),
            2
        );
        assert_eq!(
            estimated_days(start, date(2024, 6, 11).and_time(time(12, 0)).and_utc()),
            1
        );
    }

    #[test]
    fn test_proceed_to_pay_requires_confirmed_booking() {
        let screen = offline_screen(Some(sample_vehicle()));
        assert!(screen.proceed_to_pay().is_err());
    }
}
