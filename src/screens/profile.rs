//! Pantalla de perfil
//!
//! Ver y editar el perfil propio. El email es de solo lectura; tras
//! guardar se vuelve a pedir el perfil al backend en vez de confiar en
//! el estado local.

use crate::dto::user_dto::UpdateProfileRequest;
use crate::models::user::UserProfile;
use crate::services::UserService;
use crate::session::SessionStore;
use crate::utils::errors::AppResult;

/// Formulario de edición (solo los campos editables)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
}

/// Resultado de cargar la pantalla
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    RedirectToLogin,
    Done,
}

pub struct ProfileScreen {
    service: UserService,
    store: SessionStore,
    profile: Option<UserProfile>,
    form: ProfileForm,
    editing: bool,
    loading: bool,
    error: Option<String>,
}

impl ProfileScreen {
    pub fn new(service: UserService, store: SessionStore) -> Self {
        Self {
            service,
            store,
            profile: None,
            form: ProfileForm::default(),
            editing: false,
            loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) -> LoadOutcome {
        let Some(session) = self.store.current().await else {
            return LoadOutcome::RedirectToLogin;
        };

        self.loading = true;
        self.error = None;
        match self.service.profile(&session).await {
            Ok(profile) => {
                self.seed_form(&profile);
                self.profile = Some(profile);
            }
            Err(error) => {
                log::error!("❌ Failed to load profile: {}", error);
                self.error = Some(error.user_message());
            }
        }
        self.loading = false;
        LoadOutcome::Done
    }

    fn seed_form(&mut self, profile: &UserProfile) {
        self.form = ProfileForm {
            name: profile.name.clone(),
            phone: profile.phone.clone(),
            profile_picture: profile.profile_picture.clone(),
        };
    }

    pub fn start_edit(&mut self) {
        if let Some(profile) = self.profile.clone() {
            self.seed_form(&profile);
            self.editing = true;
        }
    }

    /// Salir de edición descartando los cambios del formulario
    pub fn cancel_edit(&mut self) {
        if let Some(profile) = self.profile.clone() {
            self.seed_form(&profile);
        }
        self.editing = false;
    }

    pub fn set_name(&mut self, name: &str) {
        self.form.name = name.to_string();
    }

    pub fn set_phone(&mut self, phone: Option<String>) {
        self.form.phone = phone;
    }

    pub fn set_picture(&mut self, url: Option<String>) {
        self.form.profile_picture = url;
    }

    /// Guardar y re-fetch del perfil
    pub async fn save(&mut self) -> AppResult<()> {
        let session = self.store.require().await?;
        let request = UpdateProfileRequest {
            name: self.form.name.trim().to_string(),
            phone: self.form.phone.clone(),
            profile_picture: self.form.profile_picture.clone(),
        };

        match self.service.update_profile(&session, &request).await {
            Ok(_) => {
                self.editing = false;
                self.error = None;
                self.load().await;
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.user_message());
                Err(error)
            }
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
