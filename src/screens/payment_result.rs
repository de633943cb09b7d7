//! Pantallas de retorno del checkout
//!
//! El retorno exitoso trae `session_id`, `bookingId` y `userId` en la
//! query; la confirmación solo se envía con el set COMPLETO. La forma de
//! la URL nunca se interpreta como éxito: decide el backend. El retorno
//! fallido es un render terminal sin ninguna llamada de red.

use crate::dto::payment_dto::ConfirmPaymentRequest;
use crate::router::{Navigation, Route};
use crate::services::PaymentService;

/// Identificadores extraídos de la query de retorno del checkout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentReturnQuery {
    pub session_id: Option<String>,
    pub booking_id: Option<String>,
    pub user_id: Option<String>,
}

impl PaymentReturnQuery {
    /// Parsear la query cruda (`a=1&b=2`). Claves desconocidas se ignoran.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = match urlencoding::decode(value) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => continue,
            };
            if value.is_empty() {
                continue;
            }
            match key {
                "session_id" => parsed.session_id = Some(value),
                "bookingId" => parsed.booking_id = Some(value),
                "userId" => parsed.user_id = Some(value),
                _ => {}
            }
        }
        parsed
    }

    /// Set completo de identificadores, o nada
    pub fn confirm_request(&self) -> Option<ConfirmPaymentRequest> {
        Some(ConfirmPaymentRequest {
            session_id: self.session_id.clone()?,
            booking_id: self.booking_id.clone()?,
            user_id: self.user_id.clone()?,
        })
    }
}

/// Vista del resultado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentResultView {
    Verifying,
    Success,
    Failure,
}

pub struct PaymentResultScreen {
    service: PaymentService,
    query: PaymentReturnQuery,
    view: PaymentResultView,
    message: Option<String>,
}

impl PaymentResultScreen {
    /// Retorno por la ruta de éxito: queda verificando hasta confirmar
    pub fn success_return(service: PaymentService, raw_query: &str) -> Self {
        Self {
            service,
            query: PaymentReturnQuery::parse(raw_query),
            view: PaymentResultView::Verifying,
            message: None,
        }
    }

    /// Retorno por la ruta de fallo: terminal directo, sin red
    pub fn failed_return(service: PaymentService) -> Self {
        Self {
            service,
            query: PaymentReturnQuery::default(),
            view: PaymentResultView::Failure,
            message: Some("Your payment was not completed".to_string()),
        }
    }

    /// Confirmar contra el backend. Con identificadores incompletos no se
    /// envía nada y la vista pasa a fallo.
    pub async fn confirm(&mut self) {
        if self.view != PaymentResultView::Verifying {
            return;
        }

        let Some(request) = self.query.confirm_request() else {
            log::warn!("⚠️ Payment return query is incomplete, not confirming");
            self.view = PaymentResultView::Failure;
            self.message = Some("Missing payment confirmation details".to_string());
            return;
        };

        match self.service.confirm(&request).await {
            Ok(response) => {
                self.view = PaymentResultView::Success;
                self.message = response.message;
            }
            Err(error) => {
                log::error!("❌ Payment confirmation failed: {}", error);
                self.view = PaymentResultView::Failure;
                self.message = Some(error.user_message());
            }
        }
    }

    pub fn return_home(&self) -> Navigation {
        Navigation::Internal(Route::Home)
    }

    pub fn view(&self) -> PaymentResultView {
        self.view
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn query(&self) -> &PaymentReturnQuery {
        &self.query
    }
}
