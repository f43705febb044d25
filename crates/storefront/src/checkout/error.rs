//! Checkout failures and their customer-facing form.

use thiserror::Error;

use medusa_storefront_core::{FieldErrors, PaymentProviderId};

use crate::i18n::Localizer;
use crate::medusa::MedusaError;
use crate::session::SessionError;

/// Generic message when a failure carries nothing better.
pub const AN_ERROR_OCCURRED: &str = "an-error-occurred";

/// Why a checkout step could not be confirmed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Form fields are missing or malformed; shown next to the fields.
    #[error("{} invalid field(s)", .0.len())]
    Validation(FieldErrors),

    /// Something the step needs is absent. Carries a message key.
    #[error("precondition failed: {0}")]
    Precondition(&'static str),

    /// The provider needs an external step the storefront cannot drive.
    #[error("payment provider not supported: {0}")]
    UnsupportedProvider(PaymentProviderId),

    /// The Store API failed or refused the operation.
    #[error("{}", server_text(.message, .fallback_key))]
    Server {
        /// Message supplied by the server, shown verbatim.
        message: Option<String>,
        /// Message key used when the server supplied none.
        fallback_key: &'static str,
    },

    /// Another step confirmation is still running.
    #[error("a checkout operation is already in progress")]
    Busy,
}

impl CheckoutError {
    pub(crate) fn server(message: Option<String>, fallback_key: &'static str) -> Self {
        Self::Server {
            message: message.filter(|m| !m.trim().is_empty()),
            fallback_key,
        }
    }

    /// Whether this failure should be reported to Sentry.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// The localized dialog for this failure.
    #[must_use]
    pub fn to_alert(&self, l10n: &Localizer) -> CheckoutAlert {
        let message = match self {
            Self::Validation(errors) => errors
                .iter()
                .next()
                .map_or_else(|| l10n.get(AN_ERROR_OCCURRED), |(_, e)| l10n.get(e.message_key))
                .to_string(),
            Self::Precondition(key) => l10n.get(key).to_string(),
            Self::UnsupportedProvider(_) => l10n.get("payment-provider-not-supported").to_string(),
            Self::Server {
                message,
                fallback_key,
            } => message
                .clone()
                .unwrap_or_else(|| l10n.get(fallback_key).to_string()),
            Self::Busy => l10n.get("operation-in-progress").to_string(),
        };

        CheckoutAlert {
            title: l10n.get("error").to_string(),
            message,
        }
    }
}

impl From<MedusaError> for CheckoutError {
    fn from(err: MedusaError) -> Self {
        Self::server(err.server_message().map(String::from), AN_ERROR_OCCURRED)
    }
}

impl From<SessionError> for CheckoutError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoCart => Self::Precondition("no-cart-found"),
            SessionError::NotLoggedIn => Self::server(None, AN_ERROR_OCCURRED),
            SessionError::Medusa(e) => e.into(),
        }
    }
}

fn server_text<'a>(message: &'a Option<String>, fallback_key: &'a &'static str) -> &'a str {
    message.as_deref().unwrap_or(fallback_key)
}

/// A localized error dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutAlert {
    pub title: String,
    pub message: String,
}
