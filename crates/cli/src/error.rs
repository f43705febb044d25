//! CLI error type.

use thiserror::Error;

use medusa_storefront::checkout::CheckoutError;
use medusa_storefront::medusa::MedusaError;
use medusa_storefront::session::SessionError;
use medusa_storefront_core::EmailError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store API call failed.
    #[error("Medusa error: {0}")]
    Medusa(#[from] MedusaError),

    /// Session operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Checkout could not start.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Checkout stopped on a step; the message is already localized.
    #[error("Checkout stopped at {step}: {message}")]
    CheckoutStopped { step: String, message: String },

    /// Details file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Details file is not valid YAML/JSON.
    #[error("Invalid details file: {0}")]
    Details(#[from] serde_yaml::Error),

    /// Email argument is malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// `--option` argument is not `option_id=value`.
    #[error("Invalid option '{0}', expected option_id=value")]
    InvalidOption(String),

    /// The cart has no shipping options.
    #[error("No shipping options available for cart {0}")]
    NoShippingOptions(String),

    /// `--login` was given without a password.
    #[error("--login requires --password or MEDUSA_CUSTOMER_PASSWORD")]
    MissingPassword,
}
