//! Medusa Store API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`; every store route carries the
//!   `x-publishable-api-key` header
//! - Medusa is source of truth - no local sync, direct API calls
//! - Products and collections are cached in memory via `moka`; carts,
//!   orders and customers never are
//! - A customer bearer token is attached once the customer authenticates
//!
//! # Example
//!
//! ```rust,ignore
//! use medusa_storefront::medusa::MedusaClient;
//!
//! let client = MedusaClient::new(&config.medusa)?;
//!
//! let cart = client.create_cart(Some(&region_id)).await?;
//! let options = client.list_shipping_options(&cart.id).await?;
//! let cart = client.add_shipping_method(&cart.id, &options[0].id).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::MedusaClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Medusa API.
#[derive(Debug, Error)]
pub enum MedusaError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the raw body when it had none.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A URL could not be built from the configured backend URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response parsed but lacked what the call promises.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl MedusaError {
    /// The message the backend supplied, suitable for showing to a customer.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::NotFound(message) | Self::Unauthorized(message) => {
                Some(message.as_str()).filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medusa_error_display() {
        let err = MedusaError::NotFound("Cart id not found: cart_1".to_string());
        assert_eq!(err.to_string(), "Not found: Cart id not found: cart_1");

        let err = MedusaError::Api {
            status: 400,
            message: "Invalid request".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 400 - Invalid request");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = MedusaError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_server_message_skips_empty() {
        let err = MedusaError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.server_message(), None);

        let err = MedusaError::Unauthorized("Invalid email or password".to_string());
        assert_eq!(err.server_message(), Some("Invalid email or password"));
    }
}
