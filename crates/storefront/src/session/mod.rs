//! Explicit cart and customer sessions.
//!
//! A [`CartSession`] owns the current cart; a [`CustomerSession`] owns the
//! authenticated customer and shares the cart session so login and logout
//! can re-link or reset the cart. Both are created once and handed to
//! consumers by reference.

mod cart;
mod customer;

pub use cart::CartSession;
pub use customer::{CustomerSession, Registration};

use thiserror::Error;

use crate::medusa::MedusaError;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation needs a cart and none is loaded.
    #[error("No cart loaded")]
    NoCart,

    /// The operation needs an authenticated customer.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The Store API call failed.
    #[error(transparent)]
    Medusa(#[from] MedusaError),
}
