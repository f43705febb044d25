//! Core types for the Medusa storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod validation;

pub use address::{Address, AddressDraft, AddressField};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use status::*;
pub use validation::{FieldError, FieldErrorReason, FieldErrors, Validation};
