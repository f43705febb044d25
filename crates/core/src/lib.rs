//! Medusa Storefront Core - Shared types library.
//!
//! This crate provides common types used across all storefront components:
//! - `storefront` - Medusa Store API client, sessions and the checkout flow
//! - `cli` - Command-line driver for checkout, orders and catalog reads
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, statuses,
//!   and validated postal addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
