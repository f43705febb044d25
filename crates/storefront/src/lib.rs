//! Medusa storefront library.
//!
//! Store API client, cart and customer sessions, and the multi-step
//! checkout flow, usable from any front end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod i18n;
pub mod medusa;
pub mod orders;
pub mod session;
pub mod state;
