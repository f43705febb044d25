//! CLI command implementations.

pub mod account;
pub mod catalog;
pub mod checkout;
pub mod orders;
