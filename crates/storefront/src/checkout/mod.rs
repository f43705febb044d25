//! Multi-step checkout.
//!
//! ```text
//! address ──▶ delivery ──▶ payment ──▶ review ──▶ order placed
//!    ▲            │           │           │
//!    └────────────┴───────────┴───────────┘  (jump back only)
//! ```
//!
//! Each step is confirmed through [`CheckoutFlow::continue_step`], which
//! runs one Store API side effect before advancing:
//!
//! - **address**: validate email and addresses, push them to the cart
//! - **delivery**: require a shipping method on the cart
//! - **payment**: initiate a payment session with the selected provider
//! - **review**: hand off to a provider flow, or complete the cart

mod error;
mod flow;
mod form;
mod provider;
mod step;

pub use error::{CheckoutAlert, CheckoutError};
pub use flow::{CheckoutFeedback, CheckoutFlow, StepOutcome};
pub use form::{CheckoutForm, CheckoutFormData, FormField};
pub use provider::{ExternalFlow, PaymentProviderCatalog, ProviderDetails};
pub use step::{CheckoutStep, StepSequencer};
