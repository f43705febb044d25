//! The checkout step machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, instrument, warn};

use medusa_storefront_core::{CartId, FieldErrors, OrderId, PaymentProviderId, ShippingOptionId};

use super::error::{CheckoutAlert, CheckoutError};
use super::form::{CheckoutForm, CheckoutFormData};
use super::provider::{ExternalFlow, PaymentProviderCatalog};
use super::step::{CheckoutStep, StepSequencer};
use crate::error::{add_breadcrumb, capture_error};
use crate::i18n::Localizer;
use crate::medusa::{CompleteCartResponse, PaymentProvider, ShippingOption};
use crate::session::{CartSession, SessionError};

/// Result of a successful step confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cursor moved to this step.
    Advanced(CheckoutStep),
    /// The order was placed; checkout is over.
    Completed { order_id: OrderId },
    /// Payment continues in a provider flow run by the caller. The cursor
    /// stays on review.
    ExternalPayment {
        flow: ExternalFlow,
        provider_id: PaymentProviderId,
        cart_id: CartId,
    },
}

/// What to show the shopper when a confirmation did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutFeedback {
    /// Highlight these fields.
    Inline(FieldErrors),
    /// Show a dialog.
    Alert(CheckoutAlert),
    /// The tap arrived while another confirmation was running.
    Ignored,
}

struct FlowState {
    steps: StepSequencer,
    form: CheckoutForm,
    provider: Option<PaymentProviderId>,
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives one checkout over a [`CartSession`].
///
/// Each confirmation runs one side effect against the Store API and only
/// then advances. At most one confirmation runs at a time; state locks are
/// never held across an await.
pub struct CheckoutFlow<'s> {
    cart: &'s CartSession,
    catalog: PaymentProviderCatalog,
    state: Mutex<FlowState>,
    in_flight: AtomicBool,
}

impl<'s> CheckoutFlow<'s> {
    /// Start checkout for the session's cart.
    ///
    /// The starting step and payment provider are derived from what the
    /// cart already holds.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Precondition`] if there is no cart or it has
    /// no line items.
    pub fn new(cart: &'s CartSession, catalog: PaymentProviderCatalog) -> Result<Self, CheckoutError> {
        let snapshot = cart
            .cart()
            .ok_or(CheckoutError::Precondition("no-cart-found"))?;
        if snapshot.is_empty() {
            return Err(CheckoutError::Precondition("cart-is-empty"));
        }

        let state = FlowState {
            steps: StepSequencer::new(CheckoutStep::from_cart(&snapshot)),
            form: CheckoutForm::from_cart(&snapshot),
            provider: snapshot
                .active_payment_session()
                .map(|session| session.provider_id.clone()),
        };

        Ok(Self {
            cart,
            catalog,
            state: Mutex::new(state),
            in_flight: AtomicBool::new(false),
        })
    }

    fn state(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn current_step(&self) -> CheckoutStep {
        self.state().steps.current()
    }

    /// Whether a confirmation is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Go back to an earlier step.
    ///
    /// Returns `false` for forward or same-step targets and while a
    /// confirmation is running.
    pub fn jump_to(&self, step: CheckoutStep) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state().steps.jump_to(step)
    }

    pub fn select_provider(&self, provider_id: PaymentProviderId) {
        self.state().provider = Some(provider_id);
    }

    #[must_use]
    pub fn selected_provider(&self) -> Option<PaymentProviderId> {
        self.state().provider.clone()
    }

    #[must_use]
    pub const fn catalog(&self) -> &PaymentProviderCatalog {
        &self.catalog
    }

    /// Replace the values entered in the form.
    pub fn update_form(&self, data: CheckoutFormData) {
        self.state().form.set_data(data);
    }

    /// Values currently held by the form, prefilled from the cart.
    #[must_use]
    pub fn form_data(&self) -> CheckoutFormData {
        self.state().form.data().clone()
    }

    /// Field errors from the last address confirmation.
    #[must_use]
    pub fn form_errors(&self) -> FieldErrors {
        self.state().form.errors().clone()
    }

    /// Label of the call-to-action button for the current step.
    #[must_use]
    pub fn cta_label(&self, l10n: &Localizer) -> String {
        let (step, provider) = {
            let state = self.state();
            (state.steps.current(), state.provider.clone())
        };

        match step {
            CheckoutStep::Address => l10n.get("continue-to-delivery").to_string(),
            CheckoutStep::Delivery => l10n.get("continue-to-payment").to_string(),
            CheckoutStep::Payment => l10n.get("review-order").to_string(),
            CheckoutStep::Review => match provider {
                Some(id) if self.catalog.has_external_step(&id) => l10n.format(
                    "pay-using-provider",
                    &[("provider", self.catalog.display_name(&id))],
                ),
                _ => l10n.get("place-order").to_string(),
            },
        }
    }

    // =========================================================================
    // Delivery and payment collaborators
    // =========================================================================

    /// Shipping options for the cart.
    ///
    /// # Errors
    ///
    /// Returns an error without a cart or if the API call fails.
    pub async fn list_shipping_options(&self) -> Result<Vec<ShippingOption>, CheckoutError> {
        let cart_id = self
            .cart
            .cart_id()
            .ok_or(CheckoutError::Precondition("no-cart-id"))?;
        Ok(self.cart.client().list_shipping_options(&cart_id).await?)
    }

    /// Select the shipping method for the cart.
    ///
    /// # Errors
    ///
    /// Returns an error without a cart or if the API rejects the option.
    pub async fn select_shipping_method(&self, option_id: &ShippingOptionId) -> Result<(), CheckoutError> {
        match self.cart.select_shipping_method(option_id).await {
            Ok(_) => Ok(()),
            Err(SessionError::Medusa(e)) => Err(CheckoutError::server(
                e.server_message().map(String::from),
                "failed-to-update-shipping-method",
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Payment providers enabled in the cart's region.
    ///
    /// # Errors
    ///
    /// Returns an error when no region is known or the API call fails.
    pub async fn list_payment_providers(&self) -> Result<Vec<PaymentProvider>, CheckoutError> {
        let region_id = self
            .cart
            .cart()
            .and_then(|cart| cart.region_id)
            .or_else(|| self.cart.client().region_id().cloned())
            .ok_or(CheckoutError::Precondition("no-region-id"))?;
        Ok(self.cart.client().list_payment_providers(&region_id).await?)
    }

    // =========================================================================
    // Step confirmation
    // =========================================================================

    /// Confirm the current step.
    ///
    /// Runs the step's side effect and advances on success. On failure the
    /// cursor stays where it was.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Busy`] when another confirmation is running,
    /// or the failure of this one.
    #[instrument(skip(self), fields(step = tracing::field::Empty))]
    pub async fn continue_step(&self) -> Result<StepOutcome, CheckoutError> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(CheckoutError::Busy)?;

        let step = self.current_step();
        tracing::Span::current().record("step", step.title_key());

        match step {
            CheckoutStep::Address => self.submit_address().await?,
            CheckoutStep::Delivery => self.confirm_delivery()?,
            CheckoutStep::Payment => self.submit_payment().await?,
            CheckoutStep::Review => return self.complete_order().await,
        }

        let next = self.state().steps.advance();
        info!(to = %next, "Checkout step advanced");
        add_breadcrumb("checkout", "Advanced checkout step", Some(&[("step", next.title_key())]));
        Ok(StepOutcome::Advanced(next))
    }

    /// Confirm the current step and turn failures into shopper feedback.
    ///
    /// Server-side failures are reported to Sentry.
    ///
    /// # Errors
    ///
    /// Returns the feedback to show when the step did not succeed.
    pub async fn handle_continue(&self, l10n: &Localizer) -> Result<StepOutcome, CheckoutFeedback> {
        match self.continue_step().await {
            Ok(outcome) => Ok(outcome),
            Err(CheckoutError::Busy) => Err(CheckoutFeedback::Ignored),
            Err(CheckoutError::Validation(errors)) => Err(CheckoutFeedback::Inline(errors)),
            Err(err) => {
                if err.is_reportable() {
                    capture_error(&err, "Checkout step failed");
                } else {
                    warn!(error = %err, "Checkout step rejected");
                }
                Err(CheckoutFeedback::Alert(err.to_alert(l10n)))
            }
        }
    }

    async fn submit_address(&self) -> Result<(), CheckoutError> {
        let payload = {
            let mut state = self.state();
            let fields = state.form.fields_for_address_step();
            if !state.form.validate_subset(&fields) {
                return Err(CheckoutError::Validation(state.form.errors().clone()));
            }
            state.form.address_payload().map_err(CheckoutError::Validation)?
        };

        self.cart.update_cart(&payload).await?;
        Ok(())
    }

    fn confirm_delivery(&self) -> Result<(), CheckoutError> {
        let cart = self
            .cart
            .cart()
            .ok_or(CheckoutError::Precondition("no-cart-found"))?;
        if cart.shipping_methods.is_empty() {
            return Err(CheckoutError::Precondition("no-shipping-method-selected"));
        }
        Ok(())
    }

    async fn submit_payment(&self) -> Result<(), CheckoutError> {
        let provider_id = self
            .selected_provider()
            .ok_or(CheckoutError::Precondition("please-select-a-payment-method"))?;
        if self.cart.cart_id().is_none() {
            return Err(CheckoutError::Precondition("no-cart-found"));
        }

        self.cart.initiate_payment_session(&provider_id).await?;
        Ok(())
    }

    async fn complete_order(&self) -> Result<StepOutcome, CheckoutError> {
        let cart_id = self
            .cart
            .cart_id()
            .ok_or(CheckoutError::Precondition("no-cart-found"))?;
        let provider_id = self
            .selected_provider()
            .ok_or(CheckoutError::Precondition("please-select-a-payment-method"))?;

        if self.catalog.has_external_step(&provider_id) {
            let flow = self
                .catalog
                .get(&provider_id)
                .and_then(|details| details.external_flow);
            return match flow {
                Some(flow) => {
                    info!(provider_id = %provider_id, ?flow, "Handing payment to provider flow");
                    Ok(StepOutcome::ExternalPayment {
                        flow,
                        provider_id,
                        cart_id,
                    })
                }
                None => Err(CheckoutError::UnsupportedProvider(provider_id)),
            };
        }

        match self.cart.complete().await? {
            CompleteCartResponse::Order { order } => {
                info!(order_id = %order.id, "Order placed");
                add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order.id.as_str())]));
                if let Err(e) = self.cart.reset_cart().await {
                    warn!(error = %e, "Failed to start a new cart after order");
                }
                Ok(StepOutcome::Completed { order_id: order.id })
            }
            CompleteCartResponse::Cart { error, .. } => Err(CheckoutError::server(
                error.and_then(|e| e.message),
                "failed-to-complete-order",
            )),
        }
    }
}
