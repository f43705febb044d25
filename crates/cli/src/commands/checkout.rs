//! Checkout command.
//!
//! Walks an existing cart through every checkout step:
//!
//! ```yaml
//! # details.yaml
//! email: ada@example.com
//! shipping_address:
//!   first_name: Ada
//!   last_name: Lovelace
//!   address_1: Jl. Sudirman 1
//!   city: Jakarta
//!   postal_code: "10110"
//!   country_code: id
//!   phone: "+62 21 555 0100"
//! # billing_address: omitted means same as shipping
//! ```

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use medusa_storefront::checkout::{
    CheckoutFeedback, CheckoutFlow, CheckoutFormData, CheckoutStep, StepOutcome,
};
use medusa_storefront::medusa::AuthOutcome;
use medusa_storefront::state::AppState;
use medusa_storefront_core::{AddressDraft, CartId, Email, PaymentProviderId, ShippingOptionId};

use crate::error::AppError;

/// Arguments for [`run`].
pub struct CheckoutArgs {
    pub cart_id: String,
    pub details: PathBuf,
    pub shipping_option: Option<String>,
    pub provider: String,
    /// Email and password to log in with before checkout.
    pub login: Option<(String, String)>,
}

/// Contents of the details file.
#[derive(Debug, Deserialize)]
struct CheckoutDetails {
    email: String,
    shipping_address: AddressDraft,
    #[serde(default)]
    billing_address: Option<AddressDraft>,
    #[serde(default)]
    use_same_billing: Option<bool>,
}

impl From<CheckoutDetails> for CheckoutFormData {
    fn from(details: CheckoutDetails) -> Self {
        let use_same_billing = details
            .use_same_billing
            .unwrap_or(details.billing_address.is_none());
        Self {
            email: details.email,
            shipping_address: details.shipping_address,
            billing_address: details.billing_address.unwrap_or_default(),
            use_same_billing,
        }
    }
}

fn read_details(path: &Path) -> Result<CheckoutFormData, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let details: CheckoutDetails = serde_yaml::from_str(&raw)?;
    Ok(details.into())
}

/// Run checkout to completion or to a provider hand-off.
#[allow(clippy::print_stdout)]
pub async fn run(state: &AppState, args: &CheckoutArgs) -> Result<(), AppError> {
    let form = read_details(&args.details)?;

    state.cart().load(&CartId::new(&args.cart_id)).await?;

    if let Some((email, password)) = &args.login {
        let outcome = state
            .customer()
            .login(&Email::parse(email)?, &SecretString::from(password.clone()))
            .await?;
        if let AuthOutcome::Redirect(location) = outcome {
            tracing::warn!(%location, "Login needs a browser redirect; continuing as guest");
        }
    }

    let flow = state.checkout()?;
    flow.update_form(form);
    flow.select_provider(PaymentProviderId::new(&args.provider));

    let l10n = state.localizer();
    loop {
        let step = flow.current_step();
        if step == CheckoutStep::Delivery {
            ensure_shipping_method(&flow, state, args.shipping_option.as_deref()).await?;
        }

        println!("[{}] {}", l10n.get(step.title_key()), flow.cta_label(l10n));

        match flow.handle_continue(l10n).await {
            Ok(StepOutcome::Advanced(next)) => {
                tracing::debug!(%next, "Step confirmed");
            }
            Ok(StepOutcome::Completed { order_id }) => {
                println!("{}", l10n.format("order-with-id", &[("id", order_id.as_str())]));
                return Ok(());
            }
            Ok(StepOutcome::ExternalPayment {
                provider_id,
                cart_id,
                ..
            }) => {
                let name = flow.catalog().display_name(&provider_id);
                println!(
                    "{}",
                    l10n.format("payment-provider-is-in-development", &[("provider", name)])
                );
                println!("Cart {cart_id} is ready for payment with {name}");
                return Ok(());
            }
            Err(CheckoutFeedback::Inline(errors)) => {
                let message = errors
                    .iter()
                    .map(|(field, error)| format!("{field}: {}", l10n.get(error.message_key)))
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(AppError::CheckoutStopped {
                    step: step.to_string(),
                    message,
                });
            }
            Err(CheckoutFeedback::Alert(alert)) => {
                return Err(AppError::CheckoutStopped {
                    step: step.to_string(),
                    message: alert.message,
                });
            }
            Err(CheckoutFeedback::Ignored) => {}
        }
    }
}

/// Select a shipping method when the cart has none yet.
async fn ensure_shipping_method(
    flow: &CheckoutFlow<'_>,
    state: &AppState,
    preferred: Option<&str>,
) -> Result<(), AppError> {
    let has_method = state
        .cart()
        .cart()
        .is_some_and(|cart| !cart.shipping_methods.is_empty());
    if has_method {
        return Ok(());
    }

    let option_id = match preferred {
        Some(id) => ShippingOptionId::new(id),
        None => flow
            .list_shipping_options()
            .await?
            .into_iter()
            .next()
            .map(|option| option.id)
            .ok_or_else(|| {
                let cart_id = state.cart().cart_id().map(CartId::into_inner);
                AppError::NoShippingOptions(cart_id.unwrap_or_default())
            })?,
    };

    tracing::info!(%option_id, "Selecting shipping method");
    flow.select_shipping_method(&option_id).await?;
    Ok(())
}
