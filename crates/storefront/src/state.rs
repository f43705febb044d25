//! Application state shared by storefront consumers.

use std::sync::Arc;

use crate::checkout::{CheckoutError, CheckoutFlow, PaymentProviderCatalog};
use crate::config::StorefrontConfig;
use crate::i18n::Localizer;
use crate::medusa::{MedusaClient, MedusaError};
use crate::session::{CartSession, CustomerSession};

/// Application state.
///
/// This struct is cheaply cloneable via `Arc` and owns the single client and
/// the cart and customer sessions built on it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    client: MedusaClient,
    localizer: Localizer,
    cart: Arc<CartSession>,
    customer: CustomerSession,
    payment_providers: PaymentProviderCatalog,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, MedusaError> {
        let client = MedusaClient::new(&config.medusa)?;
        let cart = Arc::new(CartSession::new(client.clone()));
        let customer = CustomerSession::new(client.clone(), Arc::clone(&cart));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                localizer: Localizer::new(config.locale),
                config,
                client,
                cart,
                customer,
                payment_providers: PaymentProviderCatalog::default(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Medusa Store API client.
    #[must_use]
    pub fn client(&self) -> &MedusaClient {
        &self.inner.client
    }

    #[must_use]
    pub fn localizer(&self) -> &Localizer {
        &self.inner.localizer
    }

    #[must_use]
    pub fn cart(&self) -> &CartSession {
        &self.inner.cart
    }

    #[must_use]
    pub fn customer(&self) -> &CustomerSession {
        &self.inner.customer
    }

    /// Start checkout for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Precondition`] when the cart is missing or empty.
    pub fn checkout(&self) -> Result<CheckoutFlow<'_>, CheckoutError> {
        CheckoutFlow::new(&self.inner.cart, self.inner.payment_providers.clone())
    }
}
