//! The current cart.

use std::sync::{PoisonError, RwLock};

use tracing::{info, instrument};

use medusa_storefront_core::{CartId, PaymentProviderId, ShippingOptionId};

use super::SessionError;
use crate::medusa::{Cart, CartAddressUpdate, CompleteCartResponse, MedusaClient};

/// Holds the cart the storefront is working on.
///
/// The cart itself lives on the server; this keeps the last copy returned by
/// the API so callers can read it without a round-trip.
pub struct CartSession {
    client: MedusaClient,
    cart: RwLock<Option<Cart>>,
}

impl CartSession {
    #[must_use]
    pub fn new(client: MedusaClient) -> Self {
        Self {
            client,
            cart: RwLock::new(None),
        }
    }

    /// Create a session around an already loaded cart.
    #[must_use]
    pub fn with_cart(client: MedusaClient, cart: Cart) -> Self {
        Self {
            client,
            cart: RwLock::new(Some(cart)),
        }
    }

    #[must_use]
    pub fn client(&self) -> &MedusaClient {
        &self.client
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        self.cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn cart_id(&self) -> Option<CartId> {
        self.cart
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|cart| cart.id.clone())
    }

    /// Replace the current cart.
    pub fn set_cart(&self, cart: Option<Cart>) {
        *self.cart.write().unwrap_or_else(PoisonError::into_inner) = cart;
    }

    fn store(&self, cart: Cart) -> Cart {
        self.set_cart(Some(cart.clone()));
        cart
    }

    fn require_cart_id(&self) -> Result<CartId, SessionError> {
        self.cart_id().ok_or(SessionError::NoCart)
    }

    /// Load an existing cart by id and make it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be fetched.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn load(&self, cart_id: &CartId) -> Result<Cart, SessionError> {
        let cart = self.client.get_cart(cart_id).await?;
        Ok(self.store(cart))
    }

    /// Re-fetch the current cart from the server.
    ///
    /// Returns `None` when no cart is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be fetched.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Option<Cart>, SessionError> {
        let Some(cart_id) = self.cart_id() else {
            return Ok(None);
        };
        let cart = self.client.get_cart(&cart_id).await?;
        Ok(Some(self.store(cart)))
    }

    /// Persist email and addresses on the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoCart`] without a cart, or the API error.
    #[instrument(skip(self, update))]
    pub async fn update_cart(&self, update: &CartAddressUpdate) -> Result<Cart, SessionError> {
        let cart_id = self.require_cart_id()?;
        let cart = self.client.update_cart(&cart_id, update).await?;
        Ok(self.store(cart))
    }

    /// Replace the current cart with a fresh, empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the new cart cannot be created.
    #[instrument(skip(self))]
    pub async fn reset_cart(&self) -> Result<Cart, SessionError> {
        let region_id = self
            .cart()
            .and_then(|cart| cart.region_id)
            .or_else(|| self.client.region_id().cloned());
        let cart = self.client.create_cart(region_id.as_ref()).await?;
        info!(cart_id = %cart.id, "Cart reset");
        Ok(self.store(cart))
    }

    /// Attach the current cart to the logged-in customer.
    ///
    /// Does nothing when no cart is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer is rejected.
    #[instrument(skip(self))]
    pub async fn link_cart_to_customer(&self) -> Result<Option<Cart>, SessionError> {
        let Some(cart_id) = self.cart_id() else {
            return Ok(None);
        };
        let cart = self.client.transfer_cart(&cart_id).await?;
        Ok(Some(self.store(cart)))
    }

    /// Select a shipping method for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoCart`] without a cart, or the API error.
    #[instrument(skip(self), fields(option_id = %option_id))]
    pub async fn select_shipping_method(
        &self,
        option_id: &ShippingOptionId,
    ) -> Result<Cart, SessionError> {
        let cart_id = self.require_cart_id()?;
        let cart = self.client.add_shipping_method(&cart_id, option_id).await?;
        Ok(self.store(cart))
    }

    /// Initiate a payment session for the current cart and reload the cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoCart`] without a cart, or the API error.
    #[instrument(skip(self), fields(provider_id = %provider_id))]
    pub async fn initiate_payment_session(
        &self,
        provider_id: &PaymentProviderId,
    ) -> Result<Cart, SessionError> {
        let cart = self.cart().ok_or(SessionError::NoCart)?;
        self.client
            .initiate_payment_session(&cart, provider_id)
            .await?;
        let cart = self.client.get_cart(&cart.id).await?;
        Ok(self.store(cart))
    }

    /// Ask the server to turn the current cart into an order.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoCart`] without a cart, or the API error.
    #[instrument(skip(self))]
    pub async fn complete(&self) -> Result<CompleteCartResponse, SessionError> {
        let cart_id = self.require_cart_id()?;
        Ok(self.client.complete_cart(&cart_id).await?)
    }
}
