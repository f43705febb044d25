//! The authenticated customer.

use std::sync::{Arc, PoisonError, RwLock};

use secrecy::SecretString;
use tracing::{info, instrument, warn};

use medusa_storefront_core::Email;

use super::{CartSession, SessionError};
use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::medusa::{AuthOutcome, Customer, CustomerCreate, CustomerUpdate, MedusaClient, MedusaError};

/// Details collected when a shopper creates an account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: Email,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
}

/// Holds the logged-in customer, if any.
pub struct CustomerSession {
    client: MedusaClient,
    cart: Arc<CartSession>,
    customer: RwLock<Option<Customer>>,
}

impl CustomerSession {
    #[must_use]
    pub fn new(client: MedusaClient, cart: Arc<CartSession>) -> Self {
        Self {
            client,
            cart,
            customer: RwLock::new(None),
        }
    }

    /// Snapshot of the current customer.
    #[must_use]
    pub fn customer(&self) -> Option<Customer> {
        self.customer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.customer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn set_customer(&self, customer: Option<Customer>) {
        match &customer {
            Some(c) => set_sentry_user(&c.id, Some(&c.email)),
            None => clear_sentry_user(),
        }
        *self.customer.write().unwrap_or_else(PoisonError::into_inner) = customer;
    }

    /// Re-fetch the customer.
    ///
    /// A missing or rejected token means nobody is logged in and yields
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns other API failures.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Option<Customer>, SessionError> {
        if !self.client.has_token() {
            self.set_customer(None);
            return Ok(None);
        }

        match self.client.retrieve_customer().await {
            Ok(customer) => {
                self.set_customer(Some(customer.clone()));
                Ok(Some(customer))
            }
            Err(MedusaError::Unauthorized(_)) => {
                self.client.set_token(None);
                self.set_customer(None);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Log in with email and password.
    ///
    /// On a token result the customer is refreshed and the current cart is
    /// linked to them concurrently. A third-party redirect is logged and
    /// returned to the caller untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication, the refresh or the cart transfer fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthOutcome, SessionError> {
        let outcome = self.client.login(email, password).await?;

        match &outcome {
            AuthOutcome::Token(token) => {
                self.client.set_token(Some(SecretString::from(token.clone())));
                let (customer, cart) =
                    tokio::join!(self.refresh(), self.cart.link_cart_to_customer());
                customer?;
                cart?;
                add_breadcrumb("auth", "Customer logged in", None);
            }
            AuthOutcome::Redirect(location) => {
                info!(location = %location, "Authentication requires third-party redirect");
            }
        }

        Ok(outcome)
    }

    /// Forget the customer, then reset the cart.
    ///
    /// The session is logged out even when the reset fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the replacement cart cannot be created.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "Failed to end auth session on server");
        }
        self.set_customer(None);
        add_breadcrumb("auth", "Customer logged out", None);
        self.cart.reset_cart().await?;
        Ok(())
    }

    /// Register a new account and log it in.
    ///
    /// The registration token only permits creating the customer record, so
    /// a second login with the same credentials follows.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three calls fails.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<Customer, SessionError> {
        let token = self
            .client
            .register(&registration.email, &registration.password)
            .await?;
        self.client.set_token(Some(SecretString::from(token)));

        self.client
            .create_customer(&CustomerCreate {
                email: registration.email.clone(),
                first_name: registration.first_name.clone(),
                last_name: registration.last_name.clone(),
            })
            .await?;

        self.login(&registration.email, &registration.password)
            .await?;

        self.customer().ok_or(SessionError::NotLoggedIn)
    }

    /// Update the logged-in customer's profile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotLoggedIn`] without a customer, or the API error.
    #[instrument(skip(self, update))]
    pub async fn update_customer(&self, update: &CustomerUpdate) -> Result<Customer, SessionError> {
        if !self.is_logged_in() {
            return Err(SessionError::NotLoggedIn);
        }
        let customer = self.client.update_customer(update).await?;
        self.set_customer(Some(customer.clone()));
        Ok(customer)
    }
}
