//! Medusa Store API client implementation.
//!
//! JSON over `reqwest`, with products, collections and regions cached in
//! `moka` for the configured TTL.

use std::sync::{Arc, PoisonError, RwLock};

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use medusa_storefront_core::{
    CartId, Email, OrderId, PaymentProviderId, ProductId, RegionId, ShippingOptionId,
};

use super::MedusaError;
use super::cache::CacheValue;
use super::types::{
    AuthOutcome, Cart, CartAddressUpdate, CollectionPage, CompleteCartResponse, Customer,
    CustomerCreate, CustomerUpdate, Order, PaymentCollection, PaymentProvider, Product, Region,
    ShippingOption,
};
use crate::config::MedusaConfig;

/// Header carrying the publishable API key.
const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// Longest slice of a response body written to logs.
const LOGGED_BODY_CHARS: usize = 500;

// =============================================================================
// Response envelopes
// =============================================================================

#[derive(serde::Deserialize)]
struct CartEnvelope {
    cart: Cart,
}

#[derive(serde::Deserialize)]
struct OrderEnvelope {
    order: Order,
}

#[derive(serde::Deserialize)]
struct ProductEnvelope {
    product: Product,
}

#[derive(serde::Deserialize)]
struct RegionsEnvelope {
    regions: Vec<Region>,
}

#[derive(serde::Deserialize)]
struct CustomerEnvelope {
    customer: Customer,
}

#[derive(serde::Deserialize)]
struct ShippingOptionsEnvelope {
    shipping_options: Vec<ShippingOption>,
}

#[derive(serde::Deserialize)]
struct PaymentProvidersEnvelope {
    payment_providers: Vec<PaymentProvider>,
}

#[derive(serde::Deserialize)]
struct PaymentCollectionEnvelope {
    payment_collection: PaymentCollection,
}

#[derive(serde::Deserialize)]
struct AuthEnvelope {
    token: Option<String>,
    location: Option<String>,
}

/// Error body Medusa returns with non-success statuses.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// =============================================================================
// MedusaClient
// =============================================================================

/// Client for the Medusa Store API.
///
/// Cheap to clone; clones share the HTTP connection pool, the cache and the
/// customer token.
#[derive(Clone)]
pub struct MedusaClient {
    inner: Arc<MedusaClientInner>,
}

struct MedusaClientInner {
    client: reqwest::Client,
    base_url: Url,
    publishable_key: SecretString,
    region_id: Option<RegionId>,
    token: RwLock<Option<SecretString>>,
    cache: Cache<String, CacheValue>,
}

impl MedusaClient {
    /// Create a new Store API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &MedusaConfig) -> Result<Self, MedusaError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(MedusaClientInner {
                client,
                base_url: api_base(&config.backend_url),
                publishable_key: config.publishable_key.clone(),
                region_id: config.region_id.clone(),
                token: RwLock::new(None),
                cache,
            }),
        })
    }

    /// Region configured for new carts and product pricing.
    #[must_use]
    pub fn region_id(&self) -> Option<&RegionId> {
        self.inner.region_id.as_ref()
    }

    /// Replace the customer bearer token.
    pub fn set_token(&self, token: Option<SecretString>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Whether a customer token is currently attached.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, MedusaError> {
        let url = self.inner.base_url.join(path.trim_start_matches('/'))?;
        let mut builder = self.inner.client.request(method, url).header(
            PUBLISHABLE_KEY_HEADER,
            self.inner.publishable_key.expose_secret(),
        );

        let token = self
            .inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|t| t.expose_secret().to_string());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send a request and decode a JSON body.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, MedusaError> {
        let response = builder.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(MedusaError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body),
                "Failed to parse Medusa response"
            );
            MedusaError::Parse(e)
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MedusaError> {
        self.send(self.request(Method::GET, path)?.query(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, MedusaError> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new cart, in `region_id` or the configured region.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn create_cart(&self, region_id: Option<&RegionId>) -> Result<Cart, MedusaError> {
        let region_id = region_id.or(self.inner.region_id.as_ref());
        let body = region_id.map_or_else(|| json!({}), |id| json!({ "region_id": id }));
        let envelope: CartEnvelope = self.post("/store/carts", &body).await?;
        debug!(cart_id = %envelope.cart.id, "Cart created");
        Ok(envelope.cart)
    }

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<Cart, MedusaError> {
        let envelope: CartEnvelope = self
            .get(&format!("/store/carts/{cart_id}"), &[])
            .await?;
        Ok(envelope.cart)
    }

    /// Persist email and addresses on a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the update.
    #[instrument(skip(self, update), fields(cart_id = %cart_id))]
    pub async fn update_cart(
        &self,
        cart_id: &CartId,
        update: &CartAddressUpdate,
    ) -> Result<Cart, MedusaError> {
        let envelope: CartEnvelope = self
            .post(&format!("/store/carts/{cart_id}"), update)
            .await?;
        Ok(envelope.cart)
    }

    /// Attach a cart to the authenticated customer.
    ///
    /// # Errors
    ///
    /// Returns an error if no customer is authenticated or the request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn transfer_cart(&self, cart_id: &CartId) -> Result<Cart, MedusaError> {
        let envelope: CartEnvelope = self
            .post(&format!("/store/carts/{cart_id}/customer"), &json!({}))
            .await?;
        Ok(envelope.cart)
    }

    /// List shipping options available for a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn list_shipping_options(
        &self,
        cart_id: &CartId,
    ) -> Result<Vec<ShippingOption>, MedusaError> {
        let envelope: ShippingOptionsEnvelope = self
            .get("/store/shipping-options", &[("cart_id", cart_id.as_str())])
            .await?;
        Ok(envelope.shipping_options)
    }

    /// Select a shipping method for a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is not valid for the cart.
    #[instrument(skip(self), fields(cart_id = %cart_id, option_id = %option_id))]
    pub async fn add_shipping_method(
        &self,
        cart_id: &CartId,
        option_id: &ShippingOptionId,
    ) -> Result<Cart, MedusaError> {
        let envelope: CartEnvelope = self
            .post(
                &format!("/store/carts/{cart_id}/shipping-methods"),
                &json!({ "option_id": option_id }),
            )
            .await?;
        Ok(envelope.cart)
    }

    /// Complete a cart, turning it into an order when payment succeeds.
    ///
    /// A `type: "cart"` answer is returned as-is; deciding that it is a
    /// failure is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request itself fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn complete_cart(&self, cart_id: &CartId) -> Result<CompleteCartResponse, MedusaError> {
        self.post(&format!("/store/carts/{cart_id}/complete"), &json!({}))
            .await
    }

    // =========================================================================
    // Payment Methods
    // =========================================================================

    /// List payment providers enabled in a region.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(region_id = %region_id))]
    pub async fn list_payment_providers(
        &self,
        region_id: &RegionId,
    ) -> Result<Vec<PaymentProvider>, MedusaError> {
        let envelope: PaymentProvidersEnvelope = self
            .get("/store/payment-providers", &[("region_id", region_id.as_str())])
            .await?;
        Ok(envelope.payment_providers)
    }

    /// Initiate a payment session for a cart with the given provider.
    ///
    /// Creates the cart's payment collection first when it has none.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    #[instrument(skip(self, cart), fields(cart_id = %cart.id, provider_id = %provider_id))]
    pub async fn initiate_payment_session(
        &self,
        cart: &Cart,
        provider_id: &PaymentProviderId,
    ) -> Result<PaymentCollection, MedusaError> {
        let collection_id = match &cart.payment_collection {
            Some(collection) => collection.id.clone(),
            None => {
                let envelope: PaymentCollectionEnvelope = self
                    .post(
                        "/store/payment-collections",
                        &json!({ "cart_id": cart.id }),
                    )
                    .await?;
                debug!(collection_id = %envelope.payment_collection.id, "Payment collection created");
                envelope.payment_collection.id
            }
        };

        let envelope: PaymentCollectionEnvelope = self
            .post(
                &format!("/store/payment-collections/{collection_id}/payment-sessions"),
                &json!({ "provider_id": provider_id }),
            )
            .await?;
        Ok(envelope.payment_collection)
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// Get an order placed by the current customer or from this device.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the API request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Order, MedusaError> {
        let envelope: OrderEnvelope = self
            .get(&format!("/store/orders/{order_id}"), &[])
            .await?;
        Ok(envelope.order)
    }

    // =========================================================================
    // Catalog Methods (cached)
    // =========================================================================

    /// Get a product priced for the configured region.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product, MedusaError> {
        let region = self.inner.region_id.as_ref().map_or("", RegionId::as_str);
        let cache_key = format!("product:{product_id}:{region}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let mut query = vec![("fields", "*variants.inventory_quantity")];
        if !region.is_empty() {
            query.push(("region_id", region));
        }
        let envelope: ProductEnvelope = self
            .get(&format!("/store/products/{product_id}"), &query)
            .await?;

        self.inner
            .cache
            .insert(
                cache_key,
                CacheValue::Product(Box::new(envelope.product.clone())),
            )
            .await;

        Ok(envelope.product)
    }

    /// Get a page of collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_collections(&self, limit: u32, offset: u32) -> Result<CollectionPage, MedusaError> {
        let cache_key = format!("collections:{limit}:{offset}");

        if let Some(CacheValue::Collections(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collections");
            return Ok(page);
        }

        let limit = limit.to_string();
        let offset = offset.to_string();
        let page: CollectionPage = self
            .get(
                "/store/collections",
                &[("limit", limit.as_str()), ("offset", offset.as_str())],
            )
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(page.clone()))
            .await;

        Ok(page)
    }

    /// List regions with their countries.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_regions(&self) -> Result<Vec<Region>, MedusaError> {
        let cache_key = "regions".to_string();

        if let Some(CacheValue::Regions(regions)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for regions");
            return Ok(regions);
        }

        let envelope: RegionsEnvelope = self.get("/store/regions", &[]).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Regions(envelope.regions.clone()))
            .await;

        Ok(envelope.regions)
    }

    // =========================================================================
    // Auth & Customer Methods
    // =========================================================================

    /// Authenticate a customer with email and password.
    ///
    /// The token is not attached automatically; see [`MedusaClient::set_token`].
    ///
    /// # Errors
    ///
    /// Returns [`MedusaError::Unauthorized`] on bad credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<AuthOutcome, MedusaError> {
        let envelope: AuthEnvelope = self
            .post(
                "/auth/customer/emailpass",
                &json!({ "email": email, "password": password.expose_secret() }),
            )
            .await?;
        auth_outcome(envelope)
    }

    /// Register email/password credentials for a new customer.
    ///
    /// Returns the registration token needed by [`MedusaClient::create_customer`].
    ///
    /// # Errors
    ///
    /// Returns an error if the identity already exists or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(&self, email: &Email, password: &SecretString) -> Result<String, MedusaError> {
        let envelope: AuthEnvelope = self
            .post(
                "/auth/customer/emailpass/register",
                &json!({ "email": email, "password": password.expose_secret() }),
            )
            .await?;
        match auth_outcome(envelope)? {
            AuthOutcome::Token(token) => Ok(token),
            AuthOutcome::Redirect(location) => Err(MedusaError::UnexpectedResponse(format!(
                "registration redirected to {location}"
            ))),
        }
    }

    /// Destroy the server-side auth session and drop the local token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the local token is dropped either way.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), MedusaError> {
        let result = self.request(Method::DELETE, "/auth/session");
        self.set_token(None);
        let response = result?.send().await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }

    /// Get the authenticated customer.
    ///
    /// # Errors
    ///
    /// Returns [`MedusaError::Unauthorized`] when nobody is logged in.
    #[instrument(skip(self))]
    pub async fn retrieve_customer(&self) -> Result<Customer, MedusaError> {
        let envelope: CustomerEnvelope = self.get("/store/customers/me", &[]).await?;
        Ok(envelope.customer)
    }

    /// Create the customer record for a freshly registered identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, customer), fields(email = %customer.email))]
    pub async fn create_customer(&self, customer: &CustomerCreate) -> Result<Customer, MedusaError> {
        let envelope: CustomerEnvelope = self.post("/store/customers", customer).await?;
        Ok(envelope.customer)
    }

    /// Update the authenticated customer's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, update))]
    pub async fn update_customer(&self, update: &CustomerUpdate) -> Result<Customer, MedusaError> {
        let envelope: CustomerEnvelope = self.post("/store/customers/me", update).await?;
        Ok(envelope.customer)
    }
}

/// Map a non-success response to an error.
fn error_from_response(status: StatusCode, body: &str) -> MedusaError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| truncate(body));

    match status {
        StatusCode::UNAUTHORIZED => MedusaError::Unauthorized(message),
        StatusCode::NOT_FOUND => MedusaError::NotFound(message),
        _ => {
            tracing::error!(
                status = %status,
                body = %truncate(body),
                "Medusa API returned non-success status"
            );
            MedusaError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

fn auth_outcome(envelope: AuthEnvelope) -> Result<AuthOutcome, MedusaError> {
    match (envelope.token, envelope.location) {
        (Some(token), _) => Ok(AuthOutcome::Token(token)),
        (None, Some(location)) => Ok(AuthOutcome::Redirect(location)),
        (None, None) => Err(MedusaError::UnexpectedResponse(
            "auth response had neither token nor location".to_string(),
        )),
    }
}

/// The backend URL with a trailing slash, so API paths resolve beneath any
/// mount prefix instead of replacing it.
fn api_base(backend_url: &Url) -> Url {
    let mut base = backend_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn truncate(body: &str) -> String {
    body.chars().take(LOGGED_BODY_CHARS).collect()
}
