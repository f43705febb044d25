//! Domain types for the Medusa Store API.
//!
//! These mirror the JSON the store routes return. Every collection field
//! defaults to empty and every scalar the API may send as `null` is an
//! `Option`, so partially expanded responses still deserialize.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use medusa_storefront_core::{
    Address, AddressDraft, CartId, CollectionId, CustomerId, Email, FulfillmentStatus, LineItemId,
    OrderId, PaymentCollectionId, PaymentProviderId, PaymentSessionId, PaymentSessionStatus,
    PaymentStatus, Price, ProductId, RegionId, ShippingOptionId, VariantId,
};

// =============================================================================
// Cart Types
// =============================================================================

/// A line item in a cart or order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub product_title: Option<String>,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    pub variant_title: Option<String>,
    pub unit_price: Decimal,
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// A shipping method attached to a cart or order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shipping_option_id: Option<ShippingOptionId>,
    pub amount: Decimal,
}

/// A provider-scoped handle used to process payment for a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    pub id: PaymentSessionId,
    pub provider_id: PaymentProviderId,
    #[serde(default)]
    pub status: PaymentSessionStatus,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Groups the payment sessions of a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCollection {
    pub id: PaymentCollectionId,
    #[serde(default)]
    pub payment_sessions: Vec<PaymentSession>,
}

/// A server-side order in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub region_id: Option<RegionId>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub email: Option<String>,
    pub currency_code: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub shipping_address: Option<AddressDraft>,
    #[serde(default)]
    pub billing_address: Option<AddressDraft>,
    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethod>,
    #[serde(default)]
    pub payment_collection: Option<PaymentCollection>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub shipping_total: Option<Decimal>,
    #[serde(default)]
    pub tax_total: Option<Decimal>,
    #[serde(default)]
    pub discount_total: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
}

impl Cart {
    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    /// The payment session that is still usable, if any.
    #[must_use]
    pub fn active_payment_session(&self) -> Option<&PaymentSession> {
        self.payment_collection
            .as_ref()?
            .payment_sessions
            .iter()
            .find(|session| session.status.is_active())
    }

    /// Cart total as a [`Price`], when the API reported one.
    #[must_use]
    pub fn total_price(&self) -> Option<Price> {
        Price::new(self.total?, &self.currency_code).ok()
    }
}

/// Address and contact details pushed to a cart during checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartAddressUpdate {
    pub email: Email,
    pub shipping_address: Address,
    pub billing_address: Address,
}

/// Result of `POST /store/carts/{id}/complete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CompleteCartResponse {
    /// The cart could not be turned into an order.
    Cart {
        #[serde(default)]
        cart: Option<Box<Cart>>,
        #[serde(default)]
        error: Option<CompleteCartError>,
    },
    /// The order was placed.
    Order { order: Box<Order> },
}

/// Error attached to a failed cart completion.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteCartError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

// =============================================================================
// Shipping & Payment Options
// =============================================================================

/// A shipping option available for a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingOption {
    pub id: ShippingOptionId,
    pub name: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub calculated_price: Option<CalculatedPrice>,
}

/// A payment provider enabled in a region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProvider {
    pub id: PaymentProviderId,
    #[serde(default)]
    pub is_enabled: Option<bool>,
}

// =============================================================================
// Order Types
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub display_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    pub currency_code: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fulfillment_status: FulfillmentStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub shipping_address: Option<AddressDraft>,
    #[serde(default)]
    pub billing_address: Option<AddressDraft>,
    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethod>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub shipping_total: Option<Decimal>,
    #[serde(default)]
    pub tax_total: Option<Decimal>,
    #[serde(default)]
    pub discount_total: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Region-specific price computed by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedPrice {
    #[serde(default)]
    pub calculated_amount: Option<Decimal>,
    #[serde(default)]
    pub original_amount: Option<Decimal>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

impl CalculatedPrice {
    /// The calculated amount as a [`Price`].
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        Price::new(self.calculated_amount?, self.currency_code.as_deref()?).ok()
    }
}

/// A possible value of a product option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOptionValue {
    pub id: String,
    pub value: String,
}

/// A product option such as size or color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub values: Vec<ProductOptionValue>,
}

/// The option value a variant carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantOptionValue {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub option_id: Option<String>,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub manage_inventory: bool,
    #[serde(default)]
    pub allow_backorder: bool,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub options: Vec<VariantOptionValue>,
    #[serde(default)]
    pub calculated_price: Option<CalculatedPrice>,
}

/// A product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: String,
    pub url: String,
}

/// A product in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub length: Option<Decimal>,
    #[serde(default)]
    pub height: Option<Decimal>,
    #[serde(default)]
    pub width: Option<Decimal>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// A curated product collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
}

/// One page of collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionPage {
    pub collections: Vec<Collection>,
    pub count: u64,
    pub offset: u64,
    pub limit: u64,
}

impl CollectionPage {
    /// Whether more collections exist after this page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.offset + (self.collections.len() as u64) < self.count
    }
}

// =============================================================================
// Region Types
// =============================================================================

/// A country served by a region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub iso_2: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A region with its currency and countries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub currency_code: String,
    #[serde(default)]
    pub countries: Vec<Country>,
}

// =============================================================================
// Customer Types
// =============================================================================

/// A saved customer address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub id: String,
    #[serde(flatten)]
    pub address: AddressDraft,
    #[serde(default)]
    pub is_default_shipping: bool,
    #[serde(default)]
    pub is_default_billing: bool,
}

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub addresses: Vec<CustomerAddress>,
}

impl Customer {
    /// The customer's full name, or the email when no name is set.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Profile fields a customer may change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Profile sent when creating a customer after registration.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerCreate {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
}

/// Result of an email/password authentication call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A bearer token was issued.
    Token(String),
    /// The provider requires a redirect (third-party auth).
    Redirect(String),
}
