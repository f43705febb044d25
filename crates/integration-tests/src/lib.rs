//! Shared fixtures for the storefront integration tests.
//!
//! Every test starts its own `wiremock` server standing in for the Medusa
//! backend, so no real network traffic is made.
//!
//! ```bash
//! cargo test -p medusa-storefront-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use medusa_storefront::config::MedusaConfig;
use medusa_storefront::medusa::MedusaClient;
use medusa_storefront_core::RegionId;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

/// Publishable key sent by test clients.
pub const PUBLISHABLE_KEY: &str = "pk_01J9ZK4H3W8Q6T2NRB7XC5MVDE";

/// Region configured on test clients.
pub const REGION_ID: &str = "reg_01";

/// Client pointed at `server`, with region [`REGION_ID`].
#[must_use]
pub fn client_for(server: &MockServer) -> MedusaClient {
    let url = Url::parse(&server.uri()).expect("mock server uri is a valid URL");
    let mut config = MedusaConfig::new(url, SecretString::from(PUBLISHABLE_KEY.to_string()));
    config.region_id = Some(RegionId::new(REGION_ID));
    MedusaClient::new(&config).expect("failed to build test MedusaClient")
}

/// A complete, valid address.
#[must_use]
pub fn address_json(city: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "address_1": "Jl. Sudirman 1",
        "city": city,
        "postal_code": "10110",
        "country_code": "id",
        "phone": "+62 21 555 0100"
    })
}

/// A one-item cart; top-level keys of `overrides` replace the defaults.
#[must_use]
pub fn cart_json(overrides: &Value) -> Value {
    let mut cart = json!({
        "id": "cart_01",
        "region_id": REGION_ID,
        "currency_code": "usd",
        "email": null,
        "items": [
            {"id": "cali_01", "title": "Tee", "quantity": 1, "unit_price": 20, "variant_id": "variant_01"}
        ],
        "shipping_address": null,
        "billing_address": null,
        "shipping_methods": [],
        "payment_collection": null,
        "total": 20
    });
    if let (Some(base), Some(extra)) = (cart.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    cart
}

/// A cart ready for the review step with `provider_id` chosen.
#[must_use]
pub fn review_cart_json(provider_id: &str) -> Value {
    cart_json(&json!({
        "email": "a@b.com",
        "shipping_address": address_json("Jakarta"),
        "billing_address": address_json("Jakarta"),
        "shipping_methods": [{"id": "casm_01", "name": "Standard", "amount": 5, "shipping_option_id": "so_01"}],
        "payment_collection": {
            "id": "pay_col_01",
            "payment_sessions": [{"id": "payses_01", "provider_id": provider_id, "status": "pending"}]
        }
    }))
}

/// A placed order.
#[must_use]
pub fn order_json(id: &str) -> Value {
    json!({
        "id": id,
        "display_id": 7,
        "email": "a@b.com",
        "currency_code": "usd",
        "created_at": "2025-03-04T15:07:00Z",
        "fulfillment_status": "not_fulfilled",
        "payment_status": "authorized",
        "items": [
            {"id": "cali_01", "title": "Tee", "quantity": 1, "unit_price": 20, "total": 20}
        ],
        "subtotal": 20,
        "shipping_total": 5,
        "tax_total": 0,
        "discount_total": 0,
        "total": 25
    })
}
