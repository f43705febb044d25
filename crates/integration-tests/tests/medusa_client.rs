//! Integration tests for `MedusaClient`.
//!
//! Covers request shape (headers, paths, bodies), status-code mapping and
//! catalog caching against a `wiremock` backend.

use medusa_storefront::config::MedusaConfig;
use medusa_storefront::medusa::{AuthOutcome, CompleteCartResponse, MedusaClient, MedusaError};
use medusa_storefront_core::{
    CartId, Email, OrderId, PaymentProviderId, ProductId, ShippingOptionId,
};
use medusa_storefront_integration_tests::{
    PUBLISHABLE_KEY, REGION_ID, cart_json, client_for, order_json,
};
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_cart_sends_publishable_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/carts/cart_01"))
        .and(header("x-publishable-api-key", PUBLISHABLE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cart": cart_json(&json!({}))})))
        .expect(1)
        .mount(&server)
        .await;

    let cart = client_for(&server)
        .get_cart(&CartId::new("cart_01"))
        .await
        .expect("cart should load");

    assert_eq!(cart.id.as_str(), "cart_01");
    assert_eq!(cart.item_count(), 1);
}

#[tokio::test]
async fn backend_mounted_under_a_path_prefix() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/medusa/store/carts/cart_01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cart": cart_json(&json!({}))})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/medusa/auth/customer/emailpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/medusa", server.uri())).expect("prefixed url");
    let client = MedusaClient::new(&MedusaConfig::new(
        url,
        SecretString::from(PUBLISHABLE_KEY.to_string()),
    ))
    .expect("client builds");

    let cart = client
        .get_cart(&CartId::new("cart_01"))
        .await
        .expect("cart under prefix");
    assert_eq!(cart.id.as_str(), "cart_01");

    client
        .login(
            &Email::parse("a@b.com").expect("email"),
            &SecretString::from("hunter22".to_string()),
        )
        .await
        .expect("auth under prefix");
}

#[tokio::test]
async fn create_cart_uses_configured_region() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/carts"))
        .and(body_json(json!({"region_id": REGION_ID})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"cart": cart_json(&json!({"items": []}))})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cart = client_for(&server).create_cart(None).await.expect("cart created");
    assert!(cart.is_empty());
}

#[tokio::test]
async fn bearer_token_is_attached_after_set_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/customers/me"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customer": {"id": "cus_01", "email": "a@b.com", "first_name": "Ada", "last_name": "Lovelace"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token(Some(SecretString::from("jwt-123".to_string())));
    let customer = client.retrieve_customer().await.expect("customer loads");
    assert_eq!(customer.display_name(), "Ada Lovelace");
}

#[tokio::test]
async fn shipping_options_are_listed_and_selected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/shipping-options"))
        .and(query_param("cart_id", "cart_01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shipping_options": [{"id": "so_01", "name": "Standard", "amount": 5}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/carts/cart_01/shipping-methods"))
        .and(body_json(json!({"option_id": "so_01"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cart": cart_json(&json!({"shipping_methods": [{"id": "casm_01", "name": "Standard", "amount": 5}]}))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cart_id = CartId::new("cart_01");
    let options = client.list_shipping_options(&cart_id).await.expect("options");
    assert_eq!(options.len(), 1);

    let cart = client
        .add_shipping_method(&cart_id, &ShippingOptionId::new("so_01"))
        .await
        .expect("method added");
    assert_eq!(cart.shipping_methods.len(), 1);
}

// ---------------------------------------------------------------------------
// Payment sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initiate_payment_session_creates_missing_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/payment-collections"))
        .and(body_json(json!({"cart_id": "cart_01"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment_collection": {"id": "pay_col_01", "payment_sessions": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/payment-collections/pay_col_01/payment-sessions"))
        .and(body_json(json!({"provider_id": "pp_system_default"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment_collection": {
                "id": "pay_col_01",
                "payment_sessions": [{"id": "payses_01", "provider_id": "pp_system_default", "status": "pending"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cart = serde_json::from_value(cart_json(&json!({}))).expect("cart fixture");
    let collection = client_for(&server)
        .initiate_payment_session(&cart, &PaymentProviderId::new("pp_system_default"))
        .await
        .expect("session initiated");

    assert_eq!(collection.payment_sessions.len(), 1);
}

#[tokio::test]
async fn initiate_payment_session_reuses_existing_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/payment-collections"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/payment-collections/pay_col_09/payment-sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "payment_collection": {"id": "pay_col_09", "payment_sessions": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cart = serde_json::from_value(cart_json(&json!({
        "payment_collection": {"id": "pay_col_09", "payment_sessions": []}
    })))
    .expect("cart fixture");
    client_for(&server)
        .initiate_payment_session(&cart, &PaymentProviderId::new("pp_stripe_stripe"))
        .await
        .expect("session initiated");
}

#[tokio::test]
async fn complete_cart_returns_both_result_types() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/carts/cart_01/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "order",
            "order": order_json("order_01")
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/carts/cart_02/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "cart",
            "cart": cart_json(&json!({"id": "cart_02"})),
            "error": {"message": "card declined", "name": "unknown_error", "type": "payment_authorization_error"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let placed = client.complete_cart(&CartId::new("cart_01")).await.expect("completion");
    assert!(matches!(placed, CompleteCartResponse::Order { ref order } if order.id.as_str() == "order_01"));

    let failed = client.complete_cart(&CartId::new("cart_02")).await.expect("completion");
    let CompleteCartResponse::Cart { error: Some(error), .. } = failed else {
        panic!("expected a cart result with an error, got {failed:?}");
    };
    assert_eq!(error.message.as_deref(), Some("card declined"));
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/orders/order_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "not_found", "message": "Order with id: order_missing was not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_order(&OrderId::new("order_missing"))
        .await
        .expect_err("404 must be an error");

    assert!(
        matches!(err, MedusaError::NotFound(ref m) if m.contains("order_missing")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn bad_request_carries_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/carts/cart_01/customer"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "type": "invalid_data", "message": "Cart already belongs to a customer"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .transfer_cart(&CartId::new("cart_01"))
        .await
        .expect_err("400 must be an error");

    assert!(
        matches!(err, MedusaError::Api { status: 400, .. }),
        "got {err:?}"
    );
    assert_eq!(err.server_message(), Some("Cart already belongs to a customer"));
}

#[tokio::test]
async fn rate_limit_reads_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/regions"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_regions()
        .await
        .expect_err("429 must be an error");
    assert!(matches!(err, MedusaError::RateLimited(12)), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/carts/cart_01"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_cart(&CartId::new("cart_01"))
        .await
        .expect_err("html is not a cart");
    assert!(matches!(err, MedusaError::Parse(_)), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Caching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn product_is_fetched_once_with_region_pricing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/products/prod_01"))
        .and(query_param("region_id", REGION_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": {"id": "prod_01", "title": "Tee", "variants": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = ProductId::new("prod_01");
    let first = client.get_product(&id).await.expect("first fetch");
    let second = client.get_product(&id).await.expect("cached fetch");
    assert_eq!(first.title, second.title);
}

#[tokio::test]
async fn collections_page_is_cached_per_offset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/collections"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": [{"id": "pcol_01", "title": "Summer"}],
            "count": 2, "offset": 0, "limit": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client.list_collections(1, 0).await.expect("page");
    assert!(page.has_next_page());
    client.list_collections(1, 0).await.expect("cached page");
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_distinguishes_token_and_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass"))
        .and(body_json(json!({"email": "a@b.com", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-1"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass"))
        .and(body_json(json!({"email": "sso@b.com", "password": "hunter22"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"location": "https://idp.example.com/authorize"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let password = SecretString::from("hunter22".to_string());

    let outcome = client
        .login(&Email::parse("a@b.com").expect("email"), &password)
        .await
        .expect("login");
    assert_eq!(outcome, AuthOutcome::Token("jwt-1".into()));

    let outcome = client
        .login(&Email::parse("sso@b.com").expect("email"), &password)
        .await
        .expect("login");
    assert!(matches!(outcome, AuthOutcome::Redirect(ref l) if l.starts_with("https://idp")));
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "unauthorized", "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(
            &Email::parse("a@b.com").expect("email"),
            &SecretString::from("wrong".to_string()),
        )
        .await
        .expect_err("401 must be an error");
    assert_eq!(err.server_message(), Some("Invalid email or password"));
}
