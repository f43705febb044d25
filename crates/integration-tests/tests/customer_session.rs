//! Integration tests for `CustomerSession`: login, registration and logout.

use std::sync::Arc;

use medusa_storefront::medusa::{AuthOutcome, CustomerUpdate};
use medusa_storefront::session::{CartSession, CustomerSession, Registration, SessionError};
use medusa_storefront_core::Email;
use medusa_storefront_integration_tests::{cart_json, client_for};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sessions(server: &MockServer, with_cart: bool) -> (Arc<CartSession>, CustomerSession) {
    let client = client_for(server);
    let cart = if with_cart {
        let cart = serde_json::from_value(cart_json(&json!({}))).expect("cart fixture");
        CartSession::with_cart(client.clone(), cart)
    } else {
        CartSession::new(client.clone())
    };
    let cart = Arc::new(cart);
    let customer = CustomerSession::new(client, Arc::clone(&cart));
    (cart, customer)
}

fn customer_body() -> serde_json::Value {
    json!({
        "customer": {"id": "cus_01", "email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace"}
    })
}

fn password() -> SecretString {
    SecretString::from("hunter22".to_string())
}

#[tokio::test]
async fn refresh_without_token_is_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/customers/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body()))
        .expect(0)
        .mount(&server)
        .await;

    let (_, customer) = sessions(&server, false);
    assert!(customer.refresh().await.expect("refresh").is_none());
    assert!(!customer.is_logged_in());
}

#[tokio::test]
async fn login_loads_customer_and_links_cart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/store/customers/me"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/carts/cart_01/customer"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cart": cart_json(&json!({"customer_id": "cus_01"}))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (cart, customer) = sessions(&server, true);
    let outcome = customer
        .login(&Email::parse("ada@example.com").expect("email"), &password())
        .await
        .expect("login");

    assert_eq!(outcome, AuthOutcome::Token("jwt-1".to_string()));
    assert_eq!(
        customer.customer().map(|c| c.display_name()).as_deref(),
        Some("Ada Lovelace")
    );
    assert_eq!(
        cart.cart().and_then(|c| c.customer_id).map(|id| id.into_inner()).as_deref(),
        Some("cus_01")
    );
}

#[tokio::test]
async fn redirect_login_leaves_session_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"location": "https://idp.example.com/authorize"})),
        )
        .mount(&server)
        .await;

    let (_, customer) = sessions(&server, true);
    let outcome = customer
        .login(&Email::parse("ada@example.com").expect("email"), &password())
        .await
        .expect("login");

    assert!(matches!(outcome, AuthOutcome::Redirect(_)));
    assert!(!customer.is_logged_in());
}

#[tokio::test]
async fn register_creates_customer_then_logs_in_again() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass/register"))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "reg-token"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/customers"))
        .and(header("authorization", "Bearer reg-token"))
        .and(body_json(json!({"email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/store/customers/me"))
        .and(header("authorization", "Bearer jwt-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (_, customer) = sessions(&server, false);
    let registered = customer
        .register(&Registration {
            email: Email::parse("ada@example.com").expect("email"),
            password: password(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        })
        .await
        .expect("registration");

    assert_eq!(registered.id.as_str(), "cus_01");
    assert!(customer.is_logged_in());
}

#[tokio::test]
async fn expired_token_is_dropped_on_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store/customers/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.set_token(Some(SecretString::from("stale".to_string())));
    let customer = CustomerSession::new(client.clone(), Arc::new(CartSession::new(client.clone())));

    assert!(customer.refresh().await.expect("refresh").is_none());
    assert!(!client.has_token());
}

#[tokio::test]
async fn logout_resets_cart_even_when_server_fails() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/carts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cart": cart_json(&json!({"id": "cart_02", "items": []}))
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (cart, customer) = sessions(&server, true);
    customer.logout().await.expect("logout");

    assert_eq!(cart.cart_id().map(|id| id.into_inner()).as_deref(), Some("cart_02"));
    assert!(!customer.is_logged_in());
}

#[tokio::test]
async fn logout_forgets_customer_when_cart_reset_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/customer/emailpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-1"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/store/customers/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body()))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/carts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "database unavailable"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let customer = CustomerSession::new(client.clone(), Arc::new(CartSession::new(client.clone())));
    customer
        .login(&Email::parse("ada@example.com").expect("email"), &password())
        .await
        .expect("login");
    assert!(customer.is_logged_in());

    customer.logout().await.expect_err("cart reset fails");

    assert!(!customer.is_logged_in());
    assert!(customer.customer().is_none());
    assert!(!client.has_token());
}

#[tokio::test]
async fn profile_update_requires_login() {
    let server = MockServer::start().await;
    let (_, customer) = sessions(&server, false);

    let err = customer
        .update_customer(&CustomerUpdate {
            phone: Some("+62 21 555 0100".to_string()),
            ..CustomerUpdate::default()
        })
        .await
        .expect_err("anonymous update");
    assert!(matches!(err, SessionError::NotLoggedIn));
}
