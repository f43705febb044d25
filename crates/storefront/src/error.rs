//! Sentry reporting helpers.
//!
//! Errors are reported where they are converted into customer-facing
//! messages; these helpers keep the user context and breadcrumb trail that
//! accompany those reports.

use medusa_storefront_core::CustomerId;

/// Report an error to Sentry and log it with the event id.
pub fn capture_error<E>(error: &E, context: &str)
where
    E: std::error::Error + ?Sized,
{
    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        sentry_event_id = %event_id,
        "{context}"
    );
}

/// Attach the logged-in customer to subsequent Sentry events.
pub fn set_sentry_user(customer_id: &CustomerId, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(customer_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Detach the customer from Sentry events after logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Record a session or checkout milestone as an info-level breadcrumb.
///
/// ```rust,ignore
/// add_breadcrumb("checkout", "Advanced checkout step", Some(&[("step", "delivery")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
