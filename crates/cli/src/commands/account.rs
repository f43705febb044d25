//! Customer account commands.

use medusa_storefront::session::Registration;
use medusa_storefront::state::AppState;
use medusa_storefront_core::Email;
use secrecy::SecretString;

use crate::error::AppError;

/// Create a customer account and log it in.
#[allow(clippy::print_stdout)]
pub async fn register(
    state: &AppState,
    email: &str,
    first_name: &str,
    last_name: &str,
    password: String,
) -> Result<(), AppError> {
    let registration = Registration {
        email: Email::parse(email)?,
        password: SecretString::from(password),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    };

    let customer = state.customer().register(&registration).await?;
    tracing::info!(customer_id = %customer.id, "Customer registered");
    println!("{}  {}", customer.id, customer.display_name());
    Ok(())
}
