//! The checkout form: email, addresses and the same-billing flag.

use std::fmt;

use medusa_storefront_core::{Address, AddressDraft, Email, FieldErrors, Validation};

use crate::medusa::{Cart, CartAddressUpdate};

const INVALID_EMAIL: &str = "please-enter-a-valid-email";

/// Top-level fields that can be validated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Email,
    ShippingAddress,
    BillingAddress,
}

impl FormField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::ShippingAddress => "shipping_address",
            Self::BillingAddress => "billing_address",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values entered by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutFormData {
    pub email: String,
    pub shipping_address: AddressDraft,
    pub billing_address: AddressDraft,
    /// When set, the billing address is the shipping address whatever
    /// `billing_address` holds.
    pub use_same_billing: bool,
}

impl CheckoutFormData {
    /// Initial values for a cart.
    ///
    /// Cart addresses that do not validate start out empty. Billing defaults
    /// to "same as shipping" unless the cart holds two different addresses.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let prefill = |draft: Option<&AddressDraft>| match draft.map(Address::validate) {
            Some(Validation::Valid(address)) => AddressDraft::from(&address),
            _ => AddressDraft::default(),
        };

        let use_same_billing = match (&cart.shipping_address, &cart.billing_address) {
            (Some(shipping), Some(billing)) => {
                Address::validate(shipping) == Address::validate(billing)
            }
            _ => true,
        };

        Self {
            email: cart.email.clone().unwrap_or_default(),
            shipping_address: prefill(cart.shipping_address.as_ref()),
            billing_address: prefill(cart.billing_address.as_ref()),
            use_same_billing,
        }
    }
}

/// Form state plus the errors of the last validation.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    data: CheckoutFormData,
    errors: FieldErrors,
}

impl CheckoutForm {
    #[must_use]
    pub fn new(data: CheckoutFormData) -> Self {
        Self {
            data,
            errors: FieldErrors::default(),
        }
    }

    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        Self::new(CheckoutFormData::from_cart(cart))
    }

    #[must_use]
    pub const fn data(&self) -> &CheckoutFormData {
        &self.data
    }

    /// Replace the entered values.
    pub fn set_data(&mut self, data: CheckoutFormData) {
        self.data = data;
    }

    /// Errors recorded by the last [`CheckoutForm::validate_subset`] call.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Fields the address step must validate.
    #[must_use]
    pub fn fields_for_address_step(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Email, FormField::ShippingAddress];
        if !self.data.use_same_billing {
            fields.push(FormField::BillingAddress);
        }
        fields
    }

    /// The billing address that will be submitted.
    #[must_use]
    pub const fn resolved_billing(&self) -> &AddressDraft {
        if self.data.use_same_billing {
            &self.data.shipping_address
        } else {
            &self.data.billing_address
        }
    }

    /// Validate only `fields`, replacing the recorded errors.
    pub fn validate_subset(&mut self, fields: &[FormField]) -> bool {
        let mut errors = FieldErrors::default();
        for field in fields {
            let field_errors = match field {
                FormField::Email => validate_email(&self.data.email).err(),
                FormField::ShippingAddress => {
                    Address::validate(&self.data.shipping_address).into_result().err()
                }
                FormField::BillingAddress => {
                    Address::validate(&self.data.billing_address).into_result().err()
                }
            };
            if let Some(field_errors) = field_errors {
                match field {
                    FormField::Email => errors.merge(field_errors),
                    _ => errors.extend_prefixed(field.as_str(), field_errors),
                }
            }
        }
        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    /// Build the cart update for the address step.
    ///
    /// # Errors
    ///
    /// Returns field errors if the email or either submitted address is invalid.
    pub fn address_payload(&self) -> Result<CartAddressUpdate, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = validate_email(&self.data.email)
            .map_err(|e| errors.merge(e))
            .ok();
        let shipping_address = Address::validate(&self.data.shipping_address)
            .into_result()
            .map_err(|e| errors.extend_prefixed(FormField::ShippingAddress.as_str(), e))
            .ok();
        let billing_address = if self.data.use_same_billing {
            shipping_address.clone()
        } else {
            Address::validate(&self.data.billing_address)
                .into_result()
                .map_err(|e| errors.extend_prefixed(FormField::BillingAddress.as_str(), e))
                .ok()
        };

        match (email, shipping_address, billing_address) {
            (Some(email), Some(shipping_address), Some(billing_address)) => Ok(CartAddressUpdate {
                email,
                shipping_address,
                billing_address,
            }),
            _ => Err(errors),
        }
    }
}

fn validate_email(raw: &str) -> Result<Email, FieldErrors> {
    Email::parse(raw).map_err(|_| {
        let mut errors = FieldErrors::default();
        if raw.trim().is_empty() {
            errors.missing(FormField::Email.as_str(), INVALID_EMAIL);
        } else {
            errors.invalid(FormField::Email.as_str(), INVALID_EMAIL);
        }
        errors
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use medusa_storefront_core::FieldErrorReason;
    use serde_json::json;

    fn draft(city: &str) -> AddressDraft {
        AddressDraft {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            address_1: Some("1 Analytical Way".into()),
            city: Some(city.into()),
            postal_code: Some("10110".into()),
            country_code: Some("ID".into()),
            phone: Some("+62 21 555 0100".into()),
            ..AddressDraft::default()
        }
    }

    fn form(use_same_billing: bool, billing: AddressDraft) -> CheckoutForm {
        CheckoutForm::new(CheckoutFormData {
            email: "a@b.com".into(),
            shipping_address: draft("Jakarta"),
            billing_address: billing,
            use_same_billing,
        })
    }

    #[test]
    fn test_address_step_fields_follow_billing_flag() {
        assert_eq!(
            form(true, AddressDraft::default()).fields_for_address_step(),
            vec![FormField::Email, FormField::ShippingAddress]
        );
        assert_eq!(
            form(false, AddressDraft::default()).fields_for_address_step(),
            vec![FormField::Email, FormField::ShippingAddress, FormField::BillingAddress]
        );
    }

    #[test]
    fn test_validate_subset_skips_unlisted_fields() {
        let mut form = form(true, AddressDraft::default());
        assert!(form.validate_subset(&form.fields_for_address_step()));
        assert!(form.errors().is_empty());

        assert!(!form.validate_subset(&[FormField::BillingAddress]));
        let error = form.errors().get("billing_address.city").unwrap();
        assert_eq!(error.reason, FieldErrorReason::Missing);
        assert_eq!(error.message_key, "city-is-required");
    }

    #[test]
    fn test_validate_subset_reports_bad_email() {
        let mut form = form(true, AddressDraft::default());
        let mut data = form.data().clone();
        data.email = "not-an-email".into();
        form.set_data(data);

        assert!(!form.validate_subset(&[FormField::Email]));
        let error = form.errors().get("email").unwrap();
        assert_eq!(error.reason, FieldErrorReason::Invalid);
        assert_eq!(error.message_key, "please-enter-a-valid-email");
    }

    #[test]
    fn test_same_billing_ignores_stored_billing() {
        let form = form(true, draft("Bandung"));
        assert_eq!(form.resolved_billing().city.as_deref(), Some("Jakarta"));

        let payload = form.address_payload().unwrap();
        assert_eq!(payload.billing_address, payload.shipping_address);
        assert_eq!(payload.shipping_address.country_code, "id");
    }

    #[test]
    fn test_separate_billing_is_submitted() {
        let payload = form(false, draft("Bandung")).address_payload().unwrap();
        assert_eq!(payload.billing_address.city, "Bandung");
        assert_eq!(payload.shipping_address.city, "Jakarta");
    }

    #[test]
    fn test_form_data_from_cart() {
        let cart: Cart = serde_json::from_value(json!({
            "id": "cart_1",
            "currency_code": "idr",
            "email": "a@b.com",
            "shipping_address": {"first_name": "Ada", "city": "Jakarta"},
            "billing_address": null
        }))
        .unwrap();
        let data = CheckoutFormData::from_cart(&cart);
        assert_eq!(data.email, "a@b.com");
        assert_eq!(data.shipping_address, AddressDraft::default());
        assert!(data.use_same_billing);

        let cart: Cart = serde_json::from_value(json!({
            "id": "cart_1",
            "currency_code": "idr",
            "shipping_address": serde_json::to_value(draft("Jakarta")).unwrap(),
            "billing_address": serde_json::to_value(draft("Bandung")).unwrap()
        }))
        .unwrap();
        let data = CheckoutFormData::from_cart(&cart);
        assert!(!data.use_same_billing);
        assert_eq!(data.email, "");
        assert_eq!(data.billing_address.city.as_deref(), Some("Bandung"));
    }
}
