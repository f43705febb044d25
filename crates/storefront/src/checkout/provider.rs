//! What the storefront knows about each payment provider.

use std::collections::HashMap;

use medusa_storefront_core::PaymentProviderId;

/// Provider-specific flows driven outside the checkout step machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalFlow {
    /// Card entry handled by Stripe's payment sheet.
    Stripe,
}

/// Display and routing details for one payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDetails {
    pub name: String,
    /// Whether paying needs a step outside the storefront (redirect, sheet).
    pub has_external_step: bool,
    /// The implemented flow for that step, if any.
    pub external_flow: Option<ExternalFlow>,
}

/// Lookup table from provider id to [`ProviderDetails`].
#[derive(Debug, Clone)]
pub struct PaymentProviderCatalog {
    providers: HashMap<PaymentProviderId, ProviderDetails>,
}

impl Default for PaymentProviderCatalog {
    fn default() -> Self {
        Self::empty()
            .with_provider(
                PaymentProviderId::new("pp_stripe_stripe"),
                ProviderDetails {
                    name: "Stripe".to_string(),
                    has_external_step: true,
                    external_flow: Some(ExternalFlow::Stripe),
                },
            )
            .with_provider(
                PaymentProviderId::new("pp_system_default"),
                ProviderDetails {
                    name: "Manual Payment".to_string(),
                    has_external_step: false,
                    external_flow: None,
                },
            )
    }
}

impl PaymentProviderCatalog {
    /// A catalog with no providers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Add or replace a provider.
    #[must_use]
    pub fn with_provider(mut self, id: PaymentProviderId, details: ProviderDetails) -> Self {
        self.providers.insert(id, details);
        self
    }

    #[must_use]
    pub fn get(&self, id: &PaymentProviderId) -> Option<&ProviderDetails> {
        self.providers.get(id)
    }

    /// Display name, falling back to the raw id for unknown providers.
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a PaymentProviderId) -> &'a str {
        self.get(id).map_or(id.as_str(), |details| details.name.as_str())
    }

    /// Whether paying with `id` needs an external step.
    #[must_use]
    pub fn has_external_step(&self, id: &PaymentProviderId) -> bool {
        self.get(id).is_some_and(|details| details.has_external_step)
    }
}
