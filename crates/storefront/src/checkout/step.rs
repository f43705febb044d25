//! Checkout steps and the cursor over them.

use std::fmt;

use crate::medusa::Cart;

/// One step of checkout, in the order they are completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckoutStep {
    Address,
    Delivery,
    Payment,
    Review,
}

impl CheckoutStep {
    /// All steps in order.
    pub const ALL: [Self; 4] = [Self::Address, Self::Delivery, Self::Payment, Self::Review];

    /// Position of this step, starting at 0.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Address => 0,
            Self::Delivery => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }

    /// The step after this one, `None` for review.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Address => Some(Self::Delivery),
            Self::Delivery => Some(Self::Payment),
            Self::Payment => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// Localization key of the step title.
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Delivery => "delivery",
            Self::Payment => "payment",
            Self::Review => "review",
        }
    }

    /// The first step the cart has not completed yet.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let has_email = cart.email.as_deref().is_some_and(|e| !e.trim().is_empty());
        if !has_email || cart.shipping_address.is_none() {
            Self::Address
        } else if cart.shipping_methods.is_empty() {
            Self::Delivery
        } else if cart.active_payment_session().is_none() {
            Self::Payment
        } else {
            Self::Review
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title_key())
    }
}

/// Cursor over [`CheckoutStep`]s.
///
/// Moves forward one step at a time; jumps are only allowed backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
    current: CheckoutStep,
}

impl StepSequencer {
    #[must_use]
    pub const fn new(initial: CheckoutStep) -> Self {
        Self { current: initial }
    }

    #[must_use]
    pub const fn current(&self) -> CheckoutStep {
        self.current
    }

    /// Move to the next step. No-op on the last step.
    pub fn advance(&mut self) -> CheckoutStep {
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        self.current
    }

    /// Jump back to an earlier step.
    ///
    /// Returns `false` and leaves the cursor unchanged unless `target` comes
    /// strictly before the current step.
    pub fn jump_to(&mut self, target: CheckoutStep) -> bool {
        if target.index() < self.current.index() {
            self.current = target;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_advance_stops_at_review() {
        let mut seq = StepSequencer::new(CheckoutStep::Address);
        assert_eq!(seq.advance(), CheckoutStep::Delivery);
        assert_eq!(seq.advance(), CheckoutStep::Payment);
        assert_eq!(seq.advance(), CheckoutStep::Review);
        assert_eq!(seq.advance(), CheckoutStep::Review);
    }

    #[test]
    fn test_jump_to_only_backwards() {
        for from in CheckoutStep::ALL {
            for to in CheckoutStep::ALL {
                let mut seq = StepSequencer::new(from);
                let moved = seq.jump_to(to);
                assert_eq!(moved, to.index() < from.index(), "{from} -> {to}");
                assert_eq!(seq.current(), if moved { to } else { from });
            }
        }
    }

    #[test]
    fn test_from_cart() {
        let mut cart: Cart = serde_json::from_value(json!({
            "id": "cart_1",
            "currency_code": "usd",
            "items": [{"id": "cali_1", "title": "Tee", "quantity": 1, "unit_price": 10}]
        }))
        .unwrap();
        assert_eq!(CheckoutStep::from_cart(&cart), CheckoutStep::Address);

        cart.email = Some("a@b.com".into());
        cart.shipping_address = Some(medusa_storefront_core::AddressDraft::default());
        assert_eq!(CheckoutStep::from_cart(&cart), CheckoutStep::Delivery);

        cart.shipping_methods = serde_json::from_value(
            json!([{"id": "casm_1", "name": "Standard", "amount": 5}]),
        )
        .unwrap();
        assert_eq!(CheckoutStep::from_cart(&cart), CheckoutStep::Payment);

        cart.payment_collection = serde_json::from_value(json!({
            "id": "pay_col_1",
            "payment_sessions": [{"id": "payses_1", "provider_id": "pp_system_default", "status": "pending"}]
        }))
        .unwrap();
        assert_eq!(CheckoutStep::from_cart(&cart), CheckoutStep::Review);
    }
}
