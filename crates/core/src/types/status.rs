//! Status enums for orders and payments.
//!
//! Values mirror the snake_case strings the Medusa store API returns.

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Statuses the API may add later deserialize as [`FulfillmentStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    #[default]
    NotFulfilled,
    PartiallyFulfilled,
    Fulfilled,
    PartiallyShipped,
    Shipped,
    PartiallyDelivered,
    Delivered,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl FulfillmentStatus {
    /// Localization key used to display this status.
    #[must_use]
    pub const fn display_key(self) -> &'static str {
        match self {
            Self::NotFulfilled | Self::Unknown => "not-fulfilled",
            Self::PartiallyFulfilled => "partially-fulfilled",
            Self::Fulfilled => "fulfilled",
            Self::PartiallyShipped => "partially-shipped",
            Self::Shipped => "shipped",
            Self::PartiallyDelivered => "partially-delivered",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }
}

/// Order payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    NotPaid,
    Awaiting,
    Authorized,
    PartiallyAuthorized,
    Captured,
    PartiallyCaptured,
    PartiallyRefunded,
    Refunded,
    Canceled,
    RequiresAction,
    #[serde(other)]
    Unknown,
}

/// Lifecycle status of a single payment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSessionStatus {
    #[default]
    Pending,
    RequiresMore,
    Authorized,
    Captured,
    Error,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PaymentSessionStatus {
    /// Whether the session can still be used to pay for the cart.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::RequiresMore | Self::Authorized)
    }
}
