//! Newtype IDs for type-safe entity references.
//!
//! Medusa identifies every entity with a prefixed string (`cart_01H...`,
//! `order_01H...`, `pp_stripe_stripe`). Use the `define_id!` macro to create
//! wrappers that prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_str()`, `into_inner()` and the conventional Medusa `PREFIX`
/// - `From<String>`, `From<&str>` and `Display`
///
/// # Example
///
/// ```rust
/// # use medusa_storefront_core::define_id;
/// define_id!(WishlistId, "wl_");
///
/// let id = WishlistId::new("wl_123");
/// assert_eq!(id.as_str(), "wl_123");
/// assert!(id.has_expected_prefix());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix Medusa uses for this entity type.
            pub const PREFIX: &'static str = $prefix;

            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the ID carries the prefix Medusa issues for this entity.
            #[must_use]
            pub fn has_expected_prefix(&self) -> bool {
                self.0.starts_with(Self::PREFIX)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(CartId, "cart_");
define_id!(LineItemId, "cali_");
define_id!(OrderId, "order_");
define_id!(ProductId, "prod_");
define_id!(VariantId, "variant_");
define_id!(CollectionId, "pcol_");
define_id!(RegionId, "reg_");
define_id!(CustomerId, "cus_");
define_id!(AddressId, "caaddr_");
define_id!(ShippingOptionId, "so_");
define_id!(PaymentCollectionId, "pay_col_");
define_id!(PaymentSessionId, "payses_");
define_id!(PaymentProviderId, "pp_");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = CartId::new("cart_01HXYZ");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cart_01HXYZ\"");

        let parsed: CartId = serde_json::from_str("\"cart_01HXYZ\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_prefix_check() {
        assert!(PaymentProviderId::from("pp_stripe_stripe").has_expected_prefix());
        assert!(!OrderId::from("cart_123").has_expected_prefix());
    }
}
