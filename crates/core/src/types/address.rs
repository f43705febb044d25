//! Postal addresses and their required-field validation.
//!
//! [`AddressDraft`] is the raw, possibly partial record as it arrives from a
//! form or from a cart; [`Address::validate`] turns it into a normalized
//! [`Address`] or reports every required field that is missing.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::validation::{FieldErrors, Validation};

/// An address-shaped record whose fields may be absent or blank.
///
/// Unknown fields (ids, metadata, timestamps on cart addresses) are ignored
/// when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub province: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

impl From<&Address> for AddressDraft {
    fn from(address: &Address) -> Self {
        Self {
            first_name: Some(address.first_name.clone()),
            last_name: Some(address.last_name.clone()),
            company: address.company.clone(),
            address_1: Some(address.address_1.clone()),
            address_2: address.address_2.clone(),
            city: Some(address.city.clone()),
            postal_code: Some(address.postal_code.clone()),
            province: address.province.clone(),
            country_code: Some(address.country_code.clone()),
            phone: Some(address.phone.clone()),
        }
    }
}

/// Fields of an address that take part in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressField {
    FirstName,
    LastName,
    Address1,
    City,
    PostalCode,
    CountryCode,
    Phone,
}

impl AddressField {
    /// Fields that must be non-empty for an address to validate.
    pub const REQUIRED: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Address1,
        Self::City,
        Self::PostalCode,
        Self::CountryCode,
        Self::Phone,
    ];

    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Address1 => "address_1",
            Self::City => "city",
            Self::PostalCode => "postal_code",
            Self::CountryCode => "country_code",
            Self::Phone => "phone",
        }
    }

    /// Localization key of the "is required" message.
    #[must_use]
    pub const fn required_message_key(self) -> &'static str {
        match self {
            Self::FirstName => "first-name-is-required",
            Self::LastName => "last-name-is-required",
            Self::Address1 => "address-is-required",
            Self::City => "city-is-required",
            Self::PostalCode => "postal-code-is-required",
            Self::CountryCode => "country-is-required",
            Self::Phone => "phone-is-required",
        }
    }

    fn value(self, draft: &AddressDraft) -> Option<&str> {
        let value = match self {
            Self::FirstName => &draft.first_name,
            Self::LastName => &draft.last_name,
            Self::Address1 => &draft.address_1,
            Self::City => &draft.city,
            Self::PostalCode => &draft.postal_code,
            Self::CountryCode => &draft.country_code,
            Self::Phone => &draft.phone,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated postal address.
///
/// Required fields are non-empty and trimmed; optional fields are `None`
/// rather than blank. Country codes are lowercase, as Medusa stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub address_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,
    pub city: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    pub country_code: String,
    pub phone: String,
}

impl Address {
    /// Validate a draft against the required-field rules.
    ///
    /// Every missing required field is reported, keyed by its wire name.
    #[must_use]
    pub fn validate(draft: &AddressDraft) -> Validation<Self> {
        let mut errors = FieldErrors::default();
        for field in AddressField::REQUIRED {
            if field.value(draft).is_none() {
                errors.missing(field.as_str(), field.required_message_key());
            }
        }
        if !errors.is_empty() {
            return Validation::Invalid {
                field_errors: errors,
            };
        }

        let required = |field: AddressField| field.value(draft).unwrap_or_default().to_string();
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Validation::Valid(Self {
            first_name: required(AddressField::FirstName),
            last_name: required(AddressField::LastName),
            company: optional(&draft.company),
            address_1: required(AddressField::Address1),
            address_2: optional(&draft.address_2),
            city: required(AddressField::City),
            postal_code: required(AddressField::PostalCode),
            province: optional(&draft.province),
            country_code: required(AddressField::CountryCode).to_ascii_lowercase(),
            phone: required(AddressField::Phone),
        })
    }

    /// Full name for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
