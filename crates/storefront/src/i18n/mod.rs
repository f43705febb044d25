//! Customer-facing message tables.
//!
//! Messages are looked up by key (`no-cart-found`, `place-order`) and may
//! carry Fluent-style `{ $name }` placeholders. Keys missing from a locale
//! fall back to `en-US`, then to the key itself.

mod en_us;
mod id_id;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static EN_US: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| en_us::MESSAGES.iter().copied().collect());

static ID_ID: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| id_id::MESSAGES.iter().copied().collect());

/// Supported display locales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    EnUs,
    IdId,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Self; 2] = [Self::EnUs, Self::IdId];

    /// BCP 47 language tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::IdId => "id-ID",
        }
    }

    fn table(self) -> &'static HashMap<&'static str, &'static str> {
        match self {
            Self::EnUs => &EN_US,
            Self::IdId => &ID_ID,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned for an unsupported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}', expected one of: en-US, id-ID")]
pub struct UnsupportedLocale(String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// Resolves message keys for one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Localizer {
    locale: Locale,
}

impl Localizer {
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up a message without placeholder substitution.
    #[must_use]
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        self.locale
            .table()
            .get(key)
            .or_else(|| EN_US.get(key))
            .copied()
            .unwrap_or(key)
    }

    /// Look up a message and substitute `{ $name }` placeholders.
    ///
    /// Placeholders without a matching argument are left as written.
    #[must_use]
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.get(key).to_string();
        for (name, value) in args {
            message = message.replace(&format!("{{ ${name} }}"), value);
        }
        message
    }
}
