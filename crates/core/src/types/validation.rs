//! Tagged validation results with field-level errors.

use std::collections::BTreeMap;

/// Why a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorReason {
    /// The field is absent or blank.
    Missing,
    /// The field is present but malformed.
    Invalid,
}

/// A single field-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub reason: FieldErrorReason,
    /// Localization key of the message to show next to the field.
    pub message_key: &'static str,
}

/// Field errors keyed by field path (`email`, `shipping_address.city`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    /// Record a missing field.
    pub fn missing(&mut self, field: impl Into<String>, message_key: &'static str) {
        self.insert(field, FieldErrorReason::Missing, message_key);
    }

    /// Record a malformed field.
    pub fn invalid(&mut self, field: impl Into<String>, message_key: &'static str) {
        self.insert(field, FieldErrorReason::Invalid, message_key);
    }

    fn insert(&mut self, field: impl Into<String>, reason: FieldErrorReason, message_key: &'static str) {
        self.0.insert(field.into(), FieldError { reason, message_key });
    }

    /// Merge another set of errors as-is.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Merge another set of errors, prefixing their paths.
    pub fn extend_prefixed(&mut self, prefix: &str, other: Self) {
        for (field, error) in other.0 {
            self.0.insert(format!("{prefix}.{field}"), error);
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate errors in field-path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0.iter().map(|(field, error)| (field.as_str(), error))
    }
}

/// Outcome of validating a raw record into `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    Valid(T),
    Invalid { field_errors: FieldErrors },
}

impl<T> Validation<T> {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Convert into a `Result` for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the field errors when validation failed.
    pub fn into_result(self) -> Result<T, FieldErrors> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid { field_errors } => Err(field_errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_prefixed() {
        let mut inner = FieldErrors::default();
        inner.missing("city", "city-is-required");

        let mut outer = FieldErrors::default();
        outer.invalid("email", "please-enter-a-valid-email");
        outer.extend_prefixed("billing_address", inner);

        let fields: Vec<_> = outer.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, ["billing_address.city", "email"]);
        assert_eq!(
            outer.get("email").map(|e| e.reason),
            Some(FieldErrorReason::Invalid)
        );
    }
}
