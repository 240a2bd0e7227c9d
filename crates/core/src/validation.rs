//! Field-level validation helpers shared by the DTOs.
//!
//! Declarative rules live on the DTOs themselves (`#[derive(Validate)]`);
//! this module holds the custom rule functions and the conversion of
//! [`ValidationErrors`] into a flat, serializable list.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// One rejected field, as reported to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flatten validator output into `{field, message}` pairs, sorted by field
/// name so responses are deterministic.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    out
}

/// Join field errors into a single human-readable line.
pub fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build a [`ValidationError`] carrying a message.
pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank"));
    }
    Ok(())
}

/// Digits a stored price may carry after the decimal point.
pub const PRICE_SCALE: u32 = 2;

/// Prices must stay strictly below this magnitude (`NUMERIC(12, 2)`).
pub const PRICE_LIMIT: i64 = 10_000_000_000;

/// Describe why `price` cannot be stored as-is, if it cannot.
pub fn price_problem(price: &Decimal) -> Option<&'static str> {
    if price.is_sign_negative() && !price.is_zero() {
        Some("must not be negative")
    } else if price.normalize().scale() > PRICE_SCALE {
        Some("must have at most 2 decimal places")
    } else if price.abs() >= Decimal::new(PRICE_LIMIT, 0) {
        Some("must be less than 10000000000")
    } else {
        None
    }
}

pub fn valid_price(value: &Decimal) -> Result<(), ValidationError> {
    match price_problem(value) {
        Some(message) => Err(error("range", message)),
        None => Ok(()),
    }
}

/// Check a string's character length against `max`, reporting a violation
/// under `field` in `errors`.
pub fn check_max_len(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    max: usize,
    message: &'static str,
) {
    if value.chars().count() > max {
        errors.add(field, error("length", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("  \t").is_err());
        assert!(not_blank("Galaxy Cat").is_ok());
    }

    #[test]
    fn price_must_not_be_negative() {
        assert!(valid_price(&Decimal::new(-1, 2)).is_err());
        assert!(valid_price(&Decimal::ZERO).is_ok());
        assert!(valid_price(&Decimal::new(1299, 2)).is_ok());
    }

    #[test]
    fn price_must_fit_two_decimal_places() {
        assert_eq!(
            price_problem(&Decimal::new(12345, 3)),
            Some("must have at most 2 decimal places")
        );
        // Trailing zeros do not count.
        assert_eq!(price_problem(&Decimal::new(12300, 3)), None);
    }

    #[test]
    fn price_must_fit_the_column() {
        assert_eq!(
            price_problem(&Decimal::new(100_000_000_000_000, 0)),
            Some("must be less than 10000000000")
        );
        assert_eq!(
            price_problem(&Decimal::new(PRICE_LIMIT, 0)),
            Some("must be less than 10000000000")
        );
        assert_eq!(price_problem(&Decimal::new(999_999_999_999, 2)), None);
    }

    #[test]
    fn field_errors_are_sorted_and_carry_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("upc", error("blank", "must not be blank"));
        errors.add("beer_name", error("length", "too long"));

        let flat = field_errors(&errors);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].field, "beer_name");
        assert_eq!(flat[0].message, "too long");
        assert_eq!(flat[1].field, "upc");
        assert_eq!(summarize(&flat), "beer_name: too long; upc: must not be blank");
    }
}
