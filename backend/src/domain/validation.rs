//! Field validation helpers shared by the request DTOs.
//!
//! All helpers return [`Error::Validation`] naming the offending field, so
//! the transport can point the caller at the exact input to fix.

use rust_decimal::Decimal;

use super::error::{DomainResult, Error};

/// Character count of `value`, counting scalar values rather than bytes.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Require a trimmed, non-empty value within `min..=max` characters.
pub(crate) fn require_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    let len = char_len(value);
    if len < min {
        return Err(Error::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(Error::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Require a value of at most `max` characters; empty is acceptable.
pub(crate) fn require_max_len(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    if char_len(value) > max {
        return Err(Error::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Require a strictly positive amount.
pub(crate) fn require_positive(field: &'static str, value: Decimal) -> DomainResult<()> {
    if value <= Decimal::ZERO {
        return Err(Error::validation(field, "must be a positive amount"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(require_len("name", "ab", 2, 2).is_ok());
        assert!(require_len("name", "a", 2, 2).is_err());
        assert!(require_len("name", "abc", 2, 2).is_err());
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let err = require_len("name", "   ", 1, 10).expect_err("rejected");
        assert!(matches!(err, Error::Validation { field, .. } if field == "name"));
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        // Four characters, more than four bytes.
        assert!(require_max_len("description", "çêñt", 4).is_ok());
    }

    #[test]
    fn zero_is_not_a_positive_amount() {
        assert!(require_positive("price", Decimal::ZERO).is_err());
        assert!(require_positive("price", Decimal::new(-1, 2)).is_err());
        assert!(require_positive("price", Decimal::new(199, 2)).is_ok());
    }
}
