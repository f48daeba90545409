//! Field validators that the derive attributes can't express
//!
//! These are referenced from the `#[validate(custom(...))]` attributes on
//! [`CustomerDraft`](crate::core::customer::CustomerDraft).

use crate::core::tax_id;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

fn tax_id_shape() -> &'static Regex {
    static TAX_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    TAX_ID_REGEX.get_or_init(|| Regex::new(r"^[0-9]{14}$").unwrap())
}

fn postal_code_shape() -> &'static Regex {
    static POSTAL_CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    POSTAL_CODE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{8}$").unwrap())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Validator: exactly 14 digits with matching check digits
pub fn validate_tax_id(value: &str) -> Result<(), ValidationError> {
    if !tax_id_shape().is_match(value) {
        return Err(invalid("tax_id_digits", "must contain exactly 14 digits"));
    }
    if !tax_id::is_valid(value) {
        return Err(invalid("tax_id_checksum", "has invalid check digits"));
    }
    Ok(())
}

/// Validator: exactly 8 digits
pub fn validate_postal_code(value: &str) -> Result<(), ValidationError> {
    if postal_code_shape().is_match(value) {
        Ok(())
    } else {
        Err(invalid(
            "postal_code_digits",
            "must contain exactly 8 digits",
        ))
    }
}

/// Shape check used before forwarding a tax identifier to a registry
pub fn is_tax_id_shaped(value: &str) -> bool {
    tax_id_shape().is_match(value)
}

/// Shape check used before forwarding a postal code to a registry
pub fn is_postal_code_shaped(value: &str) -> bool {
    postal_code_shape().is_match(value)
}
