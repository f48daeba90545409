//! Customer schema validation
//!
//! The rules are declared once, as derive attributes on
//! [`CustomerDraft`], and evaluated here. The server runs them before
//! persisting and the client side runs them before submitting, so both
//! ends report the same field-addressed messages.

pub mod extractor;
pub mod validators;

pub use extractor::CustomerPayload;

use crate::core::customer::{CustomerDraft, CustomerField, CustomerRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// A single violated rule, addressed by field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: CustomerField,
    pub message: String,
}

/// Every rule violation found in a draft, in canonical field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: CustomerField, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Fields with at least one violation, without repeats
    pub fn fields(&self) -> Vec<CustomerField> {
        let mut fields: Vec<CustomerField> = self.0.iter().map(|e| e.field).collect();
        fields.dedup();
        fields
    }

    /// First message reported for `field`
    pub fn first(&self, field: CustomerField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn sort(&mut self) {
        // stable: keeps rule order within a field
        self.0.sort_by_key(|e| e.field);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (name, errs) in errors.field_errors() {
            let Some(field) = CustomerField::from_name(&name) else {
                continue;
            };
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(field, message);
            }
        }
        out.sort();
        out
    }
}

/// Checks a draft against every customer rule
///
/// Returns the typed record only when all rules pass, including the tax
/// identifier check digits. Otherwise every violation is returned, not
/// just the first.
pub fn validate(draft: &CustomerDraft) -> Result<CustomerRecord, FieldErrors> {
    draft.validate().map_err(FieldErrors::from)?;

    let required = |field: CustomerField| -> Result<String, FieldErrors> {
        draft.get(field).map(str::to_owned).ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.push(field, "is required");
            errors
        })
    };

    Ok(CustomerRecord {
        tax_id: required(CustomerField::TaxId)?,
        legal_name: required(CustomerField::LegalName)?,
        trade_name: required(CustomerField::TradeName)?,
        postal_code: required(CustomerField::PostalCode)?,
        street: required(CustomerField::Street)?,
        neighborhood: required(CustomerField::Neighborhood)?,
        city: required(CustomerField::City)?,
        state_code: required(CustomerField::StateCode)?,
        complement: draft.complement.clone(),
        email: required(CustomerField::Email)?,
        phone: required(CustomerField::Phone)?,
    })
}

/// Checks a draft meant to replace the record stored at `tax_id`
///
/// Besides every customer rule, the draft's own tax ID must equal the
/// key it is stored under. A record's key never changes.
pub fn validate_replacement(
    tax_id: &str,
    draft: &CustomerDraft,
) -> Result<CustomerRecord, FieldErrors> {
    let record = validate(draft)?;
    if record.tax_id != tax_id {
        let mut errors = FieldErrors::new();
        errors.push(CustomerField::TaxId, KEY_MISMATCH);
        return Err(errors);
    }
    Ok(record)
}

const KEY_MISMATCH: &str = "must match the identifier in the request path";
