//! Customer record model

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use super::validation::validators::{validate_postal_code, validate_tax_id};

/// A company customer, keyed by its tax identifier
///
/// Instances are only produced by schema validation (or read back from a
/// store that was written through it), so every field satisfies the
/// record constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub tax_id: String,
    pub legal_name: String,
    pub trade_name: String,
    pub postal_code: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub email: String,
    pub phone: String,
}

/// Unvalidated customer input as submitted by a form or API caller
///
/// The validation rules are declared here once and shared by the server
/// and the client side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[validate(
        required(message = "is required"),
        custom(function = "validate_tax_id")
    )]
    pub tax_id: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 3, max = 100, message = "must be between 3 and 100 characters")
    )]
    pub legal_name: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 3, max = 100, message = "must be between 3 and 100 characters")
    )]
    pub trade_name: Option<String>,

    #[validate(
        required(message = "is required"),
        custom(function = "validate_postal_code")
    )]
    pub postal_code: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 3, max = 100, message = "must be between 3 and 100 characters")
    )]
    pub street: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 3, max = 100, message = "must be between 3 and 100 characters")
    )]
    pub neighborhood: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 3, max = 100, message = "must be between 3 and 100 characters")
    )]
    pub city: Option<String>,

    #[validate(
        required(message = "is required"),
        length(equal = 2, message = "must be exactly 2 characters")
    )]
    pub state_code: Option<String>,

    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub complement: Option<String>,

    #[validate(
        required(message = "is required"),
        email(message = "must be a valid email address"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 10, max = 15, message = "must be between 10 and 15 characters")
    )]
    pub phone: Option<String>,
}

impl CustomerDraft {
    /// Reads the current value of a field
    pub fn get(&self, field: CustomerField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Replaces the value of a field
    pub fn set(&mut self, field: CustomerField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    fn slot(&self, field: CustomerField) -> &Option<String> {
        match field {
            CustomerField::TaxId => &self.tax_id,
            CustomerField::LegalName => &self.legal_name,
            CustomerField::TradeName => &self.trade_name,
            CustomerField::PostalCode => &self.postal_code,
            CustomerField::Street => &self.street,
            CustomerField::Neighborhood => &self.neighborhood,
            CustomerField::City => &self.city,
            CustomerField::StateCode => &self.state_code,
            CustomerField::Complement => &self.complement,
            CustomerField::Email => &self.email,
            CustomerField::Phone => &self.phone,
        }
    }

    fn slot_mut(&mut self, field: CustomerField) -> &mut Option<String> {
        match field {
            CustomerField::TaxId => &mut self.tax_id,
            CustomerField::LegalName => &mut self.legal_name,
            CustomerField::TradeName => &mut self.trade_name,
            CustomerField::PostalCode => &mut self.postal_code,
            CustomerField::Street => &mut self.street,
            CustomerField::Neighborhood => &mut self.neighborhood,
            CustomerField::City => &mut self.city,
            CustomerField::StateCode => &mut self.state_code,
            CustomerField::Complement => &mut self.complement,
            CustomerField::Email => &mut self.email,
            CustomerField::Phone => &mut self.phone,
        }
    }
}

impl From<CustomerRecord> for CustomerDraft {
    fn from(record: CustomerRecord) -> Self {
        Self {
            tax_id: Some(record.tax_id),
            legal_name: Some(record.legal_name),
            trade_name: Some(record.trade_name),
            postal_code: Some(record.postal_code),
            street: Some(record.street),
            neighborhood: Some(record.neighborhood),
            city: Some(record.city),
            state_code: Some(record.state_code),
            complement: record.complement,
            email: Some(record.email),
            phone: Some(record.phone),
        }
    }
}

/// The fields of a customer record, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerField {
    TaxId,
    LegalName,
    TradeName,
    PostalCode,
    Street,
    Neighborhood,
    City,
    StateCode,
    Complement,
    Email,
    Phone,
}

impl CustomerField {
    /// Every field, in canonical order
    pub const ALL: [CustomerField; 11] = [
        CustomerField::TaxId,
        CustomerField::LegalName,
        CustomerField::TradeName,
        CustomerField::PostalCode,
        CustomerField::Street,
        CustomerField::Neighborhood,
        CustomerField::City,
        CustomerField::StateCode,
        CustomerField::Complement,
        CustomerField::Email,
        CustomerField::Phone,
    ];

    /// Name used in JSON bodies
    pub fn json_name(self) -> &'static str {
        match self {
            CustomerField::TaxId => "taxId",
            CustomerField::LegalName => "legalName",
            CustomerField::TradeName => "tradeName",
            CustomerField::PostalCode => "postalCode",
            CustomerField::Street => "street",
            CustomerField::Neighborhood => "neighborhood",
            CustomerField::City => "city",
            CustomerField::StateCode => "stateCode",
            CustomerField::Complement => "complement",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
        }
    }

    /// Name of the struct member (as reported by the derive-based validator)
    pub fn member_name(self) -> &'static str {
        match self {
            CustomerField::TaxId => "tax_id",
            CustomerField::LegalName => "legal_name",
            CustomerField::TradeName => "trade_name",
            CustomerField::PostalCode => "postal_code",
            CustomerField::Street => "street",
            CustomerField::Neighborhood => "neighborhood",
            CustomerField::City => "city",
            CustomerField::StateCode => "state_code",
            CustomerField::Complement => "complement",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
        }
    }

    /// Resolves either the JSON name or the member name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.json_name() == name || f.member_name() == name)
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_name())
    }
}
