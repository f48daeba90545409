//! Create/edit form state, independent of any UI toolkit
//!
//! The form owns the draft being edited, the inline error per field and
//! the bookkeeping that lets registry lookups run as separate tasks:
//! each lookup carries a ticket, and an answer whose key field has been
//! edited in the meantime is discarded.

use crate::client::{ClientError, CustomerClient};
use crate::core::customer::{CustomerDraft, CustomerField, CustomerRecord};
use crate::core::error::LookupKind;
use crate::core::tax_id;
use crate::core::validation::{self, FieldErrors};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Whether the form creates a record or edits the one at `tax_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { tax_id: String },
}

/// Proof that a lookup was started for a given key value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub kind: LookupKind,
    pub key: String,
    generation: u64,
}

/// What [`CustomerForm::apply_lookup`] did with an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Fields were filled from the registry answer
    Applied(Vec<CustomerField>),
    /// The registry had nothing for this key
    NoEnrichment,
    /// The key field changed after the lookup started
    Stale,
    /// The lookup failed; the form is untouched
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CustomerForm {
    mode: FormMode,
    draft: CustomerDraft,
    errors: BTreeMap<CustomerField, String>,
    tax_id_generation: u64,
    postal_code_generation: u64,
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerForm {
    /// Empty form in create mode
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CustomerDraft::default(),
            errors: BTreeMap::new(),
            tax_id_generation: 0,
            postal_code_generation: 0,
        }
    }

    /// Form pre-filled from `record`, editing the record at its tax ID
    pub fn edit(record: CustomerRecord) -> Self {
        Self {
            mode: FormMode::Edit {
                tax_id: record.tax_id.clone(),
            },
            draft: record.into(),
            ..Self::new()
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &CustomerDraft {
        &self.draft
    }

    pub fn value(&self, field: CustomerField) -> Option<&str> {
        self.draft.get(field)
    }

    /// Inline error for `field` from the last [`validate`](Self::validate)
    pub fn error(&self, field: CustomerField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Record user input
    ///
    /// Tax ID and postal code keep only their digits. Blank input clears
    /// the field. Editing a field drops its inline error.
    pub fn set_field(&mut self, field: CustomerField, input: &str) {
        let value = match field {
            CustomerField::TaxId | CustomerField::PostalCode => tax_id::strip(input),
            _ => input.trim().to_string(),
        };
        let value = (!value.is_empty()).then_some(value);

        if self.draft.get(field) != value.as_deref() {
            match field {
                CustomerField::TaxId => self.tax_id_generation += 1,
                CustomerField::PostalCode => self.postal_code_generation += 1,
                _ => {}
            }
        }
        self.draft.set(field, value);
        self.errors.remove(&field);
    }

    /// Run the customer schema and refresh the inline errors
    ///
    /// In edit mode the tax ID must also stay the one being edited.
    /// Returns the record when every rule passes.
    pub fn validate(&mut self) -> Option<CustomerRecord> {
        self.check().ok()
    }

    fn check(&mut self) -> Result<CustomerRecord, FieldErrors> {
        self.errors.clear();
        let checked = match &self.mode {
            FormMode::Create => validation::validate(&self.draft),
            FormMode::Edit { tax_id } => validation::validate_replacement(tax_id, &self.draft),
        };
        checked.inspect_err(|errors| self.show_errors(errors))
    }

    fn show_errors(&mut self, errors: &FieldErrors) {
        for error in errors.iter() {
            self.errors
                .entry(error.field)
                .or_insert_with(|| error.message.clone());
        }
    }

    /// Start a lookup keyed by the current tax ID or postal code
    ///
    /// `None` when the key field is empty.
    pub fn begin_lookup(&self, kind: LookupKind) -> Option<LookupTicket> {
        let (field, generation) = match kind {
            LookupKind::TaxId => (CustomerField::TaxId, self.tax_id_generation),
            LookupKind::PostalCode => (CustomerField::PostalCode, self.postal_code_generation),
        };
        let key = self.draft.get(field)?.to_string();
        Some(LookupTicket {
            kind,
            key,
            generation,
        })
    }

    /// Fold a lookup answer into the form
    pub fn apply_lookup<E: std::fmt::Display>(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Value, E>,
    ) -> LookupOutcome {
        let current = match ticket.kind {
            LookupKind::TaxId => self.tax_id_generation,
            LookupKind::PostalCode => self.postal_code_generation,
        };
        if current != ticket.generation {
            debug!(kind = %ticket.kind, key = %ticket.key, "Discarding stale lookup answer");
            return LookupOutcome::Stale;
        }

        let answer = match result {
            Ok(answer) => answer,
            Err(e) => return LookupOutcome::Failed(e.to_string()),
        };

        let updates = match ticket.kind {
            LookupKind::TaxId => company_fields(&answer),
            LookupKind::PostalCode => address_fields(&answer),
        };
        let Some(updates) = updates else {
            return LookupOutcome::NoEnrichment;
        };

        let mut applied = Vec::with_capacity(updates.len());
        for (field, value) in updates {
            self.set_field(field, &value);
            applied.push(field);
        }
        LookupOutcome::Applied(applied)
    }

    /// Validate, then create or update through `client`
    ///
    /// Nothing is sent while the draft has errors.
    pub async fn submit(&mut self, client: &CustomerClient) -> Result<CustomerRecord, ClientError> {
        self.check().map_err(ClientError::Invalid)?;

        let saved = match &self.mode {
            FormMode::Create => client.create(&self.draft).await,
            FormMode::Edit { tax_id } => client.update(tax_id, &self.draft).await,
        };

        match saved {
            Ok(record) => {
                self.mode = FormMode::Edit {
                    tax_id: record.tax_id.clone(),
                };
                Ok(record)
            }
            Err(ClientError::Invalid(errors)) => {
                self.show_errors(&errors);
                Err(ClientError::Invalid(errors))
            }
            Err(e) => Err(e),
        }
    }
}

/// Non-empty string members of a registry answer
fn text<'a>(answer: &'a Value, key: &str) -> Option<&'a str> {
    answer
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn collect(answer: &Value, mapping: &[(&str, CustomerField)]) -> Vec<(CustomerField, String)> {
    mapping
        .iter()
        .filter_map(|(key, field)| text(answer, key).map(|v| (*field, v.to_string())))
        .collect()
}

/// Company registry answer; only usable when it names the company
fn company_fields(answer: &Value) -> Option<Vec<(CustomerField, String)>> {
    text(answer, "nome")?;
    Some(collect(
        answer,
        &[
            ("nome", CustomerField::LegalName),
            ("fantasia", CustomerField::TradeName),
            ("cep", CustomerField::PostalCode),
            ("logradouro", CustomerField::Street),
            ("bairro", CustomerField::Neighborhood),
            ("municipio", CustomerField::City),
            ("uf", CustomerField::StateCode),
            ("email", CustomerField::Email),
            ("telefone", CustomerField::Phone),
        ],
    ))
}

/// Postal code answer; `erro` marks an unknown code
fn address_fields(answer: &Value) -> Option<Vec<(CustomerField, String)>> {
    let unknown = answer
        .get("erro")
        .is_some_and(|e| !e.is_null() && e.as_bool() != Some(false));
    if !answer.is_object() || unknown {
        return None;
    }
    Some(collect(
        answer,
        &[
            ("logradouro", CustomerField::Street),
            ("bairro", CustomerField::Neighborhood),
            ("localidade", CustomerField::City),
            ("uf", CustomerField::StateCode),
        ],
    ))
}
