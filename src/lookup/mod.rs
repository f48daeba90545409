//! Registry lookups used to pre-fill customer forms
//!
//! Both lookups are read-only passthroughs: the registry's JSON answer is
//! handed back untouched and nothing is persisted. Callers treat any
//! failure as "no enrichment available".

pub mod http;

pub use crate::core::error::{LookupError, LookupKind};
pub use http::{HttpRegistryLookup, LookupSettings};

use crate::core::validation::validators::{is_postal_code_shaped, is_tax_id_shaped};
use async_trait::async_trait;
use serde_json::Value;

/// Third-party registries resolving a tax ID or a postal code
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    /// Company registry answer for a 14-digit tax identifier
    async fn tax_id(&self, tax_id: &str) -> Result<Value, LookupError>;

    /// Address fragment for an 8-digit postal code
    async fn postal_code(&self, postal_code: &str) -> Result<Value, LookupError>;

    /// Dispatch on `kind`
    async fn lookup(&self, kind: LookupKind, key: &str) -> Result<Value, LookupError> {
        match kind {
            LookupKind::TaxId => self.tax_id(key).await,
            LookupKind::PostalCode => self.postal_code(key).await,
        }
    }
}

/// Rejects keys the registries could never resolve
pub fn check_key(kind: LookupKind, key: &str) -> Result<(), LookupError> {
    let shaped = match kind {
        LookupKind::TaxId => is_tax_id_shaped(key),
        LookupKind::PostalCode => is_postal_code_shaped(key),
    };
    if shaped {
        Ok(())
    } else {
        Err(LookupError::InvalidKey {
            kind,
            value: key.to_string(),
        })
    }
}
