//! Shared test harness for customer store backends
//!
//! Provides record fixtures, a stub registry lookup and the macros that
//! generate the per-backend suites.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! customer_store_tests!(InMemoryCustomerStore::new());
//! rest_integration_tests!(InMemoryCustomerStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod rest_tests;
#[macro_use]
pub mod store_contract_tests;

use async_trait::async_trait;
use customer_registry::core::customer::{CustomerDraft, CustomerRecord};
use customer_registry::core::tax_id;
use customer_registry::lookup::{LookupError, LookupKind, RegistryLookup};
use serde_json::{Value, json};

/// Check-digit-valid identifiers used across the suites
pub const ACME_TAX_ID: &str = "11222333000181";
pub const GLOBEX_TAX_ID: &str = "11444777000161";

/// A valid tax identifier derived from `n`
pub fn tax_id_for(n: u32) -> String {
    let base = format!("{:08}0001", 20_000_000 + n);
    let [d1, d2] = tax_id::check_digits(&base).expect("12-digit base");
    format!("{base}{d1}{d2}")
}

pub fn sample_record(tax_id: &str, city: &str) -> CustomerRecord {
    CustomerRecord {
        tax_id: tax_id.to_string(),
        legal_name: "Acme Industria Ltda".to_string(),
        trade_name: "Acme".to_string(),
        postal_code: "01310100".to_string(),
        street: "Avenida Paulista".to_string(),
        neighborhood: "Bela Vista".to_string(),
        city: city.to_string(),
        state_code: "SP".to_string(),
        complement: Some("Conjunto 12".to_string()),
        email: "contato@acme.com.br".to_string(),
        phone: "11987654321".to_string(),
    }
}

pub fn sample_draft(tax_id: &str) -> CustomerDraft {
    sample_record(tax_id, "Sao Paulo").into()
}

/// JSON body as the form would submit it
pub fn sample_json(tax_id: &str) -> Value {
    json!({
        "taxId": tax_id,
        "legalName": "Acme Industria Ltda",
        "tradeName": "Acme",
        "postalCode": "01310100",
        "street": "Avenida Paulista",
        "neighborhood": "Bela Vista",
        "city": "Sao Paulo",
        "stateCode": "SP",
        "complement": "Conjunto 12",
        "email": "contato@acme.com.br",
        "phone": "11987654321"
    })
}

/// Canned registry answers, keyed by the values used in the suites
pub struct StubLookup;

#[async_trait]
impl RegistryLookup for StubLookup {
    async fn tax_id(&self, tax_id: &str) -> Result<Value, LookupError> {
        customer_registry::lookup::check_key(LookupKind::TaxId, tax_id)?;
        match tax_id {
            ACME_TAX_ID => Ok(json!({
                "status": "OK",
                "nome": "ACME INDUSTRIA LTDA",
                "fantasia": "ACME",
                "cep": "01.310-100",
                "uf": "SP"
            })),
            GLOBEX_TAX_ID => Err(LookupError::Timeout {
                kind: LookupKind::TaxId,
            }),
            _ => Ok(json!({"status": "ERROR", "message": "CNPJ invalido"})),
        }
    }

    async fn postal_code(&self, postal_code: &str) -> Result<Value, LookupError> {
        customer_registry::lookup::check_key(LookupKind::PostalCode, postal_code)?;
        match postal_code {
            "01310100" => Ok(json!({
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "Sao Paulo",
                "uf": "SP"
            })),
            "00000000" => Err(LookupError::UpstreamStatus {
                kind: LookupKind::PostalCode,
                status: 500,
            }),
            _ => Ok(json!({"erro": true})),
        }
    }
}

pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}
