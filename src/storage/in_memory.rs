//! In-memory implementation of CustomerStore for testing and development

use crate::core::customer::CustomerRecord;
use crate::core::error::{RegistryError, RegistryResult, StorageError};
use crate::core::service::CustomerStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

/// In-memory customer store
///
/// Uses RwLock for thread-safe access. The map key doubles as the unique
/// constraint: a duplicate insert finds an occupied entry under the same
/// write lock.
#[derive(Clone)]
pub struct InMemoryCustomerStore {
    records: Arc<RwLock<HashMap<String, CustomerRecord>>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(e: impl std::fmt::Display) -> RegistryError {
    StorageError::Poisoned {
        message: e.to_string(),
    }
    .into()
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn list(&self) -> RegistryResult<Vec<CustomerRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, tax_id: &str) -> RegistryResult<Option<CustomerRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(tax_id).cloned())
    }

    async fn insert(&self, record: CustomerRecord) -> RegistryResult<CustomerRecord> {
        let mut records = self.records.write().map_err(poisoned)?;

        match records.entry(record.tax_id.clone()) {
            Entry::Occupied(_) => Err(RegistryError::conflict(record.tax_id)),
            Entry::Vacant(slot) => Ok(slot.insert(record).clone()),
        }
    }

    async fn replace(&self, record: CustomerRecord) -> RegistryResult<Option<CustomerRecord>> {
        let mut records = self.records.write().map_err(poisoned)?;

        let Some(existing) = records.get_mut(&record.tax_id) else {
            return Ok(None);
        };
        *existing = record;
        Ok(Some(existing.clone()))
    }

    async fn remove(&self, tax_id: &str) -> RegistryResult<bool> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records.remove(tax_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tax_id: &str, city: &str) -> CustomerRecord {
        CustomerRecord {
            tax_id: tax_id.to_string(),
            legal_name: "Acme Industria Ltda".to_string(),
            trade_name: "Acme".to_string(),
            postal_code: "01310100".to_string(),
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: city.to_string(),
            state_code: "SP".to_string(),
            complement: None,
            email: "contato@acme.com.br".to_string(),
            phone: "11987654321".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryCustomerStore::new();
        store.insert(record("11222333000181", "Recife")).await.unwrap();

        let found = store.get("11222333000181").await.unwrap().unwrap();
        assert_eq!(found.city, "Recife");
        assert!(store.get("11444777000161").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_original() {
        let store = InMemoryCustomerStore::new();
        store.insert(record("11222333000181", "Recife")).await.unwrap();

        let err = store
            .insert(record("11222333000181", "Natal"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Conflict { .. }));

        let found = store.get("11222333000181").await.unwrap().unwrap();
        assert_eq!(found.city, "Recife");
    }

    #[tokio::test]
    async fn test_replace_existing_and_absent() {
        let store = InMemoryCustomerStore::new();
        store.insert(record("11222333000181", "Recife")).await.unwrap();

        let replaced = store.replace(record("11222333000181", "Natal")).await.unwrap();
        assert_eq!(replaced.map(|r| r.city), Some("Natal".to_string()));

        let absent = store.replace(record("11444777000161", "Natal")).await.unwrap();
        assert!(absent.is_none());
        assert!(store.get("11444777000161").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let store = InMemoryCustomerStore::new();
        store.insert(record("11222333000181", "Recife")).await.unwrap();

        assert!(store.remove("11222333000181").await.unwrap());
        assert!(!store.remove("11222333000181").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_inserts_admit_one() {
        let store = InMemoryCustomerStore::new();
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(record("11222333000181", &format!("City {i}")))
                    .await
                    .is_ok()
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
