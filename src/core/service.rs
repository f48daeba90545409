//! Customer storage trait and the service enforcing the record contract

use crate::core::customer::{CustomerDraft, CustomerRecord};
use crate::core::error::{RegistryError, RegistryResult};
use crate::core::validation;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Persistence for customer records, one row per tax identifier
///
/// Implementations own key uniqueness: `insert` must fail with
/// [`RegistryError::Conflict`] when the key exists, using the backend's
/// own constraint rather than a separate existence check.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All records, in no particular order
    async fn list(&self) -> RegistryResult<Vec<CustomerRecord>>;

    async fn get(&self, tax_id: &str) -> RegistryResult<Option<CustomerRecord>>;

    /// Insert a new record
    async fn insert(&self, record: CustomerRecord) -> RegistryResult<CustomerRecord>;

    /// Replace every non-key field of an existing record
    ///
    /// Returns `None` when no record exists at `record.tax_id`.
    async fn replace(&self, record: CustomerRecord) -> RegistryResult<Option<CustomerRecord>>;

    /// Returns whether a record was removed
    async fn remove(&self, tax_id: &str) -> RegistryResult<bool>;
}

/// Create/read/update/delete over an injected [`CustomerStore`]
///
/// Every write goes through schema validation first.
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    #[instrument(name = "customers.service.list", skip(self))]
    pub async fn list(&self) -> RegistryResult<Vec<CustomerRecord>> {
        let records = self.store.list().await?;
        debug!(count = records.len(), "Listed customers");
        Ok(records)
    }

    #[instrument(name = "customers.service.get", skip(self))]
    pub async fn get(&self, tax_id: &str) -> RegistryResult<CustomerRecord> {
        self.store
            .get(tax_id)
            .await?
            .ok_or_else(|| RegistryError::not_found(tax_id))
    }

    #[instrument(name = "customers.service.create", skip_all, fields(tax_id = ?draft.tax_id))]
    pub async fn create(&self, draft: CustomerDraft) -> RegistryResult<CustomerRecord> {
        let record = validation::validate(&draft)?;
        let created = self.store.insert(record).await?;
        info!(tax_id = %created.tax_id, "Created customer");
        Ok(created)
    }

    /// Replace a record addressed by `tax_id`
    ///
    /// The draft's own `taxId` must equal `tax_id`; a mismatch is a
    /// validation failure and is never silently corrected.
    #[instrument(name = "customers.service.update", skip(self, draft))]
    pub async fn update(
        &self,
        tax_id: &str,
        draft: CustomerDraft,
    ) -> RegistryResult<CustomerRecord> {
        let record = validation::validate_replacement(tax_id, &draft)?;

        let updated = self
            .store
            .replace(record)
            .await?
            .ok_or_else(|| RegistryError::not_found(tax_id))?;
        info!("Updated customer");
        Ok(updated)
    }

    #[instrument(name = "customers.service.delete", skip(self))]
    pub async fn delete(&self, tax_id: &str) -> RegistryResult<()> {
        if !self.store.remove(tax_id).await? {
            return Err(RegistryError::not_found(tax_id));
        }
        info!("Deleted customer");
        Ok(())
    }
}
