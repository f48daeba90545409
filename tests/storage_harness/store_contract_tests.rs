//! Macro-generated test suite for `CustomerStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use customer_registry::storage::InMemoryCustomerStore;
//!
//! customer_store_tests!(InMemoryCustomerStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_insert_and_get` — insert then retrieve, every field preserved
//! - `test_get_nonexistent` — unknown key returns None
//! - `test_list_empty` / `test_list_multiple`
//! - `test_insert_duplicate_conflicts` — second insert fails, first kept
//! - `test_replace_existing` / `test_replace_nonexistent`
//! - `test_remove_existing` / `test_remove_nonexistent`
//! - `test_concurrent_duplicate_inserts` — exactly one of N racing inserts wins

/// Generate a full `CustomerStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated
/// for each test. The concurrency test also needs `Clone + 'static`.
#[macro_export]
macro_rules! customer_store_tests {
    ($factory:expr) => {
        mod customer_store_contract_tests {
            use super::*;
            use customer_registry::core::error::RegistryError;
            use customer_registry::core::service::CustomerStore;

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let record = sample_record(ACME_TAX_ID, "Recife");

                let created = store.insert(record.clone()).await.unwrap();
                assert_eq!(created, record);

                let retrieved = store.get(ACME_TAX_ID).await.unwrap();
                assert_eq!(retrieved, Some(record));
            }

            #[tokio::test]
            async fn test_optional_complement_round_trips() {
                let store = $factory;
                let mut record = sample_record(ACME_TAX_ID, "Recife");
                record.complement = None;

                store.insert(record.clone()).await.unwrap();
                let retrieved = store.get(ACME_TAX_ID).await.unwrap().unwrap();
                assert_eq!(retrieved.complement, None);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert!(store.get(GLOBEX_TAX_ID).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_multiple() {
                let store = $factory;
                for n in 0..5 {
                    store
                        .insert(sample_record(&tax_id_for(n), "Natal"))
                        .await
                        .unwrap();
                }

                let all = store.list().await.unwrap();
                assert_count(&all, 5);
            }

            #[tokio::test]
            async fn test_insert_duplicate_conflicts() {
                let store = $factory;
                store
                    .insert(sample_record(ACME_TAX_ID, "Recife"))
                    .await
                    .unwrap();

                let err = store
                    .insert(sample_record(ACME_TAX_ID, "Natal"))
                    .await
                    .unwrap_err();
                assert!(
                    matches!(err, RegistryError::Conflict { ref tax_id } if tax_id == ACME_TAX_ID),
                    "expected Conflict, got {err:?}"
                );

                let kept = store.get(ACME_TAX_ID).await.unwrap().unwrap();
                assert_eq!(kept.city, "Recife");
            }

            #[tokio::test]
            async fn test_replace_existing() {
                let store = $factory;
                store
                    .insert(sample_record(ACME_TAX_ID, "Recife"))
                    .await
                    .unwrap();

                let mut changed = sample_record(ACME_TAX_ID, "Natal");
                changed.complement = None;
                let replaced = store.replace(changed.clone()).await.unwrap();
                assert_eq!(replaced, Some(changed.clone()));
                assert_eq!(store.get(ACME_TAX_ID).await.unwrap(), Some(changed));
            }

            #[tokio::test]
            async fn test_replace_nonexistent() {
                let store = $factory;
                let replaced = store
                    .replace(sample_record(GLOBEX_TAX_ID, "Natal"))
                    .await
                    .unwrap();
                assert!(replaced.is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_remove_existing() {
                let store = $factory;
                store
                    .insert(sample_record(ACME_TAX_ID, "Recife"))
                    .await
                    .unwrap();

                assert!(store.remove(ACME_TAX_ID).await.unwrap());
                assert!(store.get(ACME_TAX_ID).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_remove_nonexistent() {
                let store = $factory;
                assert!(!store.remove(ACME_TAX_ID).await.unwrap());
            }

            #[tokio::test]
            async fn test_concurrent_duplicate_inserts() {
                let store = $factory;
                let mut handles = Vec::new();
                for i in 0..5 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .insert(sample_record(ACME_TAX_ID, &format!("City {i}")))
                            .await
                    }));
                }

                let mut created = 0;
                let mut conflicts = 0;
                for handle in handles {
                    match handle.await.unwrap() {
                        Ok(_) => created += 1,
                        Err(RegistryError::Conflict { .. }) => conflicts += 1,
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
                assert_eq!(created, 1);
                assert_eq!(conflicts, 4);
                assert_count(&store.list().await.unwrap(), 1);
            }
        }
    };
}
