//! # Customer Registry
//!
//! A REST service managing company customers keyed by their Brazilian
//! tax identifier (CNPJ).
//!
//! ## Features
//!
//! - **Checksum validation**: CNPJ check digits verified on every write
//! - **Shared schema**: one set of field rules used by server, client and form
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//! - **Registry lookups**: company and postal code passthrough for form pre-fill
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use customer_registry::prelude::*;
//!
//! ServerBuilder::new()
//!     .with_store(InMemoryCustomerStore::new())
//!     .serve("0.0.0.0:3001")
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod form;
pub mod lookup;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CustomerDraft, CustomerField, CustomerRecord, CustomerService, CustomerStore,
        FieldErrors, RegistryError, RegistryResult, tax_id,
    };

    // === Lookups ===
    pub use crate::lookup::{HttpRegistryLookup, LookupKind, LookupSettings, RegistryLookup};

    // === Storage ===
    pub use crate::storage::InMemoryCustomerStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresCustomerStore;

    // === Client side ===
    pub use crate::client::{ClientError, CustomerClient};
    pub use crate::form::{CustomerForm, LookupOutcome, LookupTicket};

    // === Config / Server ===
    pub use crate::config::AppConfig;
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
