//! Core domain: the customer record, its validation and the service over a store

pub mod customer;
pub mod error;
pub mod service;
pub mod tax_id;
pub mod validation;

pub use customer::{CustomerDraft, CustomerField, CustomerRecord};
pub use error::{
    ErrorResponse, LookupError, LookupKind, RegistryError, RegistryResult, StorageError,
    ValidationError,
};
pub use service::{CustomerService, CustomerStore};
pub use validation::{FieldError, FieldErrors};
