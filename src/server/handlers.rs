//! HTTP handlers for customer and lookup routes

use crate::core::customer::CustomerRecord;
use crate::core::error::RegistryResult;
use crate::core::service::CustomerService;
use crate::core::validation::CustomerPayload;
use crate::lookup::RegistryLookup;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CustomerService,
    pub lookup: Arc<dyn RegistryLookup>,
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "customer-registry"
    }))
}

/// GET /clientes
pub async fn list_customers(
    State(state): State<AppState>,
) -> RegistryResult<Json<Vec<CustomerRecord>>> {
    Ok(Json(state.service.list().await?))
}

/// GET /clientes/{taxId}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> RegistryResult<Json<CustomerRecord>> {
    Ok(Json(state.service.get(&tax_id).await?))
}

/// POST /clientes
pub async fn create_customer(
    State(state): State<AppState>,
    CustomerPayload(draft): CustomerPayload,
) -> RegistryResult<(StatusCode, Json<CustomerRecord>)> {
    let created = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /clientes/{taxId}
pub async fn update_customer(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
    CustomerPayload(draft): CustomerPayload,
) -> RegistryResult<Json<CustomerRecord>> {
    Ok(Json(state.service.update(&tax_id, draft).await?))
}

/// DELETE /clientes/{taxId}
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> RegistryResult<StatusCode> {
    state.service.delete(&tax_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /consulta-cnpj/{taxId}
///
/// Relays the registry's JSON answer verbatim.
pub async fn lookup_tax_id(
    State(state): State<AppState>,
    Path(tax_id): Path<String>,
) -> RegistryResult<Json<Value>> {
    Ok(Json(state.lookup.tax_id(&tax_id).await?))
}

/// GET /consulta-cep/{postalCode}
pub async fn lookup_postal_code(
    State(state): State<AppState>,
    Path(postal_code): Path<String>,
) -> RegistryResult<Json<Value>> {
    Ok(Json(state.lookup.postal_code(&postal_code).await?))
}
