//! Route table

use super::handlers::{
    AppState, create_customer, delete_customer, get_customer, health_check, list_customers,
    lookup_postal_code, lookup_tax_id, update_customer,
};
use axum::{Router, routing::get};

/// Build every route of the service
///
/// - GET/POST /clientes
/// - GET/PUT/DELETE /clientes/{tax_id}
/// - GET /consulta-cnpj/{tax_id}
/// - GET /consulta-cep/{postal_code}
/// - GET /health, /healthz
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/clientes", get(list_customers).post(create_customer))
        .route(
            "/clientes/{tax_id}",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .route("/consulta-cnpj/{tax_id}", get(lookup_tax_id))
        .route("/consulta-cep/{postal_code}", get(lookup_postal_code))
        .with_state(state)
}
