//! ServerBuilder for fluent API to build the HTTP server

use super::handlers::AppState;
use super::router::build_routes;
use crate::core::service::{CustomerService, CustomerStore};
use crate::lookup::{HttpRegistryLookup, LookupSettings, RegistryLookup};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the customer registry HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryCustomerStore::new())
///     .with_lookup_settings(config.lookup.settings())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn CustomerStore>>,
    lookup: Option<Arc<dyn RegistryLookup>>,
    lookup_settings: LookupSettings,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            lookup: None,
            lookup_settings: LookupSettings::default(),
        }
    }

    /// Set the customer store (required)
    pub fn with_store(self, store: impl CustomerStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set a store already shared elsewhere
    pub fn with_shared_store(mut self, store: Arc<dyn CustomerStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the HTTP registry lookup entirely
    pub fn with_lookup(mut self, lookup: impl RegistryLookup + 'static) -> Self {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Settings for the default HTTP lookup; ignored after `with_lookup`
    pub fn with_lookup_settings(mut self, settings: LookupSettings) -> Self {
        self.lookup_settings = settings;
        self
    }

    /// Build the router with tracing and permissive CORS
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("CustomerStore is required. Call .with_store()"))?;

        let lookup = match self.lookup {
            Some(lookup) => lookup,
            None => Arc::new(HttpRegistryLookup::new(self.lookup_settings)?),
        };

        let state = AppState {
            service: CustomerService::new(store),
            lookup,
        };

        Ok(build_routes(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
