//! HTTP server exposing the customer routes and registry lookups

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_routes;
