//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that drive
//! a `CustomerStore` through the full router:
//! JSON → HTTP request → handler → CustomerService → store → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$store_factory` must produce an `impl CustomerStore + 'static`.
///
/// # Generated Tests
///
/// - create (201), get (200), list (200), update (200), delete (204)
/// - duplicate create → 400, absent get/update/delete → 404
/// - invalid body → 400 with field errors, key mismatch on update → 400
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use customer_registry::server::ServerBuilder;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let router = ServerBuilder::new()
                    .with_store($store_factory)
                    .with_lookup(StubLookup)
                    .build()
                    .unwrap();
                TestServer::try_new(router).unwrap()
            }

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let response = server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body, sample_json(ACME_TAX_ID));
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;

                let response = server.get(&format!("/clientes/{ACME_TAX_ID}")).await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["legalName"], "Acme Industria Ltda");
                assert_eq!(body["complement"], "Conjunto 12");
            }

            #[tokio::test]
            async fn test_rest_list() {
                let server = make_server().await;
                server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;
                server.post("/clientes").json(&sample_json(GLOBEX_TAX_ID)).await;

                let response = server.get("/clientes").await;

                response.assert_status_ok();
                let body: Vec<Value> = response.json();
                let mut ids: Vec<&str> = body.iter().filter_map(|r| r["taxId"].as_str()).collect();
                ids.sort();
                assert_eq!(ids, vec![ACME_TAX_ID, GLOBEX_TAX_ID]);
            }

            #[tokio::test]
            async fn test_rest_update() {
                let server = make_server().await;
                server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;

                let mut changed = sample_json(ACME_TAX_ID);
                changed["tradeName"] = json!("Acme Matriz");
                changed.as_object_mut().unwrap().remove("complement");

                let response = server
                    .put(&format!("/clientes/{ACME_TAX_ID}"))
                    .json(&changed)
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["tradeName"], "Acme Matriz");
                assert!(body.get("complement").is_none());

                let fetched: Value = server.get(&format!("/clientes/{ACME_TAX_ID}")).await.json();
                assert_eq!(fetched, body);
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;

                let response = server.delete(&format!("/clientes/{ACME_TAX_ID}")).await;
                response.assert_status(StatusCode::NO_CONTENT);

                let response = server.get(&format!("/clientes/{ACME_TAX_ID}")).await;
                response.assert_status_not_found();

                let response = server.delete(&format!("/clientes/{ACME_TAX_ID}")).await;
                response.assert_status_not_found();
            }

            #[tokio::test]
            async fn test_rest_duplicate_create_is_rejected() {
                let server = make_server().await;
                server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;

                let response = server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;

                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["code"], "CUSTOMER_ALREADY_EXISTS");
                assert!(body["error"].as_str().unwrap().contains(ACME_TAX_ID));
            }

            #[tokio::test]
            async fn test_rest_invalid_body_reports_fields() {
                let server = make_server().await;
                let mut bad = sample_json("11222333000182");
                bad["stateCode"] = json!("SPX");
                bad.as_object_mut().unwrap().remove("email");

                let response = server.post("/clientes").json(&bad).await;

                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                assert_eq!(
                    body["fields"],
                    json!([
                        {"field": "taxId", "message": "has invalid check digits"},
                        {"field": "stateCode", "message": "must be exactly 2 characters"},
                        {"field": "email", "message": "is required"}
                    ])
                );

                let list: Vec<Value> = server.get("/clientes").await.json();
                assert!(list.is_empty());
            }

            #[tokio::test]
            async fn test_rest_update_key_mismatch_is_rejected() {
                let server = make_server().await;
                server.post("/clientes").json(&sample_json(ACME_TAX_ID)).await;

                let response = server
                    .put(&format!("/clientes/{ACME_TAX_ID}"))
                    .json(&sample_json(GLOBEX_TAX_ID))
                    .await;

                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["fields"][0]["field"], "taxId");
            }

            #[tokio::test]
            async fn test_rest_update_absent_is_not_found() {
                let server = make_server().await;

                let response = server
                    .put(&format!("/clientes/{GLOBEX_TAX_ID}"))
                    .json(&sample_json(GLOBEX_TAX_ID))
                    .await;

                response.assert_status_not_found();
                let body: Value = response.json();
                assert_eq!(body["code"], "CUSTOMER_NOT_FOUND");
            }
        }
    };
}
