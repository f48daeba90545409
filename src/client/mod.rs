//! Typed HTTP client for the customer registry API
//!
//! Writes are checked against the shared customer schema before anything
//! is sent, so an invalid draft never costs a round trip.

use crate::core::customer::{CustomerDraft, CustomerRecord};
use crate::core::validation::{self, FieldErrors};
use anyhow::Context;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected by the customer schema, locally or by the server
    #[error("invalid customer: {0}")]
    Invalid(FieldErrors),

    #[error("customer not found")]
    NotFound,

    /// Server answered with an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for `/clientes`, `/consulta-cnpj` and `/consulta-cep`
#[derive(Debug, Clone)]
pub struct CustomerClient {
    http: Client,
    base_url: Url,
}

impl CustomerClient {
    /// Client for the API rooted at `base_url`, e.g. `http://localhost:3001`
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build API client")?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL '{base_url}' cannot carry a path");
        }
        Ok(Self { http, base_url })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    #[instrument(name = "client.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<CustomerRecord>, ClientError> {
        self.send(Method::GET, &["clientes"], None).await
    }

    #[instrument(name = "client.get", skip(self))]
    pub async fn get(&self, tax_id: &str) -> Result<CustomerRecord, ClientError> {
        self.send(Method::GET, &["clientes", tax_id], None).await
    }

    #[instrument(name = "client.create", skip_all)]
    pub async fn create(&self, draft: &CustomerDraft) -> Result<CustomerRecord, ClientError> {
        let record = validation::validate(draft).map_err(ClientError::Invalid)?;
        self.send(Method::POST, &["clientes"], Some(&record)).await
    }

    /// Replace the record at `tax_id`; the draft must carry the same key
    #[instrument(name = "client.update", skip(self, draft))]
    pub async fn update(
        &self,
        tax_id: &str,
        draft: &CustomerDraft,
    ) -> Result<CustomerRecord, ClientError> {
        let record = validation::validate_replacement(tax_id, draft).map_err(ClientError::Invalid)?;
        self.send(Method::PUT, &["clientes", tax_id], Some(&record)).await
    }

    #[instrument(name = "client.delete", skip(self))]
    pub async fn delete(&self, tax_id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&["clientes", tax_id]))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(name = "client.lookup_tax_id", skip(self))]
    pub async fn lookup_tax_id(&self, tax_id: &str) -> Result<Value, ClientError> {
        self.send(Method::GET, &["consulta-cnpj", tax_id], None).await
    }

    #[instrument(name = "client.lookup_postal_code", skip(self))]
    pub async fn lookup_postal_code(&self, postal_code: &str) -> Result<Value, ClientError> {
        self.send(Method::GET, &["consulta-cep", postal_code], None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&CustomerRecord>,
    ) -> Result<T, ClientError> {
        let url = self.url(segments);
        debug!(%method, %url, "Calling customer API");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Turns error statuses into [`ClientError`]
///
/// A 400 carrying field errors becomes [`ClientError::Invalid`]; other
/// `{error}` bodies become [`ClientError::Api`].
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<Value>(&text).ok();

    if status == StatusCode::BAD_REQUEST {
        if let Some(errors) = body.as_ref().and_then(field_errors) {
            return Err(ClientError::Invalid(errors));
        }
    }

    let message = body
        .as_ref()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or(text);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

fn field_errors(body: &Value) -> Option<FieldErrors> {
    if body.get("code").and_then(Value::as_str) != Some("VALIDATION_ERROR") {
        return None;
    }
    let fields = body.get("fields")?.clone();
    serde_json::from_value::<FieldErrors>(fields)
        .ok()
        .filter(|errors| !errors.is_empty())
}
