//! reqwest-backed registry lookups

use super::{RegistryLookup, check_key};
use crate::core::error::{LookupError, LookupKind};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_TAX_ID_BASE_URL: &str = "https://receitaws.com.br/v1/cnpj";
pub const DEFAULT_POSTAL_CODE_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the registries live and how long to wait for them
#[derive(Debug, Clone)]
pub struct LookupSettings {
    /// Tax ID registry; the key is appended as the last path segment
    pub tax_id_base_url: String,
    /// Postal code registry; `/{cep}/json/` is appended
    pub postal_code_base_url: String,
    pub timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            tax_id_base_url: DEFAULT_TAX_ID_BASE_URL.to_string(),
            postal_code_base_url: DEFAULT_POSTAL_CODE_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Lookups against receitaws (tax IDs) and viacep (postal codes)
#[derive(Debug, Clone)]
pub struct HttpRegistryLookup {
    client: Client,
    tax_id_base: Url,
    postal_code_base: Url,
}

impl HttpRegistryLookup {
    pub fn new(settings: LookupSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to build registry HTTP client")?;

        Ok(Self {
            client,
            tax_id_base: parse_base(&settings.tax_id_base_url)?,
            postal_code_base: parse_base(&settings.postal_code_base_url)?,
        })
    }

    fn endpoint(&self, kind: LookupKind, key: &str) -> Result<Url, LookupError> {
        let (base, tail): (&Url, &[&str]) = match kind {
            LookupKind::TaxId => (&self.tax_id_base, &[]),
            LookupKind::PostalCode => (&self.postal_code_base, &["json", ""]),
        };

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::Transport {
                kind,
                message: format!("base URL '{base}' cannot carry a path"),
            })?
            .pop_if_empty()
            .push(key)
            .extend(tail);
        Ok(url)
    }

    async fn fetch(&self, kind: LookupKind, key: &str) -> Result<Value, LookupError> {
        check_key(kind, key)?;
        let url = self.endpoint(kind, key)?;
        debug!(%url, "Querying registry");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Registry request failed");
            if e.is_timeout() {
                LookupError::Timeout { kind }
            } else {
                LookupError::Transport {
                    kind,
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Registry returned an error status");
            return Err(LookupError::UpstreamStatus {
                kind,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout { kind }
            } else {
                LookupError::Transport {
                    kind,
                    message: e.to_string(),
                }
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| LookupError::MalformedResponse {
            kind,
            message: e.to_string(),
        })
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("Invalid registry base URL '{raw}'"))
}

#[async_trait]
impl RegistryLookup for HttpRegistryLookup {
    #[instrument(name = "lookup.tax_id", skip(self))]
    async fn tax_id(&self, tax_id: &str) -> Result<Value, LookupError> {
        self.fetch(LookupKind::TaxId, tax_id).await
    }

    #[instrument(name = "lookup.postal_code", skip(self))]
    async fn postal_code(&self, postal_code: &str) -> Result<Value, LookupError> {
        self.fetch(LookupKind::PostalCode, postal_code).await
    }
}
