//! HTTP lookups against the PokeAPI.
//!
//! A failed lookup is data, not an error: every failure mode (transport
//! error, non-2xx status, undecodable body) comes back as `None` so the rest
//! of the batch keeps going.

use crate::config::Config;
use crate::errors::PokedexResult;
use async_trait::async_trait;
use reqwest::{Client, Url};
use schema::EntityKind;
use serde_json::Value;
use tracing::{debug, warn};

/// Source of raw API documents.
///
/// Implementations must be safe to call many times concurrently; the fetch
/// stage issues one call per identifier in the batch at once.
#[async_trait]
pub trait ApiFetcher: Send + Sync {
    /// Look up `{kind}/{identifier}`. `None` means the lookup did not succeed.
    async fn fetch(&self, kind: EntityKind, identifier: &str) -> Option<Value>;
}

/// Lowercased, trimmed form used in the URL path. The original identifier is
/// kept by the caller for diagnostics.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

pub struct HttpFetcher {
    client: Client,
    config: Config,
}

impl HttpFetcher {
    pub fn new(config: Config) -> PokedexResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_json(&self, url: Url) -> Result<Value, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.json::<Value>().await
    }
}

#[async_trait]
impl ApiFetcher for HttpFetcher {
    async fn fetch(&self, kind: EntityKind, identifier: &str) -> Option<Value> {
        let path_id = normalize_identifier(identifier);
        if path_id.is_empty() {
            warn!(%kind, "skipping lookup for empty identifier");
            return None;
        }

        let url = match self.config.endpoint(kind.as_ref(), &path_id) {
            Ok(url) => url,
            Err(e) => {
                warn!(%kind, identifier = %path_id, error = %e, "cannot build lookup URL");
                return None;
            }
        };
        debug!(%url, "GET");

        match self.get_json(url.clone()).await {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(%url, error = %e, "lookup failed");
                None
            }
        }
    }
}
