use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value;

use super::{Filter, Query, RowStore, StoreError};
use crate::config::{SecureString, StoreConfig};
use crate::identity::Session;
use crate::model::Record;

/// HTTP client for a PostgREST-style row API.
///
/// Tables live under `{url}/rest/v1/{table}`; filters are query parameters of
/// the form `column=eq.value`.
pub struct RestStore {
    client: Client,
    base: Url,
    anon_key: Option<SecureString>,
    bearer: Option<SecureString>,
}

impl RestStore {
    /// Builds a client for `config`, authenticating as `session` when given.
    ///
    /// Without a session token the anon key doubles as the bearer token.
    pub fn new(config: &StoreConfig, session: Option<&Session>) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.connect_timeout_seconds {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|source| StoreError::Connection { source })?;

        let base = Url::parse(&config.url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if base.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(config.url.clone()));
        }

        let anon_key = config.anon_key();
        let bearer = session
            .and_then(|s| s.access_token.clone())
            .or_else(|| anon_key.clone());

        Ok(Self {
            client,
            base,
            anon_key,
            bearer,
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    fn filtered_url(&self, table: &str, filter: &Filter) -> Result<Url, StoreError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut()
            .append_pair(&filter.column, &format!("eq.{}", filter.value));
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = match &self.anon_key {
            Some(key) => builder.header("apikey", key.expose()),
            None => builder,
        };
        match &self.bearer {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Vec<Record>, StoreError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|source| StoreError::Connection { source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| StoreError::Connection { source })?;

        if !status.is_success() {
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str::<Vec<Record>>(&body)
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }
}

/// Pulls the human-readable message out of an error body.
///
/// PostgREST answers `{"message": ..., "code": ..., "details": ...}`; anything
/// else falls back to the raw body, then to the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        v.get("message")
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    match message {
        Some(m) => m,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status.to_string(),
    }
}

#[async_trait]
impl RowStore for RestStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Record>, StoreError> {
        let mut url = self.table_url(table)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            if let Some(filter) = &query.filter {
                pairs.append_pair(&filter.column, &format!("eq.{}", filter.value));
            }
            if let Some(order) = &query.order {
                let direction = if order.ascending { "asc" } else { "desc" };
                pairs.append_pair("order", &format!("{}.{}", order.column, direction));
            }
        }

        tracing::debug!(table, filter = ?query.filter, "select");
        self.execute(self.client.get(url)).await
    }

    async fn insert(&self, table: &str, row: &Record) -> Result<Vec<Record>, StoreError> {
        let url = self.table_url(table)?;
        tracing::debug!(table, "insert");
        self.execute(
            self.client
                .post(url)
                .header("Prefer", "return=representation")
                .json(row),
        )
        .await
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        changes: &Record,
    ) -> Result<Vec<Record>, StoreError> {
        let url = self.filtered_url(table, filter)?;
        tracing::debug!(table, column = %filter.column, value = %filter.value, "update");
        self.execute(
            self.client
                .patch(url)
                .header("Prefer", "return=representation")
                .json(changes),
        )
        .await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Record>, StoreError> {
        let url = self.filtered_url(table, filter)?;
        tracing::debug!(table, column = %filter.column, value = %filter.value, "delete");
        self.execute(
            self.client
                .delete(url)
                .header("Prefer", "return=representation"),
        )
        .await
    }
}
