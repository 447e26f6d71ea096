//! Direct row-store client (secondary delivery channel).

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use skillswap_core::config::remote::RowStoreConfig;
use skillswap_core::error::{AppError, ErrorKind};
use skillswap_core::result::AppResult;
use skillswap_core::types::id::{NotificationId, UserId};
use skillswap_entity::{NewNotification, Notification};

use crate::traits::RowStore;

/// REST client for the hosted `notifications` table.
///
/// Speaks the row-endpoint dialect: insert via POST with
/// `return=representation`, select via filter query parameters
/// (`column=eq.value`), update via filtered PATCH. Used only when the
/// primary API is unreachable.
#[derive(Debug, Clone)]
pub struct HttpRowStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    user_id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_id: Option<&'a str>,
    is_read: bool,
}

impl HttpRowStore {
    /// Build a client from configuration.
    pub fn new(config: &RowStoreConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Store, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/notifications", self.base_url)
    }

    async fn parse_rows(response: reqwest::Response, operation: &str) -> AppResult<Vec<Notification>> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(%status, body = %body, "Row store {operation} returned error status");
            return Err(AppError::store(format!(
                "{operation} failed with status {status}: {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(body = %body, error = %e, "Unparseable row store response");
            AppError::with_source(
                ErrorKind::Store,
                format!("{operation} returned an unparseable body"),
                e,
            )
        })
    }
}

#[async_trait]
impl RowStore for HttpRowStore {
    async fn insert(&self, request: &NewNotification) -> AppResult<Notification> {
        let row = InsertRow {
            user_id: request.user_id.as_str(),
            kind: request.kind.as_str(),
            message: &request.message,
            reference_id: request.reference_id.as_deref(),
            is_read: false,
        };

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Store, "insert request failed", e))?;

        let mut rows = Self::parse_rows(response, "insert").await?;
        rows.pop()
            .ok_or_else(|| AppError::store("insert returned no representation"))
    }

    async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
        let response = self
            .client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .query(&[
                ("user_id", format!("eq.{}", user_id.as_str())),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Store, "select request failed", e))?;

        Self::parse_rows(response, "select").await
    }

    async fn mark_read(&self, id: &NotificationId) -> AppResult<bool> {
        let response = self
            .client
            .patch(self.table_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id.as_str()))])
            .json(&serde_json::json!({ "is_read": true }))
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Store, "update request failed", e))?;

        let rows = Self::parse_rows(response, "update").await?;
        Ok(!rows.is_empty())
    }

    async fn mark_all_read(&self, user_id: &UserId) -> AppResult<u64> {
        let response = self
            .client
            .patch(self.table_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .query(&[
                ("user_id", format!("eq.{}", user_id.as_str())),
                ("is_read", "eq.false".to_string()),
            ])
            .json(&serde_json::json!({ "is_read": true }))
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Store, "update request failed", e))?;

        let rows = Self::parse_rows(response, "update").await?;
        Ok(rows.len() as u64)
    }
}
