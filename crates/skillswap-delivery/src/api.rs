//! HTTP client for the remote notification API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use skillswap_core::config::remote::ApiConfig;
use skillswap_core::error::{AppError, ErrorKind};
use skillswap_core::result::AppResult;
use skillswap_core::types::id::UserId;
use skillswap_entity::{NewNotification, Notification};

use crate::traits::NotificationApi;

/// Remote notification API over HTTP.
///
/// `POST /api/notifications` creates; `GET /api/notifications?userId=`
/// lists. Responses use a `{success, data, error}` envelope.
#[derive(Debug, Clone)]
pub struct HttpNotificationApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePayload<'a> {
    user_id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_id: Option<&'a str>,
    is_read: bool,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpNotificationApi {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/notifications", self.base_url)
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        operation: &str,
    ) -> AppResult<T> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(%status, body = %body, "Notification API {operation} returned error status");
            return Err(AppError::external_service(format!(
                "{operation} failed with status {status}: {body}"
            )));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            warn!(body = %body, error = %e, "Unparseable notification API response");
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("{operation} returned an unparseable body"),
                e,
            )
        })?;

        if !envelope.success {
            let detail = envelope.error.unwrap_or_else(|| "no error detail".to_string());
            return Err(AppError::external_service(format!(
                "{operation} reported failure: {detail}"
            )));
        }

        envelope.data.ok_or_else(|| {
            AppError::external_service(format!("{operation} succeeded without data"))
        })
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn create(&self, request: &NewNotification) -> AppResult<Notification> {
        let payload = CreatePayload {
            user_id: request.user_id.as_str(),
            kind: request.kind.as_str(),
            message: &request.message,
            reference_id: request.reference_id.as_deref(),
            is_read: false,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "create request failed", e)
            })?;

        Self::parse(response, "create").await
    }

    async fn list(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("userId", user_id.as_str())])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "list request failed", e)
            })?;

        Self::parse(response, "list").await
    }
}
