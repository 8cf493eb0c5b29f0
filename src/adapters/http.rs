use crate::core::{AuthScheme, ConfigProvider, Destination, RelayResponse, RelayedPayload};
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// 透過 HTTP 把 payload 送到 Xano
#[derive(Debug, Clone)]
pub struct HttpDestination {
    client: Client,
    base_url: String,
    api_key: String,
    auth_scheme: AuthScheme,
}

impl HttpDestination {
    pub fn new<C: ConfigProvider>(config: &C) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client<C: ConfigProvider>(client: Client, config: &C) -> Self {
        Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
            auth_scheme: config.auth_scheme(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Destination for HttpDestination {
    async fn post_json(&self, path: &str, payload: &RelayedPayload) -> Result<RelayResponse> {
        let endpoint = self.endpoint(path);

        let mut request = self.client.post(&endpoint).json(payload);
        request = match self.auth_scheme {
            AuthScheme::Bearer => request.bearer_auth(&self.api_key),
            AuthScheme::ApiKeyHeader => request.header("X-API-KEY", &self.api_key),
        };

        tracing::debug!("📡 POST {}", endpoint);

        // 沒有收到回應（DNS、連線失敗等）
        let response = request.send().await.map_err(|e| RelayError::UpstreamError {
            message: e.without_url().to_string(),
            status: None,
        })?;

        let status = response.status().as_u16();
        tracing::debug!("📡 {} responded with status {}", endpoint, status);

        let text = response.text().await.map_err(|e| RelayError::UpstreamError {
            message: e.without_url().to_string(),
            status: Some(status),
        })?;
        let body = serde_json::from_str::<Value>(&text).ok();

        if !(200..300).contains(&status) {
            tracing::debug!("📡 {} error body: {}", endpoint, text);
            return Err(RelayError::UpstreamError {
                message: upstream_error_message(body.as_ref(), status),
                status: Some(status),
            });
        }

        Ok(RelayResponse {
            status,
            body: body.unwrap_or(Value::Null),
        })
    }
}

/// 從錯誤 body 取出可讀訊息：先找 `message`，再找 `error`
pub fn upstream_error_message(body: Option<&Value>, status: u16) -> String {
    body.and_then(|json| {
        ["message", "error"]
            .iter()
            .filter_map(|key| json.get(key).and_then(Value::as_str))
            .map(str::trim)
            .find(|message| !message.is_empty())
    })
    .map(str::to_string)
    .unwrap_or_else(|| format!("Upstream error (status {})", status))
}
