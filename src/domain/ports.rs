use crate::domain::model::{RelayResponse, RelayedPayload};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 目的地的驗證方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `X-API-KEY: <key>`
    ApiKeyHeader,
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn auth_scheme(&self) -> AuthScheme;
}

/// 表單資料的最終去處（第三方 BaaS）
#[async_trait]
pub trait Destination: Send + Sync {
    async fn post_json(&self, path: &str, payload: &RelayedPayload) -> Result<RelayResponse>;
}
