#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{AuthScheme, ConfigProvider};
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{
    validate_no_placeholder, validate_non_empty_string, validate_required_field,
    validate_socket_addr, validate_url, Validate,
};
use std::env;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// 程式啟動時建立一次，之後不再變動
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub base_url: String,
    pub api_key: String,
    pub auth_scheme: AuthScheme,
    pub bind_address: String,
}

impl RelayConfig {
    /// 從環境變數載入配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = non_empty("XANO_BASE_URL")
            .or_else(|| non_empty("NEXT_PUBLIC_XANO_WEBSITE_BASE_URL"));
        let base_url = validate_required_field("XANO_BASE_URL", &base_url)?.clone();

        let api_key = non_empty("XANO_API_KEY");
        let api_key = validate_required_field("XANO_API_KEY", &api_key)?.clone();

        let auth_scheme = match non_empty("XANO_AUTH_SCHEME") {
            Some(value) => parse_auth_scheme(&value)?,
            None => AuthScheme::default(),
        };

        Ok(Self {
            base_url: base_url.trim().to_string(),
            api_key: api_key.trim().to_string(),
            auth_scheme,
            bind_address: non_empty("RELAY_BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }

    pub fn with_bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.bind_address = bind_address.into();
        self
    }
}

pub fn parse_auth_scheme(value: &str) -> Result<AuthScheme> {
    match value.trim().to_ascii_lowercase().as_str() {
        "bearer" => Ok(AuthScheme::Bearer),
        "api-key-header" | "x-api-key" => Ok(AuthScheme::ApiKeyHeader),
        _ => Err(RelayError::InvalidConfigValueError {
            field: "auth_scheme".to_string(),
            value: value.to_string(),
            reason: "Expected 'bearer' or 'api-key-header'".to_string(),
        }),
    }
}

impl ConfigProvider for RelayConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn auth_scheme(&self) -> AuthScheme {
        self.auth_scheme
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_no_placeholder("api_key", &self.api_key)?;
        validate_socket_addr("bind_address", &self.bind_address)?;

        tracing::debug!("✅ Relay configuration validation passed");
        Ok(())
    }
}
