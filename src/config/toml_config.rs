use crate::config::{parse_auth_scheme, RelayConfig, DEFAULT_BIND_ADDRESS};
use crate::core::AuthScheme;
use crate::utils::error::{RelayError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub destination: DestinationConfig,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    pub base_url: String,
    pub api_key: String,
    pub auth_scheme: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RelayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${XANO_API_KEY})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RelayError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn auth_scheme(&self) -> Result<AuthScheme> {
        match &self.destination.auth_scheme {
            Some(value) => parse_auth_scheme(value),
            None => Ok(AuthScheme::default()),
        }
    }

    pub fn into_relay_config(self) -> Result<RelayConfig> {
        let auth_scheme = self.auth_scheme()?;
        let bind_address = self
            .server
            .and_then(|server| server.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(RelayConfig {
            base_url: self.destination.base_url.trim().to_string(),
            api_key: self.destination.api_key.trim().to_string(),
            auth_scheme,
            bind_address,
        })
    }
}

impl RelayConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        TomlConfig::from_file(path)?.into_relay_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[destination]
base_url = "https://x.xano.io/api:web"
api_key = "secret"
auth_scheme = "api-key-header"

[server]
bind_address = "127.0.0.1:8080"
"#;

        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_relay_config()
            .unwrap();

        assert_eq!(config.base_url, "https://x.xano.io/api:web");
        assert_eq!(config.auth_scheme, AuthScheme::ApiKeyHeader);
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GENIE_RELAY_TEST_API_KEY", "from-env");

        let toml_content = r#"
[destination]
base_url = "https://x.xano.io/api:web"
api_key = "${GENIE_RELAY_TEST_API_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_relay_config()
            .unwrap();
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.auth_scheme, AuthScheme::Bearer);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);

        std::env::remove_var("GENIE_RELAY_TEST_API_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_fails_validation() {
        let toml_content = r#"
[destination]
base_url = "https://x.xano.io/api:web"
api_key = "${GENIE_RELAY_TEST_UNSET_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_relay_config()
            .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_destination_table() {
        let err = TomlConfig::from_toml_str("[server]\nbind_address = \"0.0.0.0:3000\"\n").unwrap_err();
        assert!(matches!(err, RelayError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[destination]
base_url = "https://x.xano.io/api:file"
api_key = "file-key"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = RelayConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url, "https://x.xano.io/api:file");
        assert_eq!(config.api_key, "file-key");
    }
}
