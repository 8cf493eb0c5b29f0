use crate::config::RelayConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "genie-relay")]
#[command(about = "Relays website form submissions to the Xano backend")]
pub struct CliConfig {
    // 未提供時從環境變數讀取
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on, overrides the configured one")]
    pub bind: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn load_relay_config(&self) -> Result<RelayConfig> {
        let config = match &self.config {
            Some(path) => RelayConfig::from_file(path)?,
            None => RelayConfig::from_env()?,
        };

        Ok(match &self.bind {
            Some(bind) => config.with_bind_address(bind.clone()),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "genie-relay",
            "--config",
            "relay.toml",
            "--bind",
            "127.0.0.1:9000",
            "--verbose",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("relay.toml")));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:9000"));
        assert!(cli.verbose);
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_bind_flag_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[destination]
base_url = "https://x.xano.io/api:web"
api_key = "secret"

[server]
bind_address = "0.0.0.0:3000"
"#,
            )
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_path_buf()),
            bind: Some("127.0.0.1:4000".to_string()),
            verbose: false,
            json_logs: false,
        };

        let config = cli.load_relay_config().unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:4000");
    }
}
