use clap::Parser;
use genie_relay::utils::{logger, validation::Validate};
use genie_relay::{server, CliConfig, FormRelay, HttpDestination, RelayError};
use std::sync::Arc;
use tokio::net::TcpListener;

fn fail_startup(e: RelayError) -> ! {
    tracing::error!("❌ Startup failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting genie-relay");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 缺少任何設定都直接結束，不啟動伺服器
    let config = cli.load_relay_config().unwrap_or_else(|e| fail_startup(e));
    if let Err(e) = config.validate() {
        fail_startup(e);
    }

    tracing::info!(
        "🔗 Destination {} (auth: {:?})",
        config.base_url,
        config.auth_scheme
    );

    let relay = Arc::new(FormRelay::new(HttpDestination::new(&config)));
    let app = server::router(relay);

    let listener = TcpListener::bind(&config.bind_address).await?;
    server::serve(listener, app).await?;

    Ok(())
}
