use anyhow::Context;
use clap::Parser;
use openf1_proxy::domain::ports::ConfigProvider;
use openf1_proxy::utils::{logger, validation::Validate};
use openf1_proxy::{build_router, CliConfig, OpenF1Client};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔讀取失敗時 logger 尚未初始化，直接輸出到 stderr
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting openf1-proxy");
    tracing::debug!("Resolved settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let client = OpenF1Client::new(settings.upstream_base_url(), settings.user_agent())
        .context("failed to build upstream client")?;
    let app = build_router(Arc::new(client), settings.cors_origins())
        .context("failed to build router")?;

    let listener = TcpListener::bind(settings.bind_addr())
        .await
        .with_context(|| format!("failed to bind to {}", settings.bind_addr()))?;
    tracing::info!(
        "openf1-proxy listening on {} (upstream {})",
        settings.bind_addr(),
        settings.upstream_base_url()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("openf1-proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
