use crate::config::toml_config::TomlConfig;
use crate::config::ServerSettings;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "openf1-proxy")]
#[command(about = "Pass-through HTTP API for the OpenF1 telemetry service")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Listen address, e.g. 127.0.0.1:8000")]
    pub bind: Option<String>,

    #[arg(long, help = "Upstream base URL")]
    pub upstream_url: Option<String>,

    #[arg(long, help = "User-Agent sent upstream")]
    pub user_agent: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Allowed CORS origins")]
    pub cors_origin: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 合併預設值、設定檔與命令列參數（命令列優先）
    pub fn resolve(&self) -> Result<ServerSettings> {
        let mut settings = ServerSettings::default();

        if let Some(path) = &self.config {
            settings = settings.apply_file(TomlConfig::from_file(path)?);
        }

        if let Some(bind) = &self.bind {
            settings.bind_addr = bind.clone();
        }
        if let Some(url) = &self.upstream_url {
            settings.upstream_base_url = url.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if !self.cors_origin.is_empty() {
            settings.cors_origins = self.cors_origin.clone();
        }
        settings.verbose |= self.verbose;
        settings.json_logs |= self.json_logs;

        Ok(settings)
    }
}
