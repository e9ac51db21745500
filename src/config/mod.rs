#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::upstream::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_origin, validate_socket_addr, validate_url, Validate,
};
use toml_config::TomlConfig;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "https://127.0.0.1:3000",
    "https://127.0.0.1:5173",
];

/// Resolved server settings: defaults, then the config file, then flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub upstream_base_url: String,
    pub user_agent: String,
    pub cors_origins: Vec<String>,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            json_logs: false,
            verbose: false,
        }
    }
}

impl ServerSettings {
    /// 以設定檔內容覆蓋預設值
    pub fn apply_file(mut self, file: TomlConfig) -> Self {
        if let Some(server) = file.server {
            if let Some(bind) = server.bind {
                self.bind_addr = bind;
            }
            if let Some(origins) = server.cors_origins {
                self.cors_origins = origins;
            }
        }
        if let Some(upstream) = file.upstream {
            if let Some(base_url) = upstream.base_url {
                self.upstream_base_url = base_url;
            }
            if let Some(user_agent) = upstream.user_agent {
                self.user_agent = user_agent;
            }
        }
        if let Some(logging) = file.logging {
            self.json_logs = logging.json.unwrap_or(self.json_logs);
            self.verbose = logging.verbose.unwrap_or(self.verbose);
        }
        self
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.bind_addr)?;
        validate_url("upstream.base_url", &self.upstream_base_url)?;
        validate_non_empty_string("upstream.user_agent", &self.user_agent)?;
        for origin in &self.cors_origins {
            validate_origin("server.cors_origins", origin)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ServerSettings {
    fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    fn upstream_base_url(&self) -> &str {
        &self.upstream_base_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }
}
