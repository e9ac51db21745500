use crate::utils::error::{ProxyError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional config file. Every section and key may be left out.
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:8000"
/// cors_origins = ["http://localhost:5173"]
///
/// [upstream]
/// base_url = "${OPENF1_BASE_URL}"
/// user_agent = "F1-Dashboard/1.0"
///
/// [logging]
/// json = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub upstream: Option<UpstreamSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: Option<String>,
    pub cors_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${OPENF1_BASE_URL})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProxyError::ConfigError {
            message: format!("env placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:9000"
cors_origins = ["http://localhost:5173"]

[upstream]
base_url = "https://api.openf1.org/v1"
user_agent = "Dash/2.0"

[logging]
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let server = config.server.unwrap();
        assert_eq!(server.bind.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(server.cors_origins.unwrap(), vec!["http://localhost:5173"]);
        assert_eq!(config.upstream.unwrap().user_agent.as_deref(), Some("Dash/2.0"));
        assert_eq!(config.logging.unwrap().json, Some(true));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.is_none());
        assert!(config.upstream.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_OPENF1_UPSTREAM", "http://127.0.0.1:9999");

        let toml_content = r#"
[upstream]
base_url = "${TEST_OPENF1_UPSTREAM}"
user_agent = "${TEST_OPENF1_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let upstream = config.upstream.unwrap();
        assert_eq!(upstream.base_url.as_deref(), Some("http://127.0.0.1:9999"));
        assert_eq!(
            upstream.user_agent.as_deref(),
            Some("${TEST_OPENF1_UNSET_VARIABLE}")
        );

        std::env::remove_var("TEST_OPENF1_UPSTREAM");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = TomlConfig::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, ProxyError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"127.0.0.1:8080\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.server.unwrap().bind.as_deref(),
            Some("127.0.0.1:8080")
        );
    }
}
