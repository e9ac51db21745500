use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required parameter '{parameter}' for {resource}")]
    MissingParameterError { resource: String, parameter: String },

    #[error("Unknown parameter '{parameter}' for {resource}")]
    UnknownParameterError { resource: String, parameter: String },
}

impl ProxyError {
    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ProxyError::IoError(e) => format!("Could not read or write a file: {}", e),
            ProxyError::TomlError(_) | ProxyError::ConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            ProxyError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProxyError::IoError(_) => "Check that the config file exists and is readable",
            ProxyError::TomlError(_) => "Fix the TOML syntax in the config file",
            ProxyError::ConfigError { .. } | ProxyError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the [server]/[upstream] sections"
            }
            ProxyError::HttpClientError(_) => "Check the user agent and TLS settings of the upstream client",
            ProxyError::MissingParameterError { .. } | ProxyError::UnknownParameterError { .. } => {
                "The route and its resource descriptor disagree; this is a bug"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
