pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use api::build_router;
pub use config::ServerSettings;
pub use crate::core::upstream::{OpenF1Api, OpenF1Client};
pub use domain::model::{Envelope, QueryEnvelope, SessionKey, SessionType};
pub use domain::ports::UpstreamSource;
pub use domain::resource::Resource;
pub use utils::error::{ProxyError, Result};
