use crate::domain::model::{QueryEnvelope, Record};
use crate::domain::resource::Resource;
use async_trait::async_trait;

/// Source of upstream records.
///
/// `None` is the absence signal: transport failure, non-2xx status or an
/// undecodable body. Callers decide how to surface it.
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    async fn fetch(&self, resource: Resource, query: QueryEnvelope) -> Option<Vec<Record>>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn upstream_base_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn cors_origins(&self) -> &[String];
}
