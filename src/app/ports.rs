use crate::error::Result;
use crate::types::EntryAttributes;
use async_trait::async_trait;

#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: String,
    /// URL after redirects, used to resolve relative links
    pub final_url: String,
}

/// Directory protocol transport: one search over the organization's root per call.
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    async fn search(&self, filter: &str) -> Result<Vec<EntryAttributes>>;
}
