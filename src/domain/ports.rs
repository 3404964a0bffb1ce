use crate::domain::model::{Incident, VersioningStatus};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait VersioningStore: Send + Sync {
    fn versioning_status(
        &self,
        bucket: &str,
    ) -> impl std::future::Future<Output = Result<VersioningStatus>> + Send;
    fn enable_versioning(&self, bucket: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends the incident and returns the HTTP status the endpoint answered with.
    async fn notify(&self, incident: &Incident) -> Result<u16>;
}
