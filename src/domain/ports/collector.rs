use thiserror::Error;

use crate::domain::entities::snapshot::ResourceSnapshot;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("failed to collect system metrics: {0}")]
    MetricsUnavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

pub trait SystemCollector: Send + Sync {
    /// Collect a resource snapshot (memory, load, disks, processes).
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` if metrics are unavailable or
    /// permission is denied.
    fn collect(&self) -> Result<ResourceSnapshot, CollectionError>;
}
