// BucketLister trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use super::Buckets;

/// `BucketLister` enumerates the buckets visible to the active credentials.
#[async_trait]
pub trait BucketLister: Send + Sync {
    /// Returns the buckets in the order the API returned them.
    async fn buckets(&self) -> Result<Buckets>;
}
