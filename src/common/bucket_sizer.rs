// BucketSizer trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use async_trait::async_trait;
use super::LookupError;

/// `BucketSizer` represents the required methods to find the storage size of
/// an S3 bucket.
///
/// This trait should be implemented by all `Client`s performing this task.
#[async_trait]
pub trait BucketSizer: Send + Sync {
    /// Returns the most recent size of `bucket` in bytes, as published in the
    /// bucket's `region`.
    ///
    /// `Ok(None)` means the service answered but had no data for the bucket.
    async fn bucket_size(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<Option<f64>, LookupError>;
}
