// BucketCoster trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use async_trait::async_trait;
use super::LookupError;

/// `BucketCoster` estimates how much a bucket cost over the trailing month.
#[async_trait]
pub trait BucketCoster: Send + Sync {
    /// Returns the cost of `bucket` in USD over the last 30 days.
    ///
    /// `Ok(None)` means the billing service returned no cost for the bucket.
    async fn bucket_cost(&self, bucket: &str) -> Result<Option<f64>, LookupError>;
}
