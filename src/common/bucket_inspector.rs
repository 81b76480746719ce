// BucketInspector trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use super::{
    DeletionPolicy,
    ObjectPage,
    VersioningStatus,
};

/// `BucketInspector` reads the configuration and contents of a single bucket
/// from the storage-management API.
///
/// Everything apart from `bucket_region` takes the bucket's region, since
/// bucket level requests have to be sent to the region the bucket lives in.
#[async_trait]
pub trait BucketInspector: Send + Sync {
    /// Returns the normalized region name of `bucket`.
    async fn bucket_region(&self, bucket: &str) -> Result<String>;

    /// Returns the versioning status of `bucket`.
    async fn versioning_status(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<VersioningStatus>;

    /// Returns whether `bucket` has an object expiration lifecycle.
    ///
    /// A bucket without any lifecycle configuration is not an error, it is
    /// reported as `DeletionPolicy::NotEnabled`.
    async fn deletion_policy(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<DeletionPolicy>;

    /// Returns a single page of the object listing for `bucket`, starting at
    /// `continuation_token`.
    async fn list_objects(
        &self,
        bucket: &str,
        region: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage>;
}
