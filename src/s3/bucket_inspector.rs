// Implement the BucketLister and BucketInspector traits for the s3::Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    BucketInspector,
    BucketLister,
    Buckets,
    DeletionPolicy,
    ObjectPage,
    VersioningStatus,
};
use super::client::Client;
use tracing::debug;

#[async_trait]
impl BucketLister for Client {
    /// Return `Buckets` discovered in S3.
    async fn buckets(&self) -> Result<Buckets> {
        debug!("buckets: Listing...");

        let buckets = self.list_buckets().await?;

        debug!("buckets: Found {} buckets", buckets.len());

        Ok(buckets)
    }
}

#[async_trait]
impl BucketInspector for Client {
    async fn bucket_region(&self, bucket: &str) -> Result<String> {
        self.get_bucket_location(bucket).await
    }

    async fn versioning_status(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<VersioningStatus> {
        self.get_bucket_versioning(bucket, region).await
    }

    async fn deletion_policy(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<DeletionPolicy> {
        self.get_bucket_lifecycle(bucket, region).await
    }

    async fn list_objects(
        &self,
        bucket: &str,
        region: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage> {
        self.list_objects_page(bucket, region, continuation_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::client::tests::{
        mock_client,
        ResponseType,
        GET_BUCKET_LOCATION,
        LIST_BUCKETS,
        NO_SUCH_LIFECYCLE,
    };
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_buckets() {
        let expected = vec![
            "a-bucket-name",
            "another-bucket-name",
        ];

        let client = mock_client(vec![ResponseType::Xml(LIST_BUCKETS)]);

        let buckets = client.buckets().await.unwrap();

        let buckets: Vec<String> = buckets.iter()
            .map(|b| b.name.to_owned())
            .collect();

        assert_eq!(buckets, expected);
    }

    #[tokio::test]
    async fn test_inspect_through_trait() {
        let client = mock_client(vec![
            ResponseType::Xml(GET_BUCKET_LOCATION),
            ResponseType::WithStatus(404, NO_SUCH_LIFECYCLE),
        ]);

        let inspector: &dyn BucketInspector = &client;

        let region = inspector.bucket_region("test-bucket").await.unwrap();
        assert_eq!(region, "eu-west-2");

        // The mock client lives in eu-west-1, the regional client shares its
        // HTTP client so the canned responses still apply.
        let policy = inspector.deletion_policy("test-bucket", &region)
            .await
            .unwrap();

        assert_eq!(policy, DeletionPolicy::NotEnabled);
    }
}
