// Implements the BucketSizer trait for CloudWatch Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use async_trait::async_trait;
use crate::common::{
    BucketSizer,
    LookupError,
};
use super::client::{
    latest_average,
    Client,
};
use tracing::debug;

#[async_trait]
impl BucketSizer for Client {
    /// Get the size of a given bucket
    async fn bucket_size(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<Option<f64>, LookupError> {
        debug!("bucket_size: Calculating size for '{}'", bucket);

        let output = self.get_metric_statistics(bucket, region).await?;

        let datapoints = output.datapoints.unwrap_or_default();
        let size       = latest_average(&datapoints);

        debug!(
            "bucket_size: Size for '{}' from {} datapoints is {:?}",
            bucket,
            datapoints.len(),
            size,
        );

        Ok(size)
    }
}
