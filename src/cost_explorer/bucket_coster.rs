// Implements the BucketCoster trait for the Cost Explorer Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use async_trait::async_trait;
use chrono::Utc;
use crate::common::{
    BucketCoster,
    LookupError,
};
use super::client::{
    blended_cost,
    cost_window,
    Client,
};
use tracing::debug;

#[async_trait]
impl BucketCoster for Client {
    /// Get the cost of a given bucket over the trailing 30 days.
    async fn bucket_cost(&self, bucket: &str) -> Result<Option<f64>, LookupError> {
        let (start, end) = cost_window(Utc::now().date_naive());

        let output = self.get_cost_and_usage(bucket, start, end).await?;
        let cost   = blended_cost(&output);

        debug!("bucket_cost: Cost for '{}' is {:?}", bucket, cost);

        Ok(cost)
    }
}
