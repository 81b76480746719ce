// Collects the insight record of each bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use chrono::{
    DateTime,
    Utc,
};
use crate::common::{
    Bucket,
    BucketCoster,
    BucketInspector,
    BucketRecord,
    BucketSizer,
    LookupError,
    ObjectSampleSummary,
    SAMPLE_SIZE_CAP,
};
use super::{
    sample_objects,
    BucketOutcome,
};
use tracing::{
    debug,
    info,
    warn,
};

/// Holds the service clients for one run and builds a `BucketRecord` per
/// bucket from them.
///
/// Buckets are processed one at a time, in the order they're given.
pub struct InsightCollector<'a> {
    profile:     &'a str,
    inspector:   &'a dyn BucketInspector,
    sizer:       &'a dyn BucketSizer,
    coster:      &'a dyn BucketCoster,
    sample_size: usize,
    now:         DateTime<Utc>,
}

impl<'a> InsightCollector<'a> {
    /// Return a new `InsightCollector` using the given clients.
    ///
    /// The analysis time is fixed to the moment of creation so every bucket
    /// is judged against the same clock.
    pub fn new(
        profile: &'a str,
        inspector: &'a dyn BucketInspector,
        sizer: &'a dyn BucketSizer,
        coster: &'a dyn BucketCoster,
    ) -> Self {
        Self {
            profile:     profile,
            inspector:   inspector,
            sizer:       sizer,
            coster:      coster,
            sample_size: SAMPLE_SIZE_CAP,
            now:         Utc::now(),
        }
    }

    /// Override the analysis time.
    #[cfg(test)]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Override the object sample cap.
    #[cfg(test)]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Collect every bucket, returning one `BucketOutcome` per bucket.
    ///
    /// A failing bucket never stops the others from being collected.
    pub async fn collect(&self, buckets: &[Bucket]) -> Vec<BucketOutcome> {
        let mut outcomes = Vec::with_capacity(buckets.len());

        for bucket in buckets {
            info!("Analyzing bucket: {}", bucket.name);

            let outcome = match self.collect_bucket(bucket).await {
                Ok(record)  => BucketOutcome::Collected(record),
                Err(reason) => {
                    BucketOutcome::Skipped {
                        bucket: bucket.name.clone(),
                        reason: reason,
                    }
                },
            };

            debug!("collect: Finished '{}'", outcome.bucket_name());

            outcomes.push(outcome);
        }

        outcomes
    }

    /// Build the `BucketRecord` for a single `bucket`.
    ///
    /// Size and cost failures only blank out those fields and a failed object
    /// listing only empties the sample. Location, versioning and unexpected
    /// lifecycle failures are returned.
    pub async fn collect_bucket(&self, bucket: &Bucket) -> Result<BucketRecord> {
        let name = &bucket.name;

        let region = self.inspector
            .bucket_region(name)
            .await
            .context("Failed to get bucket location")?;

        info!("  - Getting storage and cost info...");

        let total_storage_bytes    = self.storage_size(name, &region).await;
        let estimated_monthly_cost = self.monthly_cost(name).await;

        let versioning_status = self.inspector
            .versioning_status(name, &region)
            .await
            .context("Failed to get bucket versioning")?;

        let deletion_policy_status = self.inspector
            .deletion_policy(name, &region)
            .await
            .context("Failed to get bucket lifecycle configuration")?;

        let summary = self.object_summary(name, &region).await;

        let record = BucketRecord {
            account_profile:        self.profile.to_string(),
            bucket_name:            name.clone(),
            total_storage_bytes:    total_storage_bytes,
            estimated_monthly_cost: estimated_monthly_cost,
            creation_date:          bucket.creation_date,
            region:                 region,
            versioning_status:      versioning_status,
            deletion_policy_status: deletion_policy_status,
            is_working_bucket:      summary.working_status(self.now),
        };

        debug!("collect_bucket: {:#?}", record);

        Ok(record)
    }

    // CloudWatch size, None if unavailable for any reason.
    async fn storage_size(&self, bucket: &str, region: &str) -> Option<f64> {
        match self.sizer.bucket_size(bucket, region).await {
            Ok(Some(size)) => Some(size),
            Ok(None) => {
                warn!(
                    "  - Warning: No CloudWatch size datapoint for '{}' in the lookback window.",
                    bucket,
                );

                None
            },
            Err(err) => {
                warn!(
                    "  - Warning: Could not get CloudWatch metrics for '{}'. Reason: {}",
                    bucket,
                    err.code(),
                );
                debug!("storage_size: {}", err);

                None
            },
        }
    }

    // Cost Explorer cost, None if unavailable for any reason.
    async fn monthly_cost(&self, bucket: &str) -> Option<f64> {
        match self.coster.bucket_cost(bucket).await {
            Ok(Some(cost)) => Some(cost),
            Ok(None) => {
                warn!("  - Warning: Cost Explorer returned no cost for '{}'.", bucket);

                None
            },
            Err(err @ LookupError::Configuration { .. }) => {
                info!(
                    "  - Info: Cost Explorer {}. Enable 'Resource and tag-level data' in AWS Billing preferences.",
                    err.code(),
                );
                debug!("monthly_cost: {}", err);

                None
            },
            Err(err) => {
                warn!(
                    "  - Warning: Could not get Cost Explorer data. Reason: {}",
                    err.code(),
                );
                debug!("monthly_cost: {}", err);

                None
            },
        }
    }

    // Object sample, empty if the listing fails.
    async fn object_summary(&self, bucket: &str, region: &str) -> ObjectSampleSummary {
        let sampled = sample_objects(
            self.inspector,
            bucket,
            region,
            self.sample_size,
        ).await;

        match sampled {
            Ok(summary) => {
                info!(
                    "  - Sampled {} objects: {} top level prefixes, extensions {:?}",
                    summary.objects_scanned,
                    summary.top_level_prefixes.len(),
                    summary.extension_histogram,
                );

                summary
            },
            Err(err) => {
                warn!(
                    "  - Warning: Could not list objects in '{}'. Skipping object analysis. Error: {:#}",
                    bucket,
                    err,
                );

                ObjectSampleSummary::default()
            },
        }
    }
}
