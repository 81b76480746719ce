// Implement the CloudWatch Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_config::SdkConfig;
use aws_sdk_cloudwatch::client::Client as CloudWatchClient;
use aws_sdk_cloudwatch::config::Region;
use aws_sdk_cloudwatch::error::{
    DisplayErrorContext,
    ProvideErrorMetadata,
};
use aws_sdk_cloudwatch::operation::get_metric_statistics::GetMetricStatisticsOutput;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{
    Datapoint,
    Dimension,
    StandardUnit,
    Statistic,
};
use crate::common::LookupError;
use std::collections::HashMap;
use std::sync::{
    Mutex,
    PoisonError,
};
use std::time::{
    Duration,
    SystemTime,
};
use tracing::debug;

const ONE_DAY: Duration = Duration::from_secs(86_400);

// How far back we look for a daily size datapoint.
const LOOKBACK_DAYS: u32 = 3;

// Storage type dimension of the size metric we report.
const STORAGE_TYPE: &str = "StandardStorage";

/// A `CloudWatch` `Client`
pub struct Client {
    /// The AWS SDK `CloudWatchClient`.
    pub client: CloudWatchClient,

    // Clients for bucket regions other than our own, built once per region.
    regional: Mutex<HashMap<String, CloudWatchClient>>,
}

impl Client {
    /// Return a new `Client` with the given `SdkConfig`.
    pub fn new(config: &SdkConfig) -> Self {
        debug!("new: Creating CloudWatchClient in region '{:?}'", config.region());

        Self::from_client(CloudWatchClient::new(config))
    }

    /// Wrap an already configured `CloudWatchClient`.
    pub fn from_client(client: CloudWatchClient) -> Self {
        Self {
            client,
            regional: Mutex::new(HashMap::new()),
        }
    }

    // S3 storage metrics are published in the bucket's own region.
    fn regional_client(&self, region: &str) -> CloudWatchClient {
        let current = self.client.config()
            .region()
            .map(|r| r.as_ref());

        if current == Some(region) {
            return self.client.clone();
        }

        let mut clients = self.regional
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        clients.entry(region.to_string())
            .or_insert_with(|| {
                debug!("regional_client: Creating CloudWatchClient in region '{}'", region);

                let config = self.client.config()
                    .to_builder()
                    .region(Region::new(region.to_string()))
                    .build();

                CloudWatchClient::from_conf(config)
            })
            .clone()
    }

    /// Returns the daily `BucketSizeBytes` averages of the standard storage
    /// class of `bucket` in `region` over the lookback window.
    pub async fn get_metric_statistics(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<GetMetricStatisticsOutput, LookupError> {
        debug!("get_metric_statistics: Processing '{}' in '{}'", bucket, region);

        let now        = SystemTime::now();
        let start_time = DateTime::from(now - (ONE_DAY * LOOKBACK_DAYS));

        let period = i32::try_from(ONE_DAY.as_secs())
            .map_err(|err| LookupError::from_code(None, format!("period: {}", err)))?;

        let dimensions = vec![
            Dimension::builder()
                .name("BucketName")
                .value(bucket)
                .build(),
            Dimension::builder()
                .name("StorageType")
                .value(STORAGE_TYPE)
                .build(),
        ];

        let input = self.regional_client(region)
            .get_metric_statistics()
            .end_time(DateTime::from(now))
            .metric_name("BucketSizeBytes")
            .namespace("AWS/S3")
            .period(period)
            .set_dimensions(Some(dimensions))
            .start_time(start_time)
            .statistics(Statistic::Average)
            .unit(StandardUnit::Bytes);

        debug!("{:?}", input);

        let output = input
            .send()
            .await
            .map_err(|err| {
                let code = err.as_service_error()
                    .and_then(|e| e.code())
                    .map(str::to_string);

                LookupError::from_code(
                    code.as_deref(),
                    DisplayErrorContext(&err).to_string(),
                )
            })?;

        Ok(output)
    }
}

/// Returns the average of the most recent datapoint that has one.
///
/// We don't know which order datapoints will be in if we get more than a
/// single datapoint, so we pick the newest by timestamp.
pub fn latest_average(datapoints: &[Datapoint]) -> Option<f64> {
    datapoints
        .iter()
        .filter(|datapoint| datapoint.average.is_some())
        .max_by_key(|datapoint| {
            datapoint.timestamp
                .as_ref()
                .map(|t| (t.secs(), t.subsec_nanos()))
        })
        .and_then(|datapoint| datapoint.average)
}
