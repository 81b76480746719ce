// Implement the Cost Explorer Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_config::SdkConfig;
use aws_sdk_costexplorer::client::Client as CostExplorerClient;
use aws_sdk_costexplorer::config::{
    Builder as CostExplorerConfigBuilder,
    Region,
};
use aws_sdk_costexplorer::error::{
    DisplayErrorContext,
    ProvideErrorMetadata,
};
use aws_sdk_costexplorer::operation::get_cost_and_usage::GetCostAndUsageOutput;
use aws_sdk_costexplorer::types::{
    DateInterval,
    Dimension,
    DimensionValues,
    Expression,
    Granularity,
};
use chrono::{
    Duration,
    NaiveDate,
};
use crate::common::{
    LookupError,
    DEFAULT_REGION,
};
use tracing::debug;

/// Length of the cost window, ending today.
pub const COST_WINDOW_DAYS: i64 = 30;

// The metric we report.
const COST_METRIC: &str = "BlendedCost";

// Cost Explorer's name for S3 in the SERVICE dimension.
const S3_SERVICE_NAME: &str = "Amazon Simple Storage Service";

/// A Cost Explorer `Client`.
pub struct Client {
    /// The AWS SDK `CostExplorerClient`.
    pub client: CostExplorerClient,
}

impl Client {
    /// Return a new `Client` with the given `SdkConfig`.
    ///
    /// Cost Explorer only has an endpoint in `us-east-1`.
    pub fn new(config: &SdkConfig) -> Self {
        debug!("new: Creating CostExplorerClient in region '{}'", DEFAULT_REGION);

        let config = CostExplorerConfigBuilder::from(config)
            .region(Region::new(DEFAULT_REGION))
            .build();

        let client = CostExplorerClient::from_conf(config);

        Self {
            client,
        }
    }

    /// Returns the S3 blended cost of `bucket` between `start` (inclusive)
    /// and `end` (exclusive).
    ///
    /// Filtering by `RESOURCE_ID` needs resource level data to be enabled in
    /// the billing preferences, otherwise Cost Explorer answers with a
    /// `ValidationException`.
    pub async fn get_cost_and_usage(
        &self,
        bucket: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<GetCostAndUsageOutput, LookupError> {
        debug!(
            "get_cost_and_usage: Processing '{}' from {} to {}",
            bucket,
            start,
            end,
        );

        let time_period = DateInterval::builder()
            .start(start.format("%Y-%m-%d").to_string())
            .end(end.format("%Y-%m-%d").to_string())
            .build()
            .map_err(|err| LookupError::from_code(None, err.to_string()))?;

        let service = Expression::builder()
            .dimensions(
                DimensionValues::builder()
                    .key(Dimension::Service)
                    .values(S3_SERVICE_NAME)
                    .build()
            )
            .build();

        let resource = Expression::builder()
            .dimensions(
                DimensionValues::builder()
                    .key(Dimension::ResourceId)
                    .values(bucket)
                    .build()
            )
            .build();

        let filter = Expression::builder()
            .and(service)
            .and(resource)
            .build();

        let output = self.client.get_cost_and_usage()
            .time_period(time_period)
            .granularity(Granularity::Monthly)
            .metrics(COST_METRIC)
            .filter(filter)
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

        debug!("get_cost_and_usage: API returned: {:#?}", output);

        Ok(output)
    }
}

/// Returns the `[start, end)` window of the trailing cost period ending on
/// `today`.
pub fn cost_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(COST_WINDOW_DAYS), today)
}

/// Sums the blended cost over every period in `output`.
///
/// A 30 day window usually straddles two calendar months, so monthly
/// granularity returns two periods. `None` if no period carried an amount.
pub fn blended_cost(output: &GetCostAndUsageOutput) -> Option<f64> {
    let amounts: Vec<f64> = output.results_by_time
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|result| {
            result.total
                .as_ref()?
                .get(COST_METRIC)?
                .amount
                .as_deref()?
                .parse::<f64>()
                .ok()
        })
        .collect();

    if amounts.is_empty() {
        None
    }
    else {
        Some(amounts.iter().sum())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use aws_credential_types::Credentials;
    use aws_sdk_costexplorer::config::Config as CostExplorerConfig;
    use aws_smithy_http_client::test_util::{
        ReplayEvent,
        StaticReplayClient,
    };
    use aws_smithy_types::body::SdkBody;
    use pretty_assertions::assert_eq;

    pub const COST_AND_USAGE: &str = r#"{
        "ResultsByTime": [
            {
                "TimePeriod": {"Start": "2024-05-15", "End": "2024-06-01"},
                "Total": {"BlendedCost": {"Amount": "1.2", "Unit": "USD"}},
                "Groups": [],
                "Estimated": false
            },
            {
                "TimePeriod": {"Start": "2024-06-01", "End": "2024-06-14"},
                "Total": {"BlendedCost": {"Amount": "0.8", "Unit": "USD"}},
                "Groups": [],
                "Estimated": true
            }
        ],
        "DimensionValueAttributes": []
    }"#;

    pub const COST_AND_USAGE_EMPTY: &str = r#"{"ResultsByTime": []}"#;

    pub const VALIDATION_EXCEPTION: &str = r#"{
        "__type": "ValidationException",
        "Message": "Resource-level data is not enabled"
    }"#;

    // Create a mock Cost Explorer client answering with `status` and `body`.
    pub fn mock_client(status: u16, body: &str) -> Client {
        let http_client = StaticReplayClient::new(vec![
            ReplayEvent::new(
                http::Request::builder()
                    .body(SdkBody::empty())
                    .unwrap(),

                http::Response::builder()
                    .status(status)
                    .body(SdkBody::from(body))
                    .unwrap(),
            ),
        ]);

        let creds = Credentials::new(
            "ATESTCLIENT",
            "atestsecretkey",
            Some("atestsessiontoken".to_string()),
            None,
            "tests",
        );

        let conf = CostExplorerConfig::builder()
            .behavior_version_latest()
            .credentials_provider(creds)
            .http_client(http_client)
            .region(Region::new(DEFAULT_REGION))
            .build();

        Client {
            client: CostExplorerClient::from_conf(conf),
        }
    }

    fn window() -> (NaiveDate, NaiveDate) {
        cost_window(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap())
    }

    #[test]
    fn test_cost_window() {
        let (start, end) = window();

        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
    }

    #[tokio::test]
    async fn test_get_cost_and_usage() {
        let client = mock_client(200, COST_AND_USAGE);
        let (start, end) = window();

        let output = client.get_cost_and_usage("test-bucket", start, end)
            .await
            .unwrap();

        let cost = blended_cost(&output).unwrap();

        assert!((cost - 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_get_cost_and_usage_empty() {
        let client = mock_client(200, COST_AND_USAGE_EMPTY);
        let (start, end) = window();

        let output = client.get_cost_and_usage("test-bucket", start, end)
            .await
            .unwrap();

        assert_eq!(blended_cost(&output), None);
    }

    #[tokio::test]
    async fn test_get_cost_and_usage_validation_exception() {
        let client = mock_client(400, VALIDATION_EXCEPTION);
        let (start, end) = window();

        let ret = client.get_cost_and_usage("test-bucket", start, end).await;

        match ret {
            Err(LookupError::Configuration { code, .. }) => {
                assert_eq!(code, "ValidationException");
            },
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }
}
