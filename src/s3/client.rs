// Implements the S3 Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_config::SdkConfig;
use aws_sdk_s3::client::Client as S3Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_smithy_types_convert::date_time::DateTimeExt;
use crate::common::{
    normalize_location,
    Bucket,
    Buckets,
    DeletionPolicy,
    ObjectEntry,
    ObjectPage,
    VersioningStatus,
};
use std::collections::HashMap;
use std::sync::{
    Mutex,
    PoisonError,
};
use tracing::debug;

// Returned by GetBucketLifecycleConfiguration for buckets without one.
const NO_SUCH_LIFECYCLE_CONFIGURATION: &str = "NoSuchLifecycleConfiguration";

/// The S3 `Client`.
pub struct Client {
    /// The AWS SDK `S3Client`.
    pub client: S3Client,

    // Clients for bucket regions other than our own, built once per region.
    regional: Mutex<HashMap<String, S3Client>>,
}

impl Client {
    /// Return a new S3 `Client` with the given `SdkConfig`.
    pub fn new(config: &SdkConfig) -> Self {
        debug!("new: Creating S3Client in region '{:?}'", config.region());

        Self::from_client(S3Client::new(config))
    }

    /// Wrap an already configured `S3Client`.
    pub fn from_client(client: S3Client) -> Self {
        Self {
            client,
            regional: Mutex::new(HashMap::new()),
        }
    }

    // Bucket level requests must go to the bucket's own region. Reuse our
    // client when it's already there.
    fn regional_client(&self, region: &str) -> S3Client {
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
                debug!("regional_client: Creating S3Client in region '{}'", region);

                let config = self.client.config()
                    .to_builder()
                    .region(Region::new(region.to_string()))
                    .build();

                S3Client::from_conf(config)
            })
            .clone()
    }

    /// Returns the buckets visible to our credentials, with their creation
    /// dates.
    pub async fn list_buckets(&self) -> Result<Buckets> {
        let output = self.client.list_buckets()
            .send()
            .await?;

        debug!("list_buckets: API returned: {:#?}", output);

        let buckets = output.buckets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|bucket| {
                let creation_date = bucket.creation_date
                    .and_then(|date| date.to_chrono_utc().ok())
                    .map(|date| date.date_naive());

                bucket.name.map(|name| Bucket {
                    name,
                    creation_date,
                })
            })
            .collect();

        Ok(buckets)
    }

    /// Return the bucket location (region name) for the given `bucket`.
    ///
    /// This method will properly handle the case of the `null` (empty) and
    /// `EU` location constraints, by replacing them with `us-east-1` and
    /// `eu-west-1` respectively.
    pub async fn get_bucket_location(&self, bucket: &str) -> Result<String> {
        debug!("get_bucket_location for '{}'", bucket);

        let output = self.client.get_bucket_location()
            .bucket(bucket)
            .send()
            .await?;

        let location = output.location_constraint
            .as_ref()
            .map(|constraint| constraint.as_str());

        Ok(normalize_location(location))
    }

    /// Return the versioning status of `bucket`.
    pub async fn get_bucket_versioning(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<VersioningStatus> {
        debug!("get_bucket_versioning for '{}'", bucket);

        let output = self.regional_client(region)
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .await?;

        let status = output.status
            .as_ref()
            .map(|status| status.as_str());

        Ok(VersioningStatus::from(status))
    }

    /// Return whether `bucket` has any lifecycle rules.
    ///
    /// A missing lifecycle configuration is the expected answer for most
    /// buckets and is mapped to `DeletionPolicy::NotEnabled`. Any other error
    /// is returned.
    pub async fn get_bucket_lifecycle(
        &self,
        bucket: &str,
        region: &str,
    ) -> Result<DeletionPolicy> {
        debug!("get_bucket_lifecycle for '{}'", bucket);

        let output = self.regional_client(region)
            .get_bucket_lifecycle_configuration()
            .bucket(bucket)
            .send()
            .await;

        match output {
            Ok(output) => {
                let rules = output.rules.unwrap_or_default();

                debug!("get_bucket_lifecycle: '{}' has {} rules", bucket, rules.len());

                if rules.is_empty() {
                    Ok(DeletionPolicy::NotEnabled)
                }
                else {
                    Ok(DeletionPolicy::Enabled)
                }
            },
            Err(err) => {
                let code = err.as_service_error()
                    .and_then(|e| e.code());

                if code == Some(NO_SUCH_LIFECYCLE_CONFIGURATION) {
                    return Ok(DeletionPolicy::NotEnabled);
                }

                Err(err).context("GetBucketLifecycleConfiguration failed")
            },
        }
    }

    /// Return one page of the current objects in `bucket`.
    pub async fn list_objects_page(
        &self,
        bucket: &str,
        region: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage> {
        debug!(
            "list_objects_page for '{}' with token {:?}",
            bucket,
            continuation_token,
        );

        let output = self.regional_client(region)
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token)
            .send()
            .await?;

        let objects = output.contents
            .unwrap_or_default()
            .into_iter()
            .map(|object| {
                let last_modified = object.last_modified
                    .and_then(|date| date.to_chrono_utc().ok());

                let size = object.size
                    .and_then(|size| u64::try_from(size).ok())
                    .unwrap_or_default();

                ObjectEntry {
                    key: object.key.unwrap_or_default(),
                    last_modified,
                    size,
                }
            })
            .collect();

        // S3 only hands out a continuation token when the listing was
        // truncated.
        let page = ObjectPage {
            objects:    objects,
            next_token: output.next_continuation_token,
        };

        Ok(page)
    }
}
