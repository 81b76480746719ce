// ClientConfig
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_config::{
    BehaviorVersion,
    SdkConfig,
};
use aws_types::region::Region;
use std::path::PathBuf;
use super::DEFAULT_REGION;
use tracing::debug;

/// Profile used when `AWS_PROFILE` isn't set.
pub const DEFAULT_PROFILE: &str = "default";

/// Directory reports are written to by default.
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Client configuration.
#[derive(Debug, PartialEq)]
pub struct ClientConfig {
    /// The AWS credential profile to load.
    ///
    /// This also ends up in the report file names and the account profile
    /// column.
    pub profile: String,

    /// Directory that the report files are written to.
    pub output_dir: PathBuf,
}

impl Default for ClientConfig {
    /// Returns a default `ClientConfig`.
    ///
    /// ```rust
    /// ClientConfig {
    ///     profile:    "default".into(),
    ///     output_dir: "reports".into(),
    /// }
    /// ```
    fn default() -> Self {
        Self {
            profile:    DEFAULT_PROFILE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ClientConfig {
    /// Loads the shared AWS SDK configuration for `profile`.
    ///
    /// If the profile doesn't name a region, `us-east-1` is used, which can
    /// list buckets and locate buckets in every region.
    pub async fn sdk_config(&self) -> SdkConfig {
        debug!("sdk_config: Loading AWS config for profile '{}'", self.profile);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(&self.profile)
            .load()
            .await;

        if let Some(region) = config.region() {
            debug!("sdk_config: Profile region is '{}'", region);

            return config;
        }

        debug!("sdk_config: No region configured, using '{}'", DEFAULT_REGION);

        config.to_builder()
            .region(Region::new(DEFAULT_REGION))
            .build()
    }
}
