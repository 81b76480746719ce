// Handles region things
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use tracing::debug;

/// Region used when a bucket reports no location and for the global
/// CloudWatch and Cost Explorer endpoints.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Turns a bucket location constraint into a region name.
///
/// Location constraints for sufficiently old buckets in S3 may not quite meet
/// expectations. A missing or empty constraint means `us-east-1` and the
/// legacy `EU` constraint means `eu-west-1`.
pub fn normalize_location(location: Option<&str>) -> String {
    debug!("normalize_location: constraint is {:?}", location);

    match location {
        None | Some("") => DEFAULT_REGION.to_string(),
        Some("EU")      => "eu-west-1".to_string(),
        Some(location)  => location.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_location() {
        let tests = vec![
            (None,                   "us-east-1"),
            (Some(""),               "us-east-1"),
            (Some("EU"),             "eu-west-1"),
            (Some("eu-west-2"),      "eu-west-2"),
            (Some("ap-southeast-1"), "ap-southeast-1"),
        ];

        for test in tests {
            let ret = normalize_location(test.0);

            assert_eq!(ret, test.1);
        }
    }
}
