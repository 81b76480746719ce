// Per-bucket report record
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    Duration,
    NaiveDate,
    Utc,
};
use std::fmt;
use super::HumanSize;

/// A bucket modified less than this many days ago counts as working.
pub const WORKING_WINDOW_DAYS: i64 = 30;

/// Column heading of the account profile column.
pub const ACCOUNT_PROFILE_COLUMN: &str = "Account Profile";

/// Column heading of the region column.
pub const REGION_COLUMN: &str = "Region";

/// Report column headings, in the same order as `BucketRecord::cells`.
pub const COLUMNS: [&str; 9] = [
    ACCOUNT_PROFILE_COLUMN,
    "Bucket Name",
    "Total Storage",
    "Est. Cost (Last 30d)",
    "Creation Date",
    REGION_COLUMN,
    "Versioning",
    "Deletion Policy",
    "Is Working Bucket",
];

// Shown for any field we couldn't fetch.
const UNAVAILABLE: &str = "N/A";

/// Versioning state of a bucket.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VersioningStatus {
    /// Versioning is turned on.
    Enabled,
    /// Versioning was turned on at some point and is now paused.
    Suspended,
    /// Versioning has never been turned on.
    NotEnabled,
}

// S3 omits the status entirely for buckets that never had versioning.
impl From<Option<&str>> for VersioningStatus {
    fn from(status: Option<&str>) -> Self {
        match status {
            Some("Enabled")   => Self::Enabled,
            Some("Suspended") => Self::Suspended,
            _                 => Self::NotEnabled,
        }
    }
}

impl fmt::Display for VersioningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Enabled    => "Enabled",
            Self::Suspended  => "Suspended",
            Self::NotEnabled => "Not Enabled",
        };

        f.write_str(status)
    }
}

/// Whether a bucket has at least one object expiration rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeletionPolicy {
    /// A lifecycle configuration with at least one rule exists.
    Enabled,
    /// No lifecycle configuration exists.
    NotEnabled,
}

impl fmt::Display for DeletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = match self {
            Self::Enabled    => "Enabled",
            Self::NotEnabled => "Not Enabled",
        };

        f.write_str(policy)
    }
}

/// Heuristic label for "recently modified".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WorkingStatus {
    /// An object was modified within the working window.
    Yes,
    /// Nothing was modified within the working window, or nothing could be
    /// sampled.
    No,
}

impl WorkingStatus {
    /// Derives the working status from the newest modification time seen in
    /// a bucket, relative to `now`.
    pub fn from_last_seen(
        last_seen: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        match last_seen {
            Some(last_seen)
                if now - last_seen < Duration::days(WORKING_WINDOW_DAYS) =>
            {
                Self::Yes
            },
            _ => Self::No,
        }
    }
}

impl fmt::Display for WorkingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let working = match self {
            Self::Yes => "Yes",
            Self::No  => "No",
        };

        f.write_str(working)
    }
}

/// Everything the reports show about one bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketRecord {
    /// AWS profile the data was collected with.
    pub account_profile: String,

    /// Name of the bucket, unique within a run.
    pub bucket_name: String,

    /// Size reported by CloudWatch, if available.
    pub total_storage_bytes: Option<f64>,

    /// Cost over the trailing 30 days in USD, if available.
    pub estimated_monthly_cost: Option<f64>,

    /// Bucket creation date.
    pub creation_date: Option<NaiveDate>,

    /// Normalized bucket region.
    pub region: String,

    /// Versioning configuration.
    pub versioning_status: VersioningStatus,

    /// Lifecycle expiration configuration.
    pub deletion_policy_status: DeletionPolicy,

    /// Derived from the newest object modification time.
    pub is_working_bucket: WorkingStatus,
}

impl BucketRecord {
    /// Returns the display value of every column, in `COLUMNS` order.
    pub fn cells(&self) -> [String; 9] {
        let total_storage = match self.total_storage_bytes {
            Some(bytes) => Some(bytes).humansize(),
            None        => UNAVAILABLE.to_string(),
        };

        let estimated_cost = match self.estimated_monthly_cost {
            Some(cost) => format!("${:.2}", cost),
            None       => UNAVAILABLE.to_string(),
        };

        let creation_date = match self.creation_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None       => UNAVAILABLE.to_string(),
        };

        [
            self.account_profile.clone(),
            self.bucket_name.clone(),
            total_storage,
            estimated_cost,
            creation_date,
            self.region.clone(),
            self.versioning_status.to_string(),
            self.deletion_policy_status.to_string(),
            self.is_working_bucket.to_string(),
        ]
    }
}

/// Record builders shared by tests across the crate.
#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A fully populated record for `name` in `region`.
    pub fn record(name: &str, region: &str) -> BucketRecord {
        BucketRecord {
            account_profile:        "default".into(),
            bucket_name:            name.into(),
            total_storage_bytes:    Some(1536.0),
            estimated_monthly_cost: Some(1.234),
            creation_date:          NaiveDate::from_ymd_opt(2020, 3, 12),
            region:                 region.into(),
            versioning_status:      VersioningStatus::Enabled,
            deletion_policy_status: DeletionPolicy::NotEnabled,
            is_working_bucket:      WorkingStatus::Yes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::record;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cells() {
        let ret = record("a-bucket-name", "eu-west-1").cells();

        let expected = [
            "default",
            "a-bucket-name",
            "1.50 KB",
            "$1.23",
            "2020-03-12",
            "eu-west-1",
            "Enabled",
            "Not Enabled",
            "Yes",
        ];

        assert_eq!(ret, expected);
    }

    #[test]
    fn test_cells_unavailable() {
        let record = BucketRecord {
            total_storage_bytes:    None,
            estimated_monthly_cost: None,
            creation_date:          None,
            ..record("a-bucket-name", "eu-west-1")
        };

        let ret = record.cells();

        assert_eq!(ret[2], "N/A");
        assert_eq!(ret[3], "N/A");
        assert_eq!(ret[4], "N/A");
    }

    #[test]
    fn test_versioning_status_from() {
        let tests = vec![
            (Some("Enabled"),   VersioningStatus::Enabled,    "Enabled"),
            (Some("Suspended"), VersioningStatus::Suspended,  "Suspended"),
            (None,              VersioningStatus::NotEnabled, "Not Enabled"),
        ];

        for test in tests {
            let status = VersioningStatus::from(test.0);

            assert_eq!(status, test.1);
            assert_eq!(status.to_string(), test.2);
        }
    }

    #[test]
    fn test_working_status_from_last_seen() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap();

        let tests = vec![
            (Some(now - Duration::days(5)),                         WorkingStatus::Yes),
            (Some(now - Duration::days(30) + Duration::seconds(1)), WorkingStatus::Yes),
            (Some(now - Duration::days(30)),                        WorkingStatus::No),
            (Some(now - Duration::days(400)),                       WorkingStatus::No),
            (None,                                                  WorkingStatus::No),
        ];

        for test in tests {
            let ret = WorkingStatus::from_last_seen(test.0, now);

            assert_eq!(ret, test.1);
        }
    }
}
