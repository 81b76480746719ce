// Definition of a bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::NaiveDate;

/// Represents an S3 bucket as returned by the account enumeration.
///
/// This will always have a `name` and optionally a `creation_date`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    /// The bucket name.
    pub name: String,

    /// The date the bucket was created, if S3 reported one.
    pub creation_date: Option<NaiveDate>,
}

/// Convenience type for a list of `Bucket`.
pub type Buckets = Vec<Bucket>;
