// Result of collecting a single bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::BucketRecord;

/// What happened to one bucket during collection.
#[derive(Debug)]
pub enum BucketOutcome {
    /// The bucket was analysed and will appear in the reports.
    Collected(BucketRecord),

    /// The bucket failed and is left out of the reports.
    Skipped {
        /// Name of the skipped bucket.
        bucket: String,

        /// Why it was skipped.
        reason: anyhow::Error,
    },
}

impl BucketOutcome {
    /// Name of the bucket this outcome is for.
    pub fn bucket_name(&self) -> &str {
        match self {
            Self::Collected(record)      => &record.bucket_name,
            Self::Skipped { bucket, .. } => bucket,
        }
    }
}
