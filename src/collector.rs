// Imports all of the components needed to collect bucket insights
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// `BucketOutcome`, the per-bucket result of a collection.
mod bucket_outcome;

/// `InsightCollector`, which turns buckets into `BucketRecord`s.
mod insight_collector;

/// Bounded scan over a bucket listing.
mod object_sampler;

pub use bucket_outcome::*;
pub use insight_collector::*;
pub use object_sampler::*;
