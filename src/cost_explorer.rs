// Imports all of the components needed for cost_explorer::client
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Implementation of the `BucketCoster` trait for our Cost Explorer `Client`.
mod bucket_coster;

/// Cost Explorer `Client`.
mod client;

pub use client::*;
