// Common traits and types
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bucket;
mod bucket_coster;
mod bucket_inspector;
mod bucket_lister;
mod bucket_record;
mod bucket_sizer;
mod client_config;
mod human_size;
mod lookup_error;
mod object_sample;
mod region;

pub use bucket::*;
pub use bucket_coster::*;
pub use bucket_inspector::*;
pub use bucket_lister::*;
pub use bucket_record::*;
pub use bucket_sizer::*;
pub use client_config::*;
pub use human_size::*;
pub use lookup_error::*;
pub use object_sample::*;
pub use region::*;
