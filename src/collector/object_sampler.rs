// Bounded single pass scan over a bucket listing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use crate::common::{
    BucketInspector,
    ObjectSampleSummary,
};
use tracing::debug;

/// Walks the listing of `bucket` page by page, folding each object into an
/// `ObjectSampleSummary`, until the listing ends or `cap` objects have been
/// seen.
///
/// Pages past the cap are never requested.
pub async fn sample_objects(
    inspector: &dyn BucketInspector,
    bucket: &str,
    region: &str,
    cap: usize,
) -> Result<ObjectSampleSummary> {
    let mut summary            = ObjectSampleSummary::default();
    let mut continuation_token = None;

    loop {
        let page = inspector
            .list_objects(bucket, region, continuation_token)
            .await?;

        let remaining = cap.saturating_sub(summary.objects_scanned);

        for object in page.objects.iter().take(remaining) {
            summary.observe(object);
        }

        if summary.objects_scanned >= cap {
            debug!("sample_objects: Reached cap of {} for '{}'", cap, bucket);

            break;
        }

        match page.next_token {
            Some(token) => continuation_token = Some(token),
            None        => break,
        }
    }

    Ok(summary)
}
