// In-memory table of collected bucket records
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::collector::BucketOutcome;
use crate::common::BucketRecord;
use std::collections::{
    BTreeMap,
    HashSet,
};
use tracing::warn;

/// All successfully collected `BucketRecord`s of a run.
///
/// The table is complete before any report is rendered and never changes
/// afterwards.
#[derive(Debug, Default)]
pub struct InsightTable {
    records: Vec<BucketRecord>,
    skipped: usize,
}

impl InsightTable {
    /// Builds the table from collection outcomes, logging every skipped
    /// bucket.
    ///
    /// Bucket names are unique within a table, a repeated name is skipped.
    pub fn from_outcomes(outcomes: Vec<BucketOutcome>) -> Self {
        let mut records = Vec::with_capacity(outcomes.len());
        let mut seen    = HashSet::new();
        let mut skipped = 0;

        for outcome in outcomes {
            match outcome {
                BucketOutcome::Collected(record) => {
                    if !seen.insert(record.bucket_name.clone()) {
                        warn!(
                            "Bucket '{}' was collected twice, keeping the first record.",
                            record.bucket_name,
                        );

                        skipped += 1;
                        continue;
                    }

                    records.push(record);
                },
                BucketOutcome::Skipped { bucket, reason } => {
                    warn!(
                        "An unexpected error occurred while analyzing bucket '{}': {:#}",
                        bucket,
                        reason,
                    );

                    skipped += 1;
                },
            }
        }

        Self {
            records,
            skipped,
        }
    }

    /// Every record, in collection order.
    pub fn records(&self) -> &[BucketRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if no bucket was collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of buckets that were left out.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Bucket count per region, in ascending region order.
    pub fn region_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();

        for record in self.records() {
            *counts.entry(record.region.as_str()).or_insert(0) += 1;
        }

        counts
    }

    /// Distinct regions, in ascending order.
    pub fn regions(&self) -> Vec<&str> {
        self.region_counts()
            .into_keys()
            .collect()
    }

    /// Records in `region`, in collection order.
    pub fn records_in<'a>(
        &'a self,
        region: &'a str,
    ) -> impl Iterator<Item = &'a BucketRecord> + 'a {
        self.records()
            .iter()
            .filter(move |record| record.region == region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use crate::common::fixtures::record;
    use pretty_assertions::assert_eq;

    fn table() -> InsightTable {
        InsightTable::from_outcomes(vec![
            BucketOutcome::Collected(record("logs", "us-east-1")),
            BucketOutcome::Collected(record("assets", "eu-west-1")),
            BucketOutcome::Skipped {
                bucket: "broken".into(),
                reason: anyhow!("AccessDenied"),
            },
            BucketOutcome::Collected(record("backups", "us-east-1")),
            BucketOutcome::Collected(record("assets", "eu-west-2")),
        ])
    }

    #[test]
    fn test_from_outcomes() {
        let table = table();

        let names: Vec<&str> = table.records()
            .iter()
            .map(|record| record.bucket_name.as_str())
            .collect();

        assert_eq!(names, vec!["logs", "assets", "backups"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.skipped(), 2);
    }

    #[test]
    fn test_region_counts() {
        let table = table();

        let expected = BTreeMap::from([
            ("eu-west-1", 1),
            ("us-east-1", 2),
        ]);

        assert_eq!(table.region_counts(), expected);
        assert_eq!(table.regions(), vec!["eu-west-1", "us-east-1"]);

        for (region, count) in table.region_counts() {
            assert_eq!(table.records_in(region).count(), count);
        }
    }

    #[test]
    fn test_empty() {
        let table = InsightTable::from_outcomes(vec![
            BucketOutcome::Skipped {
                bucket: "broken".into(),
                reason: anyhow!("AccessDenied"),
            },
        ]);

        assert!(table.is_empty());
        assert!(table.regions().is_empty());
    }
}
