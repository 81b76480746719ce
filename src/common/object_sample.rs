// Object listing entries and the summary derived from sampling them
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    Utc,
};
use std::collections::{
    BTreeMap,
    BTreeSet,
};
use super::WorkingStatus;

/// Maximum number of objects inspected per bucket.
pub const SAMPLE_SIZE_CAP: usize = 1000;

/// A single object from a bucket listing.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectEntry {
    /// Object key.
    pub key: String,

    /// Last modification time, if the listing included one.
    pub last_modified: Option<DateTime<Utc>>,

    /// Object size in bytes.
    pub size: u64,
}

/// One page of a bucket listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectPage {
    /// Objects on this page, in listing order.
    pub objects: Vec<ObjectEntry>,

    /// Token for the next page, `None` on the last page.
    pub next_token: Option<String>,
}

/// Statistics gathered from a bounded scan of a bucket's objects.
///
/// For buckets larger than the sample cap these describe a sample, not the
/// whole bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectSampleSummary {
    /// Earliest modification time seen.
    pub first_seen: Option<DateTime<Utc>>,

    /// Latest modification time seen.
    pub last_seen: Option<DateTime<Utc>>,

    /// Distinct first path segments of keys containing a `/`.
    pub top_level_prefixes: BTreeSet<String>,

    /// Lowercase file extension to number of objects.
    pub extension_histogram: BTreeMap<String, usize>,

    /// Number of objects inspected.
    pub objects_scanned: usize,

    /// Total size of the inspected objects.
    pub bytes_scanned: u64,
}

impl ObjectSampleSummary {
    /// Folds a single object into the running aggregates.
    pub fn observe(&mut self, object: &ObjectEntry) {
        self.objects_scanned += 1;
        self.bytes_scanned   += object.size;

        if let Some(modified) = object.last_modified {
            if self.first_seen.map_or(true, |first| modified < first) {
                self.first_seen = Some(modified);
            }

            if self.last_seen.map_or(true, |last| modified > last) {
                self.last_seen = Some(modified);
            }
        }

        if let Some(prefix) = top_level_prefix(&object.key) {
            self.top_level_prefixes.insert(prefix.to_string());
        }

        if let Some(extension) = extension(&object.key) {
            *self.extension_histogram.entry(extension).or_insert(0) += 1;
        }
    }

    /// Whether the newest object seen makes this a working bucket.
    pub fn working_status(&self, now: DateTime<Utc>) -> WorkingStatus {
        WorkingStatus::from_last_seen(self.last_seen, now)
    }
}

// First path segment, only for keys that have more than one.
fn top_level_prefix(key: &str) -> Option<&str> {
    key.split_once('/').map(|(prefix, _)| prefix)
}

// Lowercase suffix after the final '.' of the base filename. Dots in the
// directory part of the key don't count.
fn extension(key: &str) -> Option<String> {
    let basename = key.rsplit('/').next().unwrap_or(key);

    basename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn entry(key: &str, last_modified: Option<DateTime<Utc>>) -> ObjectEntry {
        ObjectEntry {
            key:           key.into(),
            last_modified: last_modified,
            size:          10,
        }
    }

    #[test]
    fn test_extension() {
        let tests = vec![
            ("a/b/file.TXT",       Some("txt")),
            ("c.tar.gz",           Some("gz")),
            ("noext",              None),
            ("dir.v1/noext",       None),
            ("dir.v1/report.PDF",  Some("pdf")),
            ("folder/",            None),
            (".bashrc",            Some("bashrc")),
        ];

        for test in tests {
            let ret = extension(test.0);

            assert_eq!(ret.as_deref(), test.1, "key {}", test.0);
        }
    }

    #[test]
    fn test_top_level_prefix() {
        let tests = vec![
            ("a/b/file.txt", Some("a")),
            ("logs/",        Some("logs")),
            ("c.tar.gz",     None),
        ];

        for test in tests {
            let ret = top_level_prefix(test.0);

            assert_eq!(ret, test.1);
        }
    }

    #[test]
    fn test_observe() {
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let mut summary = ObjectSampleSummary::default();

        for key in ["a/b/file.TXT", "c.tar.gz", "noext"] {
            summary.observe(&entry(key, Some(timestamp)));
        }

        let expected = ObjectSampleSummary {
            first_seen:          Some(timestamp),
            last_seen:           Some(timestamp),
            top_level_prefixes:  BTreeSet::from(["a".to_string()]),
            extension_histogram: BTreeMap::from([
                ("gz".to_string(),  1),
                ("txt".to_string(), 1),
            ]),
            objects_scanned:     3,
            bytes_scanned:       30,
        };

        assert_eq!(summary, expected);
    }

    #[test]
    fn test_observe_tracks_first_and_last_seen() {
        let oldest = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let middle = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let newest = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

        let mut summary = ObjectSampleSummary::default();
        summary.observe(&entry("one.JSON", Some(middle)));
        summary.observe(&entry("two.json", Some(newest)));
        summary.observe(&entry("three.json", None));
        summary.observe(&entry("four.Json", Some(oldest)));

        assert_eq!(summary.first_seen, Some(oldest));
        assert_eq!(summary.last_seen, Some(newest));
        assert_eq!(summary.extension_histogram.get("json"), Some(&4));
        assert!(summary.top_level_prefixes.is_empty());
    }

    #[test]
    fn test_working_status_of_empty_summary() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let summary = ObjectSampleSummary::default();

        assert_eq!(summary.working_status(now), WorkingStatus::No);
    }
}
