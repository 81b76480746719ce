// Report generation from the insight table
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use chrono::{
    DateTime,
    Local,
};
use crate::common::COLUMNS;
use crate::table::InsightTable;
use std::fmt;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};
use tracing::info;

/// Landscape PDF report.
mod document;

/// Multi-sheet spreadsheet report.
mod workbook;

pub use document::*;
pub use workbook::*;

/// Base name of every report file.
pub const REPORT_NAME: &str = "s3_bucket_report";

/// Heading of the region column in the summary tables.
pub const SUMMARY_REGION_COLUMN: &str = "Region";

/// Heading of the count column in the summary tables.
pub const SUMMARY_COUNT_COLUMN: &str = "Bucket Count";

/// Where and for whom a set of reports is generated.
#[derive(Debug)]
pub struct ReportContext<'a> {
    /// AWS profile the data was collected with.
    pub profile: &'a str,

    /// Directory the reports are written to.
    pub output_dir: &'a Path,

    /// Generation time, shared by every report of a run.
    pub generated_at: DateTime<Local>,
}

impl<'a> ReportContext<'a> {
    /// Path of the report with the given file `extension`.
    ///
    /// `<output_dir>/s3_bucket_report_<profile>_<YYYYmmdd_HHMMSS>.<extension>`
    pub fn path(&self, extension: &str) -> PathBuf {
        let file_name = format!(
            "{}_{}_{}.{}",
            REPORT_NAME,
            self.profile,
            self.generated_at.format("%Y%m%d_%H%M%S"),
            extension,
        );

        self.output_dir.join(file_name)
    }

    /// Human readable generation time.
    pub fn generated_label(&self) -> String {
        self.generated_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// A single table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Free text.
    Text(String),

    /// A count, written as a number where the format allows it.
    Count(usize),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text)   => f.write_str(text),
            Self::Count(count) => write!(f, "{}", count),
        }
    }
}

/// A header row plus data rows, ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct TableData {
    /// Column headings.
    pub header: Vec<String>,

    /// Data rows, each as wide as `header`.
    pub rows: Vec<Vec<Cell>>,
}

/// Region to bucket count table, in ascending region order.
pub fn summary_table(table: &InsightTable) -> TableData {
    let rows = table.region_counts()
        .into_iter()
        .map(|(region, count)| {
            vec![
                Cell::Text(region.to_string()),
                Cell::Count(count),
            ]
        })
        .collect();

    TableData {
        header: vec![
            SUMMARY_REGION_COLUMN.to_string(),
            SUMMARY_COUNT_COLUMN.to_string(),
        ],
        rows,
    }
}

/// Every record in `region`, with the columns named in `omit` left out.
pub fn region_table(
    table: &InsightTable,
    region: &str,
    omit: &[&str],
) -> TableData {
    let keep: Vec<bool> = COLUMNS.iter()
        .map(|column| !omit.contains(column))
        .collect();

    let header = COLUMNS.iter()
        .zip(&keep)
        .filter(|(_, keep)| **keep)
        .map(|(column, _)| column.to_string())
        .collect();

    let rows = table.records_in(region)
        .map(|record| {
            record.cells()
                .into_iter()
                .zip(&keep)
                .filter(|(_, keep)| **keep)
                .map(|(cell, _)| Cell::Text(cell))
                .collect()
        })
        .collect();

    TableData {
        header,
        rows,
    }
}

/// Writes both reports for `table`, returning the paths written.
///
/// Nothing is written for an empty table.
pub fn generate(table: &InsightTable, context: &ReportContext) -> Result<Vec<PathBuf>> {
    if table.is_empty() {
        info!("No buckets were found. Reports not generated.");

        return Ok(Vec::new());
    }

    fs::create_dir_all(context.output_dir)
        .with_context(|| {
            format!(
                "Failed to create report directory '{}'",
                context.output_dir.display(),
            )
        })?;

    let mut paths = Vec::new();

    if let Some(path) = write_workbook(table, context)? {
        paths.push(path);
    }

    if let Some(path) = write_document(table, context)? {
        paths.push(path);
    }

    Ok(paths)
}
