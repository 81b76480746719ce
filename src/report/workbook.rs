// Spreadsheet report, one sheet per region
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use crate::table::InsightTable;
use rust_xlsxwriter::{
    Format,
    Workbook,
    Worksheet,
};
use std::path::PathBuf;
use super::{
    region_table,
    summary_table,
    Cell,
    ReportContext,
    TableData,
};
use tracing::info;

/// Name of the first sheet.
pub const SUMMARY_SHEET: &str = "Summary";

/// Writes the workbook report: a `Summary` sheet with the bucket count per
/// region, then one sheet per region listing all of its records.
///
/// Returns `None` without writing anything if the table is empty.
pub fn write_workbook(
    table: &InsightTable,
    context: &ReportContext,
) -> Result<Option<PathBuf>> {
    if table.is_empty() {
        info!("No buckets were found. Excel report not generated.");

        return Ok(None);
    }

    let path          = context.path("xlsx");
    let header_format = Format::new().set_bold();
    let mut workbook  = Workbook::new();

    info!("Creating Excel summary sheet...");

    write_sheet(
        workbook.add_worksheet(),
        SUMMARY_SHEET,
        &summary_table(table),
        &header_format,
    )?;

    for region in table.regions() {
        info!("Creating Excel sheet for region: {}...", region);

        write_sheet(
            workbook.add_worksheet(),
            region,
            &region_table(table, region, &[]),
            &header_format,
        )?;
    }

    workbook.save(&path)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;

    info!("Excel report generated successfully: {}", path.display());

    Ok(Some(path))
}

// Header row in bold, then the data rows below it.
fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    data: &TableData,
    header_format: &Format,
) -> Result<()> {
    worksheet.set_name(name)
        .with_context(|| format!("Invalid sheet name '{}'", name))?;

    for (col, heading) in data.header.iter().enumerate() {
        let col = u16::try_from(col)?;

        worksheet.write_string_with_format(0, col, heading, header_format)?;
    }

    for (row, cells) in data.rows.iter().enumerate() {
        let row = u32::try_from(row + 1)?;

        for (col, cell) in cells.iter().enumerate() {
            let col = u16::try_from(col)?;

            match cell {
                Cell::Text(text)   => worksheet.write_string(row, col, text)?,
                Cell::Count(count) => worksheet.write_number(row, col, *count as f64)?,
            };
        }
    }

    worksheet.autofit();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{
        context,
        empty_table,
        table,
    };
    use std::fs;

    #[test]
    fn test_write_workbook() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_workbook(&table(), &context(dir.path()))
            .unwrap()
            .unwrap();

        assert_eq!(
            path.file_name().unwrap(),
            "s3_bucket_report_default_20240630_123456.xlsx",
        );

        // xlsx files are zip archives.
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_workbook_empty() {
        let dir = tempfile::tempdir().unwrap();

        let ret = write_workbook(&empty_table(), &context(dir.path())).unwrap();

        assert!(ret.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_sheet_rejects_bad_name() {
        let mut workbook = Workbook::new();
        let format       = Format::new();

        let data = TableData {
            header: vec!["Region".into()],
            rows:   Vec::new(),
        };

        let ret = write_sheet(workbook.add_worksheet(), "bad[name]", &data, &format);

        assert!(ret.is_err());
    }
}
