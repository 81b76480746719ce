// PDF report, a summary followed by a section per region
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    anyhow,
    Context,
    Result,
};
use crate::common::{
    ACCOUNT_PROFILE_COLUMN,
    REGION_COLUMN,
};
use crate::table::InsightTable;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont,
    Color,
    IndirectFontRef,
    Mm,
    PdfDocument,
    PdfDocumentReference,
    PdfLayerReference,
    Rect,
    Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use super::{
    region_table,
    summary_table,
    ReportContext,
    TableData,
};
use tracing::info;

/// Title of the PDF report.
pub const DOCUMENT_TITLE: &str = "AWS S3 Bucket Analysis Report";

// US letter, landscape.
const PAGE_WIDTH: f32  = 279.4;
const PAGE_HEIGHT: f32 = 215.9;
const MARGIN: f32      = 12.7;

// Vertical space after each block, half an inch.
const SPACER: f32 = 12.7;

const H1_SIZE: f32     = 18.0;
const H2_SIZE: f32     = 14.0;
const NORMAL_SIZE: f32 = 10.0;
const TABLE_SIZE: f32  = 8.0;

const HEADER_ROW_HEIGHT: f32 = 9.0;
const ROW_HEIGHT: f32        = 6.5;
const CELL_PADDING: f32      = 2.5;
const GRID_THICKNESS: f32    = 1.0;

// Millimetres per typographic point.
const PT_TO_MM: f32 = 0.352_778;

// Built-in fonts carry no metrics we can read, so text width is estimated
// from an average Helvetica glyph width as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.55;

// Columns left out of the per-region tables, the section already names them.
const OMITTED_COLUMNS: [&str; 2] = [
    ACCOUNT_PROFILE_COLUMN,
    REGION_COLUMN,
];

/// Writes the PDF report: title block, a summary of bucket counts per region,
/// then one section per region with that region's records.
///
/// Returns `None` without writing anything if the table is empty.
pub fn write_document(
    table: &InsightTable,
    context: &ReportContext,
) -> Result<Option<PathBuf>> {
    if table.is_empty() {
        info!("No buckets were found. PDF report not generated.");

        return Ok(None);
    }

    let path = context.path("pdf");

    info!("Creating PDF report...");

    let mut writer = DocumentWriter::new(DOCUMENT_TITLE)?;

    writer.heading(DOCUMENT_TITLE, H1_SIZE);
    writer.heading(&format!("Account Profile: {}", context.profile), H2_SIZE);
    writer.paragraph(&format!("Report Generated: {}", context.generated_label()));
    writer.space(SPACER);

    writer.heading("Account Summary by Region", H2_SIZE);
    writer.table(&summary_table(table));
    writer.space(SPACER);

    for region in table.regions() {
        info!("Creating PDF section for region: {}...", region);

        let data = region_table(table, region, &OMITTED_COLUMNS);

        writer.heading(&format!("Detailed Report for Region: {}", region), H2_SIZE);
        writer.table(&data);
        writer.space(SPACER);
    }

    let file = File::create(&path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;

    writer.save(file)?;

    info!("PDF report generated successfully: {}", path.display());

    Ok(Some(path))
}

/// Colours and font of one kind of table row.
struct RowStyle {
    fill: Color,
    text: Color,
    bold: bool,
    height: f32,
}

impl RowStyle {
    fn header() -> Self {
        Self {
            fill:   rgb(0.5, 0.5, 0.5),
            text:   rgb(0.96, 0.96, 0.96),
            bold:   true,
            height: HEADER_ROW_HEIGHT,
        }
    }

    fn data() -> Self {
        Self {
            fill:   rgb(0.96, 0.96, 0.86),
            text:   rgb(0.0, 0.0, 0.0),
            bold:   false,
            height: ROW_HEIGHT,
        }
    }
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Lays content out top to bottom, starting a new page whenever the next
/// block doesn't fit.
struct DocumentWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    // Distance of the next line from the bottom of the page.
    cursor: f32,
}

impl DocumentWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );

        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("Failed to load Helvetica: {:?}", e))?;

        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("Failed to load Helvetica-Bold: {:?}", e))?;

        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );

        self.layer  = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            self.new_page();
        }
    }

    fn space(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn heading(&mut self, text: &str, size: f32) {
        // Keep a heading together with the start of whatever follows it.
        let line = size * PT_TO_MM * 1.6;
        self.ensure_space(line + HEADER_ROW_HEIGHT + ROW_HEIGHT);

        self.cursor -= line;
        self.layer.set_fill_color(rgb(0.0, 0.0, 0.0));
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.cursor), &self.bold);
    }

    fn paragraph(&mut self, text: &str) {
        let line = NORMAL_SIZE * PT_TO_MM * 1.6;
        self.ensure_space(line);

        self.cursor -= line;
        self.layer.set_fill_color(rgb(0.0, 0.0, 0.0));
        self.layer.use_text(text, NORMAL_SIZE, Mm(MARGIN), Mm(self.cursor), &self.regular);
    }

    fn table(&mut self, data: &TableData) {
        let widths = column_widths(data, PAGE_WIDTH - 2.0 * MARGIN);
        let header = RowStyle::header();
        let body   = RowStyle::data();

        self.ensure_space(header.height + body.height);
        self.row(&data.header, &widths, &header);

        for row in &data.rows {
            // Carry on over a page break with the header repeated.
            if self.cursor - body.height < MARGIN {
                self.new_page();
                self.row(&data.header, &widths, &header);
            }

            let cells: Vec<String> = row.iter()
                .map(|cell| cell.to_string())
                .collect();

            self.row(&cells, &widths, &body);
        }
    }

    // Shaded, gridded cells with centered text.
    fn row(&mut self, cells: &[String], widths: &[f32], style: &RowStyle) {
        let top    = self.cursor;
        let bottom = top - style.height;
        let font   = if style.bold { &self.bold } else { &self.regular };

        self.layer.set_outline_color(rgb(0.0, 0.0, 0.0));
        self.layer.set_outline_thickness(GRID_THICKNESS);

        let mut left = MARGIN;

        for (cell, width) in cells.iter().zip(widths) {
            self.layer.set_fill_color(style.fill.clone());
            self.layer.add_rect(
                Rect::new(Mm(left), Mm(bottom), Mm(left + width), Mm(top))
                    .with_mode(PaintMode::FillStroke),
            );

            let text = fit_text(cell, width - 2.0 * CELL_PADDING, TABLE_SIZE);
            let text_left = left + (width - text_width(&text, TABLE_SIZE)) / 2.0;
            let baseline  = bottom + (style.height - TABLE_SIZE * PT_TO_MM) / 2.0;

            self.layer.set_fill_color(style.text.clone());
            self.layer.use_text(text, TABLE_SIZE, Mm(text_left), Mm(baseline), font);

            left += width;
        }

        self.cursor = bottom;
    }

    fn save(self, file: File) -> Result<()> {
        self.doc.save(&mut BufWriter::new(file))
            .map_err(|e| anyhow!("Failed to write PDF: {:?}", e))
    }
}

// Estimated rendered width of `text`, in millimetres.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVERAGE_GLYPH_WIDTH * PT_TO_MM
}

// Widths that fit the widest cell of each column, scaled down together when
// the table would be wider than `available`.
fn column_widths(data: &TableData, available: f32) -> Vec<f32> {
    let mut widths: Vec<f32> = data.header.iter()
        .map(|heading| text_width(heading, TABLE_SIZE) + 2.0 * CELL_PADDING)
        .collect();

    for row in &data.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            let needed = text_width(&cell.to_string(), TABLE_SIZE) + 2.0 * CELL_PADDING;
            *width = width.max(needed);
        }
    }

    let total: f32 = widths.iter().sum();

    if total > available {
        let scale = available / total;

        for width in &mut widths {
            *width *= scale;
        }
    }

    widths
}

// Truncates `text` with a trailing "..." so it fits within `width`.
fn fit_text(text: &str, width: f32, size: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }

    let mut fitted: String = text.chars().collect();

    while !fitted.is_empty() && text_width(&format!("{}...", fitted), size) > width {
        fitted.pop();
    }

    format!("{}...", fitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{
        context,
        empty_table,
        table,
    };
    use crate::report::Cell;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_document(&table(), &context(dir.path()))
            .unwrap()
            .unwrap();

        assert_eq!(
            path.file_name().unwrap(),
            "s3_bucket_report_default_20240630_123456.pdf",
        );

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn test_write_document_empty() {
        let dir = tempfile::tempdir().unwrap();

        let ret = write_document(&empty_table(), &context(dir.path())).unwrap();

        assert!(ret.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_document_many_pages() {
        let dir = tempfile::tempdir().unwrap();

        let outcomes = (0..200)
            .map(|i| {
                let name = format!("bucket-{:03}", i);
                let region = if i % 2 == 0 { "eu-west-1" } else { "us-east-1" };

                crate::collector::BucketOutcome::Collected(
                    crate::common::fixtures::record(&name, region),
                )
            })
            .collect();

        let table = InsightTable::from_outcomes(outcomes);

        let path = write_document(&table, &context(dir.path()))
            .unwrap()
            .unwrap();

        assert!(fs::metadata(path).unwrap().len() > 0);
    }

    #[test]
    fn test_column_widths_fit_page() {
        let data = TableData {
            header: vec!["Bucket Name".into(), "Total Storage".into()],
            rows:   vec![
                vec![Cell::Text("x".repeat(500)), Cell::Text("1.00 KB".into())],
            ],
        };

        let available = PAGE_WIDTH - 2.0 * MARGIN;
        let widths    = column_widths(&data, available);
        let total: f32 = widths.iter().sum();

        assert_eq!(widths.len(), 2);
        assert!(total <= available + 0.01);
        assert!(widths[0] > widths[1]);
    }

    #[test]
    fn test_column_widths_grow_with_content() {
        let data = TableData {
            header: vec!["Region".into()],
            rows:   vec![vec![Cell::Text("ap-southeast-1".into())]],
        };

        let widths = column_widths(&data, 1000.0);

        let expected = text_width("ap-southeast-1", TABLE_SIZE) + 2.0 * CELL_PADDING;

        assert!((widths[0] - expected).abs() < 0.001);
    }

    #[test]
    fn test_fit_text() {
        assert_eq!(fit_text("short", 100.0, TABLE_SIZE), "short");

        let long   = "a-very-long-bucket-name-that-will-not-fit";
        let fitted = fit_text(long, 20.0, TABLE_SIZE);

        assert!(fitted.ends_with("..."));
        assert!(text_width(&fitted, TABLE_SIZE) <= 20.0);
    }
}
