use crate::domain::model::AnalysisResult;
use crate::render::fonts::Font;
use crate::render::layout::{BlockKind, CellOpts, Document, DocumentBuilder, Rgb, Width};
use crate::render::pdf;
use crate::utils::error::{ReportError, Result};

pub const REPORT_TITLE: &str = "Data Analysis Report";
pub const FOOTER_TEXT: &str = "End of Report - Generated by Data Analysis Tool";

/// Width in mm of a bar whose value equals the scale maximum.
pub const BAR_FULL_WIDTH_MM: f64 = 100.0;
/// Smallest value the bars are scaled against, so two zero maxima never divide by zero.
pub const BAR_SCALE_FLOOR: f64 = 1.0;

const LABEL_WIDTH_MM: f64 = 40.0;
const ROW_HEIGHT_MM: f64 = 8.0;

const HEADER_FILL: Rgb = Rgb(200, 220, 255);
const VALUE1_FILL: Rgb = Rgb(100, 200, 100);
const VALUE2_FILL: Rgb = Rgb(100, 100, 200);

/// The value a full-width bar represents.
pub fn bar_scale_max(result: &AnalysisResult) -> f64 {
    result.value1.max.max(result.value2.max).max(BAR_SCALE_FLOOR)
}

/// Bar width in mm; negative values draw nothing.
pub fn bar_width(value: f64, scale_max: f64) -> f64 {
    (value / scale_max * BAR_FULL_WIDTH_MM).max(0.0)
}

/// Lays the report out and serializes it to PDF.
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(result: &AnalysisResult, source: &str) -> Result<Vec<u8>> {
        let document = Self::build_document(result, source)?;
        tracing::debug!("Laid out {} blocks", document.blocks.len());
        Ok(pdf::serialize(&document))
    }

    pub fn build_document(result: &AnalysisResult, source: &str) -> Result<Document> {
        if result.is_empty() {
            return Err(ReportError::RenderError {
                message: "analysis result is empty".to_string(),
            });
        }

        let mut doc = DocumentBuilder::a4(REPORT_TITLE);

        doc.set_font(Font::bold(16.0));
        doc.cell(BlockKind::Text, Width::ToMargin, 10.0, REPORT_TITLE, CellOpts::centered());
        doc.ln(10.0);
        doc.ln(10.0);

        doc.set_font(Font::regular(10.0));
        for line in [
            format!("Generated on: {}", result.generated_on),
            format!("Data source: {}", source),
            format!("Records analyzed: {}", result.count),
        ] {
            doc.cell(BlockKind::Text, Width::ToMargin, 6.0, line, CellOpts::default());
            doc.ln(6.0);
        }
        doc.ln(10.0);

        Self::statistics_table(&mut doc, result);
        Self::bars(&mut doc, result);

        doc.ln(20.0);
        doc.set_font(Font::italic(8.0));
        doc.cell(BlockKind::Text, Width::ToMargin, 6.0, FOOTER_TEXT, CellOpts::centered());

        Ok(doc.finish())
    }

    fn section_header(doc: &mut DocumentBuilder, text: &str) {
        doc.set_font(Font::bold(12.0));
        doc.cell(BlockKind::Text, Width::ToMargin, 8.0, text, CellOpts::default());
        doc.ln(8.0);
        doc.set_font(Font::regular(10.0));
    }

    fn statistics_table(doc: &mut DocumentBuilder, result: &AnalysisResult) {
        Self::section_header(doc, "Summary Statistics");

        let col = Width::Fixed(doc.page_width() / 4.0);

        doc.set_fill_color(HEADER_FILL);
        for heading in ["Metric", "Value 1", "Value 2"] {
            doc.cell(BlockKind::TableCell, col, ROW_HEIGHT_MM, heading, CellOpts::bordered().with_fill());
        }
        doc.ln(ROW_HEIGHT_MM);

        let rows = [
            ("Average", result.value1.avg, result.value2.avg, ROW_HEIGHT_MM),
            ("Minimum", result.value1.min, result.value2.min, ROW_HEIGHT_MM),
            ("Maximum", result.value1.max, result.value2.max, 15.0),
        ];
        for (metric, value1, value2, advance) in rows {
            doc.cell(BlockKind::TableCell, col, ROW_HEIGHT_MM, metric, CellOpts::bordered());
            doc.cell(BlockKind::TableCell, col, ROW_HEIGHT_MM, format!("{:.2}", value1), CellOpts::bordered());
            doc.cell(BlockKind::TableCell, col, ROW_HEIGHT_MM, format!("{:.2}", value2), CellOpts::bordered());
            doc.ln(advance);
        }
    }

    fn bars(doc: &mut DocumentBuilder, result: &AnalysisResult) {
        Self::section_header(doc, "Data Visualization");

        let scale_max = bar_scale_max(result);
        let series = [
            ("Value 1 Avg:", result.value1.avg, VALUE1_FILL),
            ("Value 2 Avg:", result.value2.avg, VALUE2_FILL),
        ];
        for (label, value, color) in series {
            doc.cell(BlockKind::Text, Width::Fixed(LABEL_WIDTH_MM), ROW_HEIGHT_MM, label, CellOpts::default());
            doc.set_fill_color(color);
            doc.cell(
                BlockKind::Bar,
                Width::Fixed(bar_width(value, scale_max)),
                ROW_HEIGHT_MM,
                format!(" {:.2}", value),
                CellOpts::filled(),
            );
            doc.ln(ROW_HEIGHT_MM);
        }
    }
}
