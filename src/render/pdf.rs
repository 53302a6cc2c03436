//! Minimal PDF 1.4 writer for single-page [`Document`]s.
//!
//! The file is written object by object while recording byte offsets for the
//! cross-reference table. Content streams are left uncompressed and fonts are
//! the standard Type1 faces, so the output depends only on the document.

use crate::render::fonts::FontStyle;
use crate::render::layout::{Block, Document, Rgb, PT_PER_MM};
use std::fmt::Write as _;

const PRODUCER: &str = "data-report";

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const PAGE_ID: usize = 3;
const CONTENTS_ID: usize = 4;
const FIRST_FONT_ID: usize = 5;
const INFO_ID: usize = FIRST_FONT_ID + FontStyle::ALL.len();

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    /// Objects must be added in id order starting at 1.
    fn object(&mut self, id: usize, body: &[u8]) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.buf.len());
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;

        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for offset in &self.offsets {
            let _ = write!(xref, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, root, info, xref_offset
        );

        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

pub fn serialize(document: &Document) -> Vec<u8> {
    let content = content_stream(document);
    let mut writer = PdfWriter::new();

    writer.object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
    );
    writer.object(
        PAGES_ID,
        format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", PAGE_ID).as_bytes(),
    );

    let fonts: String = FontStyle::ALL
        .iter()
        .enumerate()
        .map(|(i, style)| format!("/{} {} 0 R ", style.resource_name(), FIRST_FONT_ID + i))
        .collect();
    writer.object(
        PAGE_ID,
        format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources << /Font << {}>> >> /Contents {} 0 R >>",
            PAGES_ID,
            number(document.width * PT_PER_MM),
            number(document.height * PT_PER_MM),
            fonts,
            CONTENTS_ID
        )
        .as_bytes(),
    );

    let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    stream.extend_from_slice(content.as_bytes());
    stream.extend_from_slice(b"\nendstream");
    writer.object(CONTENTS_ID, &stream);

    for (i, style) in FontStyle::ALL.iter().enumerate() {
        writer.object(
            FIRST_FONT_ID + i,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                style.base_font()
            )
            .as_bytes(),
        );
    }

    writer.object(
        INFO_ID,
        format!(
            "<< /Title ({}) /Producer ({}) >>",
            escape_text(&document.title),
            PRODUCER
        )
        .as_bytes(),
    );

    writer.finish(CATALOG_ID, INFO_ID)
}

fn content_stream(document: &Document) -> String {
    // black strokes, 0.2 mm rules
    let mut out = format!("0 G\n{} w\n", number(0.2 * PT_PER_MM));
    for block in &document.blocks {
        draw_block(&mut out, block, document.height);
    }
    out
}

fn draw_block(out: &mut String, block: &Block, page_height: f64) {
    let rect = block.rect;
    let x = number(rect.x * PT_PER_MM);
    let y = number((page_height - rect.y - rect.h) * PT_PER_MM);
    let w = number(rect.w * PT_PER_MM);
    let h = number(rect.h * PT_PER_MM);

    let has_area = rect.w > 0.0;
    let fill = block.fill.filter(|_| has_area);
    let op = match (fill, block.border && has_area) {
        (Some(_), true) => Some("B"),
        (Some(_), false) => Some("f"),
        (None, true) => Some("S"),
        (None, false) => None,
    };

    if let Some(op) = op {
        if let Some(color) = fill {
            let _ = writeln!(out, "{} rg", color_components(color));
        }
        let _ = writeln!(out, "{} {} {} {} re {}", x, y, w, h, op);
    }

    if !block.text.is_empty() {
        let (tx, ty) = block.text_origin();
        let _ = writeln!(
            out,
            "0 g BT /{} {} Tf {} {} Td ({}) Tj ET",
            block.font.style.resource_name(),
            number(block.font.size),
            number(tx * PT_PER_MM),
            number((page_height - ty) * PT_PER_MM),
            escape_text(&block.text)
        );
    }
}

fn color_components(Rgb(r, g, b): Rgb) -> String {
    let c = |v: u8| format!("{:.3}", f64::from(v) / 255.0);
    format!("{} {} {}", c(r), c(g), c(b))
}

/// Two decimals, without a negative zero.
fn number(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

/// Escape a string for a PDF literal in WinAnsi encoding.
///
/// Latin-1 characters are written as octal escapes; anything beyond is `?`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fonts::Font;
    use crate::render::layout::{BlockKind, CellOpts, DocumentBuilder, Width};

    fn sample_document() -> Document {
        let mut builder = DocumentBuilder::a4("Sample (draft)");
        builder.set_font(Font::bold(16.0));
        builder.cell(BlockKind::Text, Width::ToMargin, 10.0, "Hello", CellOpts::centered());
        builder.ln(10.0);
        builder.set_fill_color(Rgb(100, 200, 100));
        builder.cell(BlockKind::Bar, Width::Fixed(50.0), 8.0, " 1.00", CellOpts::filled());
        builder.cell(BlockKind::Bar, Width::Fixed(0.0), 8.0, " 0.00", CellOpts::filled());
        builder.ln(8.0);
        builder.set_font(Font::regular(10.0));
        builder.cell(BlockKind::TableCell, Width::Fixed(52.5), 8.0, "Metric", CellOpts::bordered());
        builder.finish()
    }

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn has_header_trailer_and_fonts() {
        let bytes = serialize(&sample_document());
        let pdf = text(&bytes);

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(pdf.contains("/BaseFont /Helvetica-Bold"));
        assert!(pdf.contains("/BaseFont /Helvetica-Oblique"));
        assert!(pdf.contains("/Title (Sample \\(draft\\))"));
        assert!(pdf.contains("(Hello) Tj"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = serialize(&sample_document());
        let pdf = text(&bytes);

        let startxref = pdf.rfind("startxref\n").unwrap() + "startxref\n".len();
        let xref_offset: usize = pdf[startxref..].lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_offset..].starts_with(b"xref\n0 9\n"));

        // the binary comment in the header is not UTF-8, so read the table from the raw bytes
        let table = text(&bytes[xref_offset..]);
        let entries: Vec<&str> = table.lines().skip(3).take(8).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj\n", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()), "object {}", i + 1);
        }
    }

    #[test]
    fn stream_length_matches_content() {
        let doc = sample_document();
        let bytes = serialize(&doc);
        let pdf = text(&bytes);

        let content = content_stream(&doc);
        assert!(pdf.contains(&format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content)));
    }

    #[test]
    fn zero_width_bars_draw_no_rectangle() {
        let doc = sample_document();
        let content = content_stream(&doc);

        // one filled bar, one bordered cell
        assert_eq!(content.matches(" re f").count(), 1);
        assert_eq!(content.matches(" re S").count(), 1);
        assert!(content.contains("0.392 0.784 0.392 rg"));
        assert!(content.contains("( 0.00) Tj"));
    }

    #[test]
    fn identical_documents_serialize_identically() {
        assert_eq!(serialize(&sample_document()), serialize(&sample_document()));
    }

    #[test]
    fn escapes_special_and_non_ascii_text() {
        assert_eq!(escape_text("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape_text("café"), "caf\\351");
        assert_eq!(escape_text("数据.csv"), "??.csv");
    }

    #[test]
    fn numbers_have_two_decimals() {
        assert_eq!(number(1.0), "1.00");
        assert_eq!(number(-0.001), "0.00");
        assert_eq!(number(28.3464), "28.35");
    }
}
