//! Standard Type1 Helvetica faces and their advance widths.
//!
//! Only the three faces the report uses are supported; they are built into
//! every PDF reader so nothing needs embedding.

use crate::render::layout::PT_PER_MM;

/// Advance widths (1/1000 em) for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Width used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];

    pub fn base_font(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
        }
    }

    /// Name the page resources use for this face.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
            // the oblique face shares the upright metrics
            FontStyle::Regular | FontStyle::Italic => &HELVETICA_WIDTHS,
        }
    }

    fn char_width(self, c: char) -> u16 {
        match c {
            ' '..='~' => self.widths()[c as usize - 0x20],
            _ => FALLBACK_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub style: FontStyle,
    /// Size in points.
    pub size: f64,
}

impl Font {
    pub fn regular(size: f64) -> Self {
        Self { style: FontStyle::Regular, size }
    }

    pub fn bold(size: f64) -> Self {
        Self { style: FontStyle::Bold, size }
    }

    pub fn italic(size: f64) -> Self {
        Self { style: FontStyle::Italic, size }
    }

    pub fn size_mm(&self) -> f64 {
        self.size / PT_PER_MM
    }

    pub fn text_width_mm(&self, text: &str) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.style.char_width(c))).sum();
        f64::from(units) * self.size / 1000.0 / PT_PER_MM
    }
}
