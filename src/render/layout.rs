//! Single-page layout model.
//!
//! A [`DocumentBuilder`] keeps a cursor on the page and lays cells out left to
//! right, top to bottom, in millimetres with the origin at the top-left
//! corner. Nothing wraps and nothing paginates: content that runs past the
//! bottom margin is placed off the printable area.

use crate::render::fonts::Font;

pub const PT_PER_MM: f64 = 72.0 / 25.4;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;
pub const PAGE_MARGIN_MM: f64 = 10.0;
/// Horizontal gap between a cell edge and its text.
pub const CELL_PADDING_MM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Text,
    TableCell,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub rect: Rect,
    pub text: String,
    pub font: Font,
    pub align: Align,
    pub border: bool,
    pub fill: Option<Rgb>,
}

impl Block {
    /// Start of the text baseline, in page millimetres.
    pub fn text_origin(&self) -> (f64, f64) {
        let text_width = self.font.text_width_mm(&self.text);
        let x = match self.align {
            Align::Left => self.rect.x + CELL_PADDING_MM,
            Align::Center => self.rect.x + (self.rect.w - text_width) / 2.0,
            Align::Right => self.rect.x + self.rect.w - CELL_PADDING_MM - text_width,
        };
        let y = self.rect.y + 0.5 * self.rect.h + 0.3 * self.font.size_mm();
        (x, y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn blocks_of(&self, kind: BlockKind) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |b| b.kind == kind)
    }

    pub fn find_text(&self, text: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.text == text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Width {
    Fixed(f64),
    /// Up to the right margin.
    ToMargin,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CellOpts {
    pub border: bool,
    pub fill: bool,
    pub align: Align,
}

impl CellOpts {
    pub fn bordered() -> Self {
        Self {
            border: true,
            ..Self::default()
        }
    }

    pub fn filled() -> Self {
        Self {
            fill: true,
            ..Self::default()
        }
    }

    pub fn centered() -> Self {
        Self {
            align: Align::Center,
            ..Self::default()
        }
    }

    pub fn with_fill(mut self) -> Self {
        self.fill = true;
        self
    }
}

pub struct DocumentBuilder {
    title: String,
    width: f64,
    height: f64,
    margin: f64,
    x: f64,
    y: f64,
    font: Font,
    fill: Rgb,
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn a4(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: A4_WIDTH_MM,
            height: A4_HEIGHT_MM,
            margin: PAGE_MARGIN_MM,
            x: PAGE_MARGIN_MM,
            y: PAGE_MARGIN_MM,
            font: Font::regular(12.0),
            fill: Rgb(255, 255, 255),
            blocks: Vec::new(),
        }
    }

    pub fn page_width(&self) -> f64 {
        self.width
    }

    pub fn cursor(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    /// Place a cell at the cursor and move the cursor to its right edge.
    pub fn cell(&mut self, kind: BlockKind, width: Width, h: f64, text: impl Into<String>, opts: CellOpts) {
        let w = match width {
            Width::Fixed(w) => w,
            Width::ToMargin => self.width - self.margin - self.x,
        };

        self.blocks.push(Block {
            kind,
            rect: Rect {
                x: self.x,
                y: self.y,
                w,
                h,
            },
            text: text.into(),
            font: self.font,
            align: opts.align,
            border: opts.border,
            fill: opts.fill.then_some(self.fill),
        });
        self.x += w;
    }

    /// Return to the left margin and move down by `h`.
    pub fn ln(&mut self, h: f64) {
        self.x = self.margin;
        self.y += h;
    }

    pub fn finish(self) -> Document {
        Document {
            title: self.title,
            width: self.width,
            height: self.height,
            blocks: self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_advance_right_then_down() {
        let mut builder = DocumentBuilder::a4("t");
        builder.cell(BlockKind::TableCell, Width::Fixed(20.0), 8.0, "a", CellOpts::bordered());
        builder.cell(BlockKind::TableCell, Width::Fixed(30.0), 8.0, "b", CellOpts::bordered());
        assert_eq!(builder.cursor(), (60.0, 10.0));

        builder.ln(8.0);
        assert_eq!(builder.cursor(), (10.0, 18.0));

        let doc = builder.finish();
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[1].rect, Rect { x: 30.0, y: 10.0, w: 30.0, h: 8.0 });
    }

    #[test]
    fn to_margin_width_fills_the_line() {
        let mut builder = DocumentBuilder::a4("t");
        builder.cell(BlockKind::Text, Width::Fixed(40.0), 6.0, "label", CellOpts::default());
        builder.cell(BlockKind::Text, Width::ToMargin, 6.0, "rest", CellOpts::default());

        let doc = builder.finish();
        assert_eq!(doc.blocks[1].rect.x, 50.0);
        assert_eq!(doc.blocks[1].rect.w, 150.0);
    }

    #[test]
    fn fill_colour_is_captured_only_when_requested() {
        let mut builder = DocumentBuilder::a4("t");
        builder.set_fill_color(Rgb(1, 2, 3));
        builder.cell(BlockKind::Bar, Width::Fixed(5.0), 8.0, "", CellOpts::filled());
        builder.cell(BlockKind::Text, Width::Fixed(5.0), 8.0, "", CellOpts::default());

        let doc = builder.finish();
        assert_eq!(doc.blocks[0].fill, Some(Rgb(1, 2, 3)));
        assert_eq!(doc.blocks[1].fill, None);
    }

    #[test]
    fn centered_text_is_symmetric() {
        let mut builder = DocumentBuilder::a4("t");
        builder.set_font(Font::bold(16.0));
        builder.cell(BlockKind::Text, Width::ToMargin, 10.0, "Title", CellOpts::centered());
        let doc = builder.finish();

        let block = &doc.blocks[0];
        let (x, _) = block.text_origin();
        let text_width = block.font.text_width_mm("Title");
        let left_gap = x - block.rect.x;
        let right_gap = block.rect.x + block.rect.w - (x + text_width);
        assert!((left_gap - right_gap).abs() < 1e-9);
    }
}
