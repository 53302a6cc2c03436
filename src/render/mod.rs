pub mod fonts;
pub mod layout;
pub mod pdf;
pub mod report;

pub use layout::{Block, BlockKind, Document};
pub use report::ReportRenderer;
