//! Programmatic PDF document assembly.
//!
//! A document is a *story*: an ordered list of [`Flowable`]s (paragraphs,
//! spacers, tables) that a [`DocTemplate`] lays out top to bottom inside the
//! page margins, breaking to a new page when the frame is full. Tables are
//! styled with [`StyleCommand`]s over cell ranges.
//!
//! ```ignore
//! let story = vec![
//!     Paragraph::new("Report", ParagraphStyle::heading1()).into(),
//!     Flowable::Spacer(12.0),
//!     Table::new(rows, vec![2.0 * INCH, 4.0 * INCH])?.with_style(style).into(),
//! ];
//! let bytes = DocTemplate::new(LETTER, Margins::uniform(INCH)).build(&story)?;
//! ```

pub mod error;
pub mod flowable;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod style;
mod writer;

pub use error::PdfError;
pub use flowable::{Flowable, Paragraph, Table};
pub use font::Font;
pub use geometry::{Color, Margins, PageSize, INCH, LETTER};
pub use layout::{DrawOp, Page};
pub use style::{cell, Align, Cell, ParagraphStyle, StyleCommand, TableStyle};

use layout::Layout;

/// Page geometry plus document metadata.
#[derive(Debug, Clone)]
pub struct DocTemplate {
    page_size: PageSize,
    margins: Margins,
    title: Option<String>,
}

impl DocTemplate {
    pub fn new(page_size: PageSize, margins: Margins) -> Self {
        Self {
            page_size,
            margins,
            title: None,
        }
    }

    /// Set the `/Title` entry of the document information dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Lay the story out without serializing it.
    pub fn layout(&self, story: &[Flowable]) -> Vec<Page> {
        let mut layout = Layout::new(self.page_size, self.margins);
        for flowable in story {
            layout.place(flowable);
        }
        layout.finish()
    }

    /// Lay the story out and serialize it to PDF bytes.
    pub fn build(&self, story: &[Flowable]) -> Result<Vec<u8>, PdfError> {
        let pages = self.layout(story);
        tracing::debug!(pages = pages.len(), "writing pdf");
        writer::write_pdf(&pages, self.page_size, self.title.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_story_is_one_blank_page() {
        let template = DocTemplate::new(LETTER, Margins::uniform(INCH));
        let pages = template.layout(&[]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].ops.is_empty());

        let bytes = template.build(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn output_is_deterministic() {
        let template = DocTemplate::new(LETTER, Margins::uniform(INCH)).with_title("Same");
        let story: Vec<Flowable> = vec![
            Paragraph::new("Heading", ParagraphStyle::heading1()).into(),
            Flowable::Spacer(10.0),
        ];
        assert_eq!(template.build(&story).unwrap(), template.build(&story).unwrap());
    }
}
