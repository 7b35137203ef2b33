use crate::error::PdfError;
use crate::style::{ParagraphStyle, TableStyle};

/// A block of content placed top to bottom in the page frame.
#[derive(Debug, Clone)]
pub enum Flowable {
    Paragraph(Paragraph),
    /// Vertical gap in points.
    Spacer(f32),
    Table(Table),
}

impl From<Paragraph> for Flowable {
    fn from(p: Paragraph) -> Self {
        Flowable::Paragraph(p)
    }
}

impl From<Table> for Flowable {
    fn from(t: Table) -> Self {
        Flowable::Table(t)
    }
}

/// Word-wrapped text in a single style.
#[derive(Debug, Clone)]
pub struct Paragraph {
    pub text: String,
    pub style: ParagraphStyle,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A grid of single-line text cells with fixed column widths.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Vec<String>>,
    col_widths: Vec<f32>,
    style: TableStyle,
}

impl Table {
    /// Every row must have exactly one cell per column width.
    pub fn new(rows: Vec<Vec<String>>, col_widths: Vec<f32>) -> Result<Self, PdfError> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != col_widths.len())
        {
            return Err(PdfError::Layout(format!(
                "table row {i} has {} cells, expected {}",
                row.len(),
                col_widths.len()
            )));
        }
        Ok(Self {
            rows,
            col_widths,
            style: TableStyle::default(),
        })
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn col_widths(&self) -> &[f32] {
        &self.col_widths
    }

    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }
}
