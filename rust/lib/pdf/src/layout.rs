//! Places flowables into the page frame and produces positioned drawing
//! operations, one list per page. Coordinates are PDF user space: origin at
//! the bottom-left corner, y growing upwards.

use crate::flowable::{Flowable, Paragraph, Table};
use crate::font::Font;
use crate::geometry::{Color, Margins, PageSize};
use crate::style::{Align, CellStyle};

/// A positioned drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    /// A single line of text with its baseline starting at `(x, y)`.
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
        text: String,
    },
}

/// Drawing operations of one page, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text drawn on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

pub(crate) struct Layout {
    page_size: PageSize,
    margins: Margins,
    pages: Vec<Page>,
    cursor: f32,
}

impl Layout {
    pub(crate) fn new(page_size: PageSize, margins: Margins) -> Self {
        Self {
            page_size,
            margins,
            pages: vec![Page::default()],
            cursor: page_size.height - margins.top,
        }
    }

    pub(crate) fn finish(self) -> Vec<Page> {
        self.pages
    }

    pub(crate) fn place(&mut self, flowable: &Flowable) {
        match flowable {
            Flowable::Paragraph(p) => self.place_paragraph(p),
            Flowable::Spacer(height) => self.place_spacer(*height),
            Flowable::Table(t) => self.place_table(t),
        }
    }

    fn frame_width(&self) -> f32 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.margins.bottom
    }

    fn page(&mut self) -> &mut Page {
        // `pages` starts non-empty and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, |p| p.ops.is_empty())
    }

    /// Start a new page unless the current one is still blank.
    fn ensure_room(&mut self, height: f32) {
        if height > self.remaining() && !self.page_is_empty() {
            self.pages.push(Page::default());
            self.cursor = self.page_size.height - self.margins.top;
        }
    }

    fn place_spacer(&mut self, height: f32) {
        if height > self.remaining() {
            // A gap at the foot of a page is swallowed by the page break.
            self.ensure_room(height);
            return;
        }
        self.cursor -= height;
    }

    fn place_paragraph(&mut self, paragraph: &Paragraph) {
        let style = &paragraph.style;
        let width = self.frame_width();
        let lines = wrap(&paragraph.text, style.font, style.font_size, width);
        let height = style.space_before + lines.len() as f32 * style.leading + style.space_after;
        self.ensure_room(height);

        let left = self.margins.left;
        let mut baseline = self.cursor - style.space_before - style.font_size;
        for line in lines {
            let line_width = style.font.text_width(&line, style.font_size);
            let x = align_x(style.align, left, width, line_width, 0.0, 0.0);
            self.page().ops.push(DrawOp::Text {
                x,
                y: baseline,
                font: style.font,
                size: style.font_size,
                color: style.color,
                text: line,
            });
            baseline -= style.leading;
        }
        self.cursor -= height;
    }

    fn place_table(&mut self, table: &Table) {
        let cols = table.col_widths().len();
        let styles = table.style().resolve(cols, table.rows().len());

        // Tables are centered in the frame.
        let x0 = self.margins.left + (self.frame_width() - table.width()) / 2.0;
        let mut col_x = Vec::with_capacity(cols);
        let mut x = x0;
        for w in table.col_widths() {
            col_x.push(x);
            x += w;
        }

        // Grid strokes are painted after the page's backgrounds so a
        // neighbouring fill never covers a shared edge.
        let mut strokes: Vec<DrawOp> = Vec::new();

        for (row, cells) in table.rows().iter().zip(&styles) {
            let height = cells.iter().map(CellStyle::height).fold(0.0, f32::max);
            if height > self.remaining() && !self.page_is_empty() {
                let pending = std::mem::take(&mut strokes);
                self.page().ops.extend(pending);
            }
            self.ensure_room(height);
            let bottom = self.cursor - height;

            for (i, (text, style)) in row.iter().zip(cells).enumerate() {
                let (cx, cw) = (col_x[i], table.col_widths()[i]);
                if let Some(color) = style.background {
                    self.page().ops.push(DrawOp::FillRect {
                        x: cx,
                        y: bottom,
                        width: cw,
                        height,
                        color,
                    });
                }
                if !text.is_empty() {
                    let text_width = style.font.text_width(text, style.font_size);
                    self.page().ops.push(DrawOp::Text {
                        x: align_x(
                            style.align,
                            cx,
                            cw,
                            text_width,
                            style.left_padding,
                            style.right_padding,
                        ),
                        y: bottom + style.bottom_padding + 0.2 * style.font_size,
                        font: style.font,
                        size: style.font_size,
                        color: style.text_color,
                        text: text.clone(),
                    });
                }
                if let Some(rule) = style.grid {
                    strokes.extend(cell_border(cx, bottom, cw, height, rule.width, rule.color));
                }
            }
            self.cursor = bottom;
        }
        self.page().ops.extend(strokes);
    }
}

fn align_x(align: Align, x: f32, width: f32, text_width: f32, pad_left: f32, pad_right: f32) -> f32 {
    match align {
        Align::Left => x + pad_left,
        Align::Center => x + (width - text_width) / 2.0,
        Align::Right => x + width - pad_right - text_width,
    }
}

fn cell_border(x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) -> [DrawOp; 4] {
    let line = |x1, y1, x2, y2| DrawOp::Line {
        x1,
        y1,
        x2,
        y2,
        width,
        color,
    };
    [
        line(x, y, x + w, y),
        line(x, y + h, x + w, y + h),
        line(x, y, x, y + h),
        line(x + w, y, x + w, y + h),
    ]
}

/// Greedy word wrap. A single word wider than the frame gets its own line.
fn wrap(text: &str, font: Font, size: f32, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.text_width(&candidate, size) <= width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
