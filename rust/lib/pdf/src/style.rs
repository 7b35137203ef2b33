use crate::font::Font;
use crate::geometry::Color;

/// Horizontal alignment of a line of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Style of a paragraph flowable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub font: Font,
    pub font_size: f32,
    pub leading: f32,
    pub color: Color,
    pub align: Align,
    pub space_before: f32,
    pub space_after: f32,
}

impl Default for ParagraphStyle {
    /// Body text: Helvetica 10 on 12, left aligned.
    fn default() -> Self {
        Self {
            font: Font::Helvetica,
            font_size: 10.0,
            leading: 12.0,
            color: Color::BLACK,
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
        }
    }
}

impl ParagraphStyle {
    /// Top-level heading: Helvetica-Bold 18 on 22.
    pub fn heading1() -> Self {
        Self {
            font: Font::HelveticaBold,
            font_size: 18.0,
            leading: 22.0,
            space_after: 6.0,
            ..Default::default()
        }
    }
}

/// A table cell address. Negative values count back from the last
/// column/row, so `(-1, -1)` is the bottom-right cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

pub const fn cell(col: i32, row: i32) -> Cell {
    Cell { col, row }
}

/// One table styling command applied to the rectangular range `from..=to`.
/// Later commands override earlier ones for the cells they share.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleCommand {
    Background { from: Cell, to: Cell, color: Color },
    TextColor { from: Cell, to: Cell, color: Color },
    Align { from: Cell, to: Cell, align: Align },
    Font { from: Cell, to: Cell, font: Font },
    FontSize { from: Cell, to: Cell, size: f32 },
    BottomPadding { from: Cell, to: Cell, padding: f32 },
    Grid { from: Cell, to: Cell, width: f32, color: Color },
}

impl StyleCommand {
    fn range(&self) -> (Cell, Cell) {
        match *self {
            StyleCommand::Background { from, to, .. }
            | StyleCommand::TextColor { from, to, .. }
            | StyleCommand::Align { from, to, .. }
            | StyleCommand::Font { from, to, .. }
            | StyleCommand::FontSize { from, to, .. }
            | StyleCommand::BottomPadding { from, to, .. }
            | StyleCommand::Grid { from, to, .. } => (from, to),
        }
    }
}

/// Ordered list of styling commands for a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStyle {
    commands: Vec<StyleCommand>,
}

impl TableStyle {
    pub fn new(commands: Vec<StyleCommand>) -> Self {
        Self { commands }
    }

    pub fn push(&mut self, command: StyleCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[StyleCommand] {
        &self.commands
    }

    /// Resolve every cell of a `cols × rows` table to its final style.
    pub fn resolve(&self, cols: usize, rows: usize) -> Vec<Vec<CellStyle>> {
        let mut grid = vec![vec![CellStyle::default(); cols]; rows];

        for command in &self.commands {
            let (from, to) = command.range();
            let Some((c0, c1)) = span(from.col, to.col, cols) else {
                continue;
            };
            let Some((r0, r1)) = span(from.row, to.row, rows) else {
                continue;
            };

            for row in grid.iter_mut().take(r1 + 1).skip(r0) {
                for style in row.iter_mut().take(c1 + 1).skip(c0) {
                    apply(style, command);
                }
            }
        }
        grid
    }
}

fn apply(style: &mut CellStyle, command: &StyleCommand) {
    match *command {
        StyleCommand::Background { color, .. } => style.background = Some(color),
        StyleCommand::TextColor { color, .. } => style.text_color = color,
        StyleCommand::Align { align, .. } => style.align = align,
        StyleCommand::Font { font, .. } => style.font = font,
        StyleCommand::FontSize { size, .. } => style.font_size = size,
        StyleCommand::BottomPadding { padding, .. } => style.bottom_padding = padding,
        StyleCommand::Grid { width, color, .. } => style.grid = Some(GridRule { width, color }),
    }
}

/// Resolve a possibly-negative inclusive index pair against a length.
/// Returns `None` when the range selects nothing.
fn span(from: i32, to: i32, len: usize) -> Option<(usize, usize)> {
    let len = len as i32;
    let fix = |i: i32| if i < 0 { len + i } else { i };
    let (a, b) = (fix(from).max(0), fix(to).min(len - 1));
    if len == 0 || a > b {
        return None;
    }
    Some((a as usize, b as usize))
}

/// Stroke drawn around a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRule {
    pub width: f32,
    pub color: Color,
}

/// Fully resolved style of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub font: Font,
    pub font_size: f32,
    pub text_color: Color,
    pub align: Align,
    pub background: Option<Color>,
    pub grid: Option<GridRule>,
    pub left_padding: f32,
    pub right_padding: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            font: Font::Helvetica,
            font_size: 10.0,
            text_color: Color::BLACK,
            align: Align::Left,
            background: None,
            grid: None,
            left_padding: 6.0,
            right_padding: 6.0,
            top_padding: 3.0,
            bottom_padding: 3.0,
        }
    }
}

impl CellStyle {
    /// Line height used for row sizing.
    pub fn leading(&self) -> f32 {
        self.font_size * 1.2
    }

    /// Minimum row height this cell asks for.
    pub fn height(&self) -> f32 {
        self.top_padding + self.leading() + self.bottom_padding
    }
}
