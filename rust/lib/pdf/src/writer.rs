//! Serializes laid-out pages to a PDF file with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::PdfError;
use crate::font::{self, Font, Run, Symbol};
use crate::geometry::{Color, PageSize};
use crate::layout::{DrawOp, Page};

pub(crate) fn write_pdf(
    pages: &[Page],
    page_size: PageSize,
    title: Option<&str>,
) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for f in Font::ALL {
        let id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => f.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(f.resource_name(), id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Producer" => Object::string_literal("grocer-pdf"),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(stroke_color(*color));
                ops.push(Operation::new("w", vec![(*width).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (*y1).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (*y2).into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => text_operations(&mut ops, *x, *y, *font, *size, *color, text),
        }
    }
    ops
}

fn text_operations(
    ops: &mut Vec<Operation>,
    x: f32,
    y: f32,
    font: Font,
    size: f32,
    color: Color,
    text: &str,
) {
    let mut pen = x;
    for run in font::encode(text) {
        match run {
            Run::Text(bytes) => {
                let advance = font.bytes_width(&bytes, size);
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), size.into()],
                ));
                ops.push(fill_color(color));
                ops.push(Operation::new("Td", vec![pen.into(), y.into()]));
                ops.push(Operation::new("Tj", vec![Object::string_literal(bytes)]));
                ops.push(Operation::new("ET", vec![]));
                pen += advance;
            }
            Run::Symbol(symbol) => {
                symbol_operations(ops, symbol, pen, y, size, color);
                pen += symbol.advance() * size;
            }
        }
    }
}

/// Draw a symbol glyph as strokes, in em units scaled by `size`, with the
/// baseline at `y`.
fn symbol_operations(
    ops: &mut Vec<Operation>,
    symbol: Symbol,
    x: f32,
    y: f32,
    size: f32,
    color: Color,
) {
    let at = |ex: f32, ey: f32| -> Vec<Object> { vec![(x + ex * size).into(), (y + ey * size).into()] };

    ops.push(Operation::new("q", vec![]));
    ops.push(stroke_color(color));
    match symbol {
        Symbol::Checkbox => {
            ops.push(Operation::new("w", vec![(0.06 * size).into()]));
            let side = 0.62 * size;
            ops.push(Operation::new(
                "re",
                vec![
                    (x + 0.09 * size).into(),
                    (y - 0.02 * size).into(),
                    side.into(),
                    side.into(),
                ],
            ));
        }
        Symbol::Rupee => {
            ops.push(Operation::new("w", vec![(0.07 * size).into()]));
            ops.push(Operation::new("J", vec![1.into()]));
            // Two crossbars.
            ops.push(Operation::new("m", at(0.06, 0.70)));
            ops.push(Operation::new("l", at(0.50, 0.70)));
            ops.push(Operation::new("m", at(0.06, 0.55)));
            ops.push(Operation::new("l", at(0.50, 0.55)));
            // Bowl hanging from the top bar.
            ops.push(Operation::new("m", at(0.18, 0.70)));
            let mut curve = at(0.44, 0.70);
            curve.extend(at(0.44, 0.36));
            curve.extend(at(0.18, 0.36));
            ops.push(Operation::new("c", curve));
            ops.push(Operation::new("l", at(0.08, 0.36)));
            // Diagonal leg.
            ops.push(Operation::new("m", at(0.10, 0.36)));
            ops.push(Operation::new("l", at(0.46, 0.0)));
        }
    }
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

fn fill_color(c: Color) -> Operation {
    Operation::new("rg", vec![c.r.into(), c.g.into(), c.b.into()])
}

fn stroke_color(c: Color) -> Operation {
    Operation::new("RG", vec![c.r.into(), c.g.into(), c.b.into()])
}
