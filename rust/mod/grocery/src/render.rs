//! PDF export of a saved list.
//!
//! The layout is fixed: title, date/address block, then a checklist table
//! with a grand-total row, on US Letter.

use grocer_core::ServiceError;
use grocer_pdf::{
    cell, Align, Color, DocTemplate, Flowable, Font, Margins, Paragraph, ParagraphStyle,
    StyleCommand, Table, TableStyle, INCH, LETTER,
};

use crate::model::GroceryList;

pub const TITLE: &str = "Grocery Shopping List";

/// Empty ballot box printed in front of every row.
pub const CHECKBOX: &str = "\u{2610}";

/// Media type of [`render_pdf`] output.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// `₹` followed by the amount to two decimals.
pub fn format_money(amount: f64) -> String {
    format!("\u{20b9}{amount:.2}")
}

/// Plain number text: `2`, `1.5`.
pub fn format_quantity(quantity: f64) -> String {
    format!("{quantity}")
}

/// Suggested download name for a list's PDF.
pub fn pdf_filename(list_id: i64) -> String {
    format!("grocery_list_{list_id}.pdf")
}

/// US Letter with one-inch side and top margins and a quarter-inch foot.
pub fn template() -> DocTemplate {
    DocTemplate::new(
        LETTER,
        Margins {
            left: 72.0,
            right: 72.0,
            top: 72.0,
            bottom: 18.0,
        },
    )
    .with_title(TITLE)
}

/// Assemble the flowables for one list.
pub fn build_story(list: &GroceryList) -> Result<Vec<Flowable>, ServiceError> {
    let title_style = ParagraphStyle {
        font_size: 18.0,
        color: Color::DARK_BLUE,
        space_after: 30.0,
        align: Align::Center,
        ..ParagraphStyle::heading1()
    };

    let info = Table::new(
        vec![
            vec!["Date:".to_string(), list.created_date.clone()],
            vec![
                "Delivery Address:".to_string(),
                list.display_address().to_string(),
            ],
        ],
        vec![2.0 * INCH, 4.0 * INCH],
    )
    .map_err(layout_error)?
    .with_style(TableStyle::new(vec![
        StyleCommand::Align { from: cell(0, 0), to: cell(-1, -1), align: Align::Left },
        StyleCommand::Font { from: cell(0, 0), to: cell(0, -1), font: Font::HelveticaBold },
        StyleCommand::FontSize { from: cell(0, 0), to: cell(-1, -1), size: 12.0 },
        StyleCommand::BottomPadding { from: cell(0, 0), to: cell(-1, -1), padding: 12.0 },
    ]));

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(list.items.len() + 2);
    rows.push(vec![
        CHECKBOX.to_string(),
        "Item".to_string(),
        "Quantity".to_string(),
        "Price (\u{20b9})".to_string(),
        "Total (\u{20b9})".to_string(),
    ]);
    for item in &list.items {
        rows.push(vec![
            CHECKBOX.to_string(),
            item.name.clone(),
            format_quantity(item.quantity),
            format_money(item.price),
            format_money(item.total),
        ]);
    }
    rows.push(vec![
        String::new(),
        String::new(),
        String::new(),
        "Grand Total:".to_string(),
        format_money(list.total_amount),
    ]);

    let items = Table::new(
        rows,
        vec![0.5 * INCH, 2.5 * INCH, 1.0 * INCH, 1.0 * INCH, 1.0 * INCH],
    )
    .map_err(layout_error)?
    .with_style(TableStyle::new(vec![
        StyleCommand::Background { from: cell(0, 0), to: cell(-1, 0), color: Color::GREY },
        StyleCommand::TextColor { from: cell(0, 0), to: cell(-1, 0), color: Color::WHITESMOKE },
        StyleCommand::Align { from: cell(0, 0), to: cell(-1, -1), align: Align::Center },
        // Item names, below the header.
        StyleCommand::Align { from: cell(1, 1), to: cell(1, -1), align: Align::Left },
        StyleCommand::Font { from: cell(0, 0), to: cell(-1, 0), font: Font::HelveticaBold },
        StyleCommand::FontSize { from: cell(0, 0), to: cell(-1, -1), size: 10.0 },
        StyleCommand::BottomPadding { from: cell(0, 0), to: cell(-1, -1), padding: 12.0 },
        StyleCommand::Background { from: cell(0, -1), to: cell(-1, -1), color: Color::LIGHT_GREY },
        StyleCommand::Font { from: cell(0, -1), to: cell(-1, -1), font: Font::HelveticaBold },
        StyleCommand::Grid { from: cell(0, 0), to: cell(-1, -1), width: 1.0, color: Color::BLACK },
    ]));

    Ok(vec![
        Paragraph::new(TITLE, title_style).into(),
        info.into(),
        Flowable::Spacer(20.0),
        items.into(),
    ])
}

/// Render a saved list to PDF bytes.
pub fn render_pdf(list: &GroceryList) -> Result<Vec<u8>, ServiceError> {
    let story = build_story(list)?;
    template()
        .build(&story)
        .map_err(|e| ServiceError::Internal(format!("pdf for list {}: {e}", list.id)))
}

fn layout_error(e: grocer_pdf::PdfError) -> ServiceError {
    ServiceError::Internal(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use grocer_pdf::DrawOp;

    fn list(items: Vec<LineItem>, total: f64, address: Option<&str>) -> GroceryList {
        GroceryList {
            id: 7,
            created_date: "2024-01-15".into(),
            delivery_address: address.map(str::to_string),
            items,
            total_amount: total,
        }
    }

    fn rice() -> LineItem {
        LineItem {
            name: "Rice (1kg)".into(),
            quantity: 2.0,
            price: 80.0,
            total: 160.0,
        }
    }

    fn item_table(story: &[Flowable]) -> &Table {
        match &story[3] {
            Flowable::Table(t) => t,
            other => panic!("expected items table, got {other:?}"),
        }
    }

    #[test]
    fn formatting() {
        assert_eq!(format_money(160.0), "\u{20b9}160.00");
        assert_eq!(format_money(0.0), "\u{20b9}0.00");
        assert_eq!(format_money(12.345), "\u{20b9}12.35");
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(pdf_filename(12), "grocery_list_12.pdf");
    }

    #[test]
    fn story_rows() {
        let story = build_story(&list(vec![rice()], 160.0, None)).unwrap();
        assert_eq!(story.len(), 4);
        let rows = item_table(&story).rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["\u{2610}", "Item", "Quantity", "Price (\u{20b9})", "Total (\u{20b9})"]);
        assert_eq!(rows[1], vec!["\u{2610}", "Rice (1kg)", "2", "\u{20b9}80.00", "\u{20b9}160.00"]);
        assert_eq!(rows[2], vec!["", "", "", "Grand Total:", "\u{20b9}160.00"]);
    }

    #[test]
    fn address_falls_back_in_info_block() {
        let story = build_story(&list(vec![], 0.0, Some(""))).unwrap();
        let Flowable::Table(info) = &story[1] else {
            panic!("expected info table");
        };
        assert_eq!(info.rows()[1], vec!["Delivery Address:", "Not specified"]);
    }

    #[test]
    fn empty_list_has_header_and_zero_total() {
        let story = build_story(&list(vec![], 0.0, None)).unwrap();
        let rows = item_table(&story).rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "Item");
        assert_eq!(rows[1][4], "\u{20b9}0.00");

        let pages = template().layout(&story);
        assert_eq!(pages.len(), 1);
        let texts: Vec<&str> = pages[0].texts().collect();
        assert!(texts.contains(&"Grand Total:"));
        assert!(texts.contains(&"\u{20b9}0.00"));
    }

    #[test]
    fn header_and_total_row_styling() {
        let story = build_story(&list(vec![rice()], 160.0, None)).unwrap();
        let pages = template().layout(&story);
        let text_op = |needle: &str| {
            pages[0]
                .ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Text { text, font, color, .. } if text == needle => Some((*font, *color)),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(text_op("Item"), (Font::HelveticaBold, Color::WHITESMOKE));
        assert_eq!(text_op("Rice (1kg)"), (Font::Helvetica, Color::BLACK));
        assert_eq!(text_op("Grand Total:").0, Font::HelveticaBold);
        assert_eq!(text_op(TITLE), (Font::HelveticaBold, Color::DARK_BLUE));

        let fills: Vec<Color> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(fills.iter().filter(|c| **c == Color::GREY).count(), 5);
        assert_eq!(fills.iter().filter(|c| **c == Color::LIGHT_GREY).count(), 5);
    }

    #[test]
    fn item_names_left_aligned_numbers_centered() {
        let story = build_story(&list(vec![rice()], 160.0, None)).unwrap();
        let pages = template().layout(&story);
        let x_of = |needle: &str| {
            pages[0]
                .ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Text { text, x, .. } if text == needle => Some(*x),
                    _ => None,
                })
                .unwrap()
        };
        // Items table is 6in wide, centered in a 468pt frame: starts at x=90.
        let name_col = 90.0 + 0.5 * INCH;
        assert!((x_of("Rice (1kg)") - (name_col + 6.0)).abs() < 0.01);

        let qty_col = name_col + 2.5 * INCH;
        let w = Font::Helvetica.text_width("2", 10.0);
        assert!((x_of("2") - (qty_col + (INCH - w) / 2.0)).abs() < 0.01);
    }

    #[test]
    fn long_lists_paginate() {
        let items: Vec<LineItem> = (0..80)
            .map(|i| LineItem {
                name: format!("Item {i}"),
                quantity: 1.0,
                price: 1.0,
                total: 1.0,
            })
            .collect();
        let story = build_story(&list(items, 80.0, None)).unwrap();
        let pages = template().layout(&story);
        assert!(pages.len() >= 2);
        let last: Vec<&str> = pages.last().unwrap().texts().collect();
        assert!(last.contains(&"Grand Total:"));
    }

    #[test]
    fn pdf_bytes_parse_back() {
        let bytes = render_pdf(&list(vec![rice()], 160.0, Some("12 MG Road"))).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = *pages.values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let ops = lopdf::content::Content::decode(&content).unwrap().operations;
        let strings: Vec<Vec<u8>> = ops
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(lopdf::Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect();
        for expected in [
            &b"Grocery Shopping List"[..],
            b"Delivery Address:",
            b"12 MG Road",
            b"Rice (1kg)",
            b"160.00",
            b"Grand Total:",
        ] {
            assert!(
                strings.iter().any(|s| s.as_slice() == expected),
                "missing {:?}",
                String::from_utf8_lossy(expected)
            );
        }
    }
}
