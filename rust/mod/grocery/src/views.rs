//! Server-rendered HTML pages.
//!
//! The list builder is a static page that talks to the JSON endpoints. The
//! saved-list pages are rendered here from store data; every piece of user
//! text goes through [`escape_html`].

use std::fmt::Write;

use crate::model::{GroceryList, ListSummary};
use crate::render::{format_money, format_quantity};

const STYLE: &str = r#"<style>
  body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem auto; max-width: 960px; color: #1f2933; }
  h1 { color: #00008b; }
  table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
  th, td { border: 1px solid #9aa5b1; padding: 6px 10px; text-align: center; }
  th { background: #808080; color: #f5f5f5; }
  td.name { text-align: left; }
  tr.total td { background: #d3d3d3; font-weight: bold; }
  dl { display: grid; grid-template-columns: 10rem auto; row-gap: .4rem; }
  dt { font-weight: bold; }
  a.button { display: inline-block; padding: 4px 10px; border: 1px solid #00008b; border-radius: 4px; text-decoration: none; color: #00008b; }
  .empty { color: #7b8794; font-style: italic; }
</style>"#;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The list builder page.
pub fn index_html() -> &'static str {
    include_str!("web/index.html")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n{STYLE}\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

/// Index of saved lists, in the order given.
pub fn saved_lists_html(lists: &[ListSummary]) -> String {
    let mut body = String::new();
    body.push_str("<h1>Saved Grocery Lists</h1>\n<p><a href=\"/\">&larr; Back to list builder</a></p>\n");

    if lists.is_empty() {
        body.push_str("<p class=\"empty\">No saved lists yet.</p>\n");
        return page("Saved Grocery Lists", &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Date</th><th>Delivery Address</th>\
         <th>Total</th><th>Actions</th></tr></thead>\n<tbody>\n",
    );
    for list in lists {
        let _ = writeln!(
            body,
            "<tr><td>{id}</td><td>{date}</td><td class=\"name\">{address}</td><td>{total}</td>\
             <td><a class=\"button\" href=\"/view_list/{id}\">View</a> \
             <a class=\"button\" href=\"/generate_pdf/{id}\">Download PDF</a></td></tr>",
            id = list.id,
            date = escape_html(&list.created_date),
            address = escape_html(list.display_address()),
            total = escape_html(&format_money(list.total_amount)),
        );
    }
    body.push_str("</tbody>\n</table>\n");
    page("Saved Grocery Lists", &body)
}

/// Detail page of one saved list.
pub fn list_detail_html(list: &GroceryList) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>Grocery List #{id}</h1>\n\
         <p><a href=\"/view_saved_lists\">&larr; All saved lists</a></p>\n\
         <dl><dt>Date:</dt><dd>{date}</dd><dt>Delivery Address:</dt><dd>{address}</dd></dl>\n",
        id = list.id,
        date = escape_html(&list.created_date),
        address = escape_html(list.display_address()),
    );

    body.push_str(
        "<table>\n<thead><tr><th>Item</th><th>Quantity</th><th>Price</th>\
         <th>Total</th></tr></thead>\n<tbody>\n",
    );
    for item in &list.items {
        let _ = writeln!(
            body,
            "<tr><td class=\"name\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&item.name),
            format_quantity(item.quantity),
            escape_html(&format_money(item.price)),
            escape_html(&format_money(item.total)),
        );
    }
    let _ = writeln!(
        body,
        "<tr class=\"total\"><td colspan=\"3\">Grand Total:</td><td>{}</td></tr>",
        escape_html(&format_money(list.total_amount)),
    );
    body.push_str("</tbody>\n</table>\n");
    let _ = writeln!(
        body,
        "<p><a class=\"button\" href=\"/generate_pdf/{}\">Download PDF</a></p>",
        list.id
    );

    page(&format!("Grocery List #{}", list.id), &body)
}

/// Page served when a list id does not resolve.
pub fn not_found_html(message: &str) -> String {
    let body = format!(
        "<h1>Not Found</h1>\n<p>{}</p>\n<p><a href=\"/view_saved_lists\">&larr; All saved lists</a></p>\n",
        escape_html(message)
    );
    page("Not Found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Rice (1kg)"), "Rice (1kg)");
    }

    #[test]
    fn index_page_wires_endpoints() {
        let html = index_html();
        for endpoint in [
            "/get_common_items",
            "/add_common_item",
            "/update_common_item",
            "/delete_common_item",
            "/save_list",
            "/view_saved_lists",
        ] {
            assert!(html.contains(endpoint), "index page never calls {endpoint}");
        }
    }

    #[test]
    fn saved_lists_rows_and_links() {
        let lists = vec![
            ListSummary {
                id: 2,
                created_date: "2024-01-16".into(),
                delivery_address: Some("<script>alert(1)</script>".into()),
                total_amount: 45.5,
            },
            ListSummary {
                id: 1,
                created_date: "2024-01-15".into(),
                delivery_address: None,
                total_amount: 160.0,
            },
        ];
        let html = saved_lists_html(&lists);
        assert!(html.contains("href=\"/view_list/2\""));
        assert!(html.contains("href=\"/generate_pdf/1\""));
        assert!(html.contains("\u{20b9}45.50"));
        assert!(html.contains("Not specified"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.find("/view_list/2").unwrap() < html.find("/view_list/1").unwrap());
    }

    #[test]
    fn saved_lists_empty_state() {
        let html = saved_lists_html(&[]);
        assert!(html.contains("No saved lists yet."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn detail_page() {
        let list = GroceryList {
            id: 9,
            created_date: "2024-01-15".into(),
            delivery_address: Some(String::new()),
            items: vec![LineItem {
                name: "Fish & Chips".into(),
                quantity: 1.5,
                price: 320.0,
                total: 480.0,
            }],
            total_amount: 480.0,
        };
        let html = list_detail_html(&list);
        assert!(html.contains("Grocery List #9"));
        assert!(html.contains("Not specified"));
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains("<td>1.5</td>"));
        assert!(html.contains("\u{20b9}480.00"));
        assert!(html.contains("href=\"/generate_pdf/9\""));
    }
}
