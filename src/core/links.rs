//! Raw-substring link discovery against the publisher's HTML.
//!
//! The source pages carry no stable structured schema, so both policies scan
//! the raw text instead of building a DOM. Every marker lookup goes through
//! `find`/`rfind` options; a missing marker raises `LinkNotFoundError` rather
//! than panicking or returning a wrong link.

use crate::domain::model::LinkResult;
use crate::utils::error::{ExportError, Result};

const MENU_START: &str = "<ul class=\"menu\">";
const MENU_END: &str = "</ul>";
const ITEM_START: &str = "<li ";
const ITEM_END: &str = "</li>";
const HREF_START: &str = "<a href=\"";

// The page is hand-edited; all four capitalizations have been seen.
const TABULAR_ORDER_VARIANTS: [&str; 4] = [
    "Tabular Order",
    "tabular order",
    "Tabular order",
    "tabular Order",
];

fn link_not_found(context: &str) -> ExportError {
    ExportError::LinkNotFoundError {
        context: context.to_string(),
    }
}

/// Menu-item policy: walk the list items of the first link menu in document
/// order and return the first whose visible text mentions both "ICD-10" and
/// "CM", together with the year label taken from that text.
pub fn find_menu_code_link(html: &str, base_url: &str) -> Result<LinkResult> {
    let menu_st = html
        .find(MENU_START)
        .ok_or_else(|| link_not_found("cannot find menu of links"))?;
    let menu_ed = html[menu_st..]
        .find(MENU_END)
        .map_or(html.len(), |i| menu_st + i + MENU_END.len());
    let menu = &html[menu_st..menu_ed];

    let mut cursor = 0;
    while let Some(offset) = menu[cursor..].find(ITEM_START) {
        let item_st = cursor + offset;
        let item_ed = menu[item_st..]
            .find(ITEM_END)
            .map_or(menu.len(), |i| item_st + i);
        let item = &menu[item_st..item_ed];
        cursor = item_ed;

        // Each list item is expected to carry exactly one link.
        let Some((href, text)) = split_link_item(item) else {
            continue;
        };
        if text.contains("ICD-10") && text.contains("CM") {
            let year = text
                .replace('-', " ")
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string();
            // Menu hrefs are relative, so prepend the base domain.
            return Ok(LinkResult {
                url: format!("{base_url}{href}"),
                year,
            });
        }
    }

    Err(link_not_found("no ICD-10 CM links in the menu"))
}

/// Splits one `<li>` region into its href value and visible link text.
fn split_link_item(item: &str) -> Option<(&str, &str)> {
    let href_st = item.find(HREF_START)? + HREF_START.len();
    let href_ed = href_st + item[href_st..].find('"')?;
    let text_st = href_ed + item[href_ed..].find('>')? + 1;
    let text_ed = text_st + item[text_st..].find('<')?;
    Some((&item[href_st..href_ed], &item[text_st..text_ed]))
}

/// Page-link policy: find the first case variant of the "Tabular Order"
/// phrase anywhere in the document, then walk backwards to the quoted href of
/// the enclosing anchor.
pub fn find_tabular_order_link(html: &str, base_url: &str) -> Result<String> {
    let marker = TABULAR_ORDER_VARIANTS
        .iter()
        .find_map(|variant| html.find(variant))
        .ok_or_else(|| link_not_found("cannot find link for tabular order zip"))?;

    // Nearest `">` before the phrase closes the href attribute...
    let href_ed = html[..marker]
        .rfind("\">")
        .ok_or_else(|| link_not_found("no anchor before the tabular order phrase"))?;
    // ...and the nearest quote before that opens it.
    let href_st = html[..href_ed]
        .rfind('"')
        .map(|i| i + 1)
        .ok_or_else(|| link_not_found("unterminated href before the tabular order phrase"))?;

    Ok(format!("{base_url}{}", &html[href_st..href_ed]))
}
