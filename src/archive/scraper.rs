// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Listing and detail page parsing
//!
//! Detail fields are found by the label text at the start of their `<th>`
//! cell (`Date submitted:`, `Status:`, ...). A missing label leaves the
//! field empty.

use markup5ever_rcdom::Handle;
use tracing::{debug, info};
use url::Url;

use super::ArchiveItem;
use crate::dom::{attribute, own_text_nodes, parse_html, text_content, Document};
use crate::error::Result;

/// Anchor text of detail links on a listing page
pub const DETAIL_LINK_TEXT: &str = "mirror";
/// Anchor text of the next listing page
pub const NEXT_PAGE_TEXT: &str = ">";
/// Anchor text of the mirror download on a detail page
pub const MIRROR_LINK_TEXT: &str = "Click here to view the mirror";
/// The only category kept
pub const XSS_CATEGORY: &str = "XSS";

/// Links found on one listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub details: Vec<Url>,
    pub next: Option<Url>,
}

/// Parse a listing page into detail links and the next listing page
pub fn parse_listing(html: &str, page_url: &Url) -> Result<Listing> {
    let doc = parse_html(html)?;
    let mut listing = Listing::default();

    for anchor in doc.elements("a") {
        let Some(href) = attribute(&anchor, "href") else {
            continue;
        };
        let texts = own_text_nodes(&anchor);
        if texts.iter().any(|t| t == DETAIL_LINK_TEXT) {
            if let Ok(url) = page_url.join(href.trim()) {
                listing.details.push(url);
            }
        } else if listing.next.is_none() && texts.iter().any(|t| t == NEXT_PAGE_TEXT) {
            listing.next = page_url.join(href.trim()).ok();
        }
    }

    debug!(
        url = %page_url,
        details = listing.details.len(),
        next = ?listing.next.as_ref().map(Url::as_str),
        "parsed listing page"
    );
    Ok(listing)
}

/// Parse a detail page. Items outside the XSS category are dropped.
pub fn parse_detail(html: &str, page_url: &Url) -> Result<Option<ArchiveItem>> {
    let item = extract_item(&parse_html(html)?, page_url);
    if item.category != XSS_CATEGORY {
        info!(url = %page_url, category = %item.category, "not saving non-XSS item");
        return Ok(None);
    }
    Ok(Some(item))
}

/// Extract every field of a detail page, whatever its category
pub fn extract_item(doc: &Document, page_url: &Url) -> ArchiveItem {
    let cells = doc.elements("th");

    let file_urls = doc
        .elements("a")
        .iter()
        .filter(|a| own_text_nodes(a).iter().any(|t| t == MIRROR_LINK_TEXT))
        .filter_map(|a| attribute(a, "href"))
        .filter_map(|href| page_url.join(href.trim()).ok())
        .map(String::from)
        .collect();

    ArchiveItem {
        id: item_id(page_url),
        date: labelled_text(&cells, "Date submitted:", 0),
        status: labelled_text(&cells, "Status:", 1),
        domain: labelled_text(&cells, "Domain:", 0),
        category: labelled_text(&cells, "Category:", 0),
        pagerank: labelled_text(&cells, "Pagerank:", 0),
        url: labelled_cell(&cells, "URL:")
            .map(|cell| clean(&text_content(cell), "URL:"))
            .unwrap_or_default(),
        file_urls,
        files: Vec::new(),
    }
}

/// Second-to-last `/`-separated segment of the URL
pub fn item_id(url: &Url) -> String {
    url.as_str()
        .split('/')
        .rev()
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

fn labelled_cell<'a>(cells: &'a [Handle], label: &str) -> Option<&'a Handle> {
    cells.iter().find(|cell| {
        own_text_nodes(cell)
            .first()
            .is_some_and(|text| text.contains(label))
    })
}

/// The `nth` direct text node of the labelled cell, cleaned
fn labelled_text(cells: &[Handle], label: &str, nth: usize) -> String {
    labelled_cell(cells, label)
        .and_then(|cell| own_text_nodes(cell).into_iter().nth(nth))
        .map(|text| clean(&text, label))
        .unwrap_or_default()
}

fn clean(text: &str, label: &str) -> String {
    text.replace('\u{a0}', "").replace(label, "").trim().to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn detail_page(category: &str, mirror: &str) -> String {
        format!(
            r#"<html><body><table>
<tr><th>Date submitted:&nbsp;12/03/2008</th></tr>
<tr><th>Status: <img src="/images/fixed.gif"> FIXED</th></tr>
<tr><th>Domain:&nbsp;www.example.com</th></tr>
<tr><th>Category:&nbsp;{category}</th></tr>
<tr><th>Pagerank:&nbsp;5</th></tr>
<tr><th>URL: http://www.example.com/search.php?q=<span>"&gt;&lt;script&gt;alert(1)&lt;/script&gt;</span></th></tr>
</table>
<a href="{mirror}">Click here to view the mirror</a>
</body></html>"#
        )
    }

    pub(crate) fn listing_page(details: &[&str], next: Option<&str>) -> String {
        let mut html = String::from("<html><body><table>");
        for detail in details {
            html.push_str(&format!(r#"<tr><td><a href="{}">mirror</a></td></tr>"#, detail));
        }
        html.push_str("</table>");
        if let Some(next) = next {
            html.push_str(&format!(r#"<a href="{}">&gt;</a>"#, next));
        }
        html.push_str("</body></html>");
        html
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_parse_listing() {
        let html = listing_page(&["/mirror/1/", "/mirror/2/"], Some("/archive/page=2/"));
        let listing = parse_listing(&html, &url("http://www.xssed.com/archive")).unwrap();
        assert_eq!(
            listing.details,
            vec![
                url("http://www.xssed.com/mirror/1/"),
                url("http://www.xssed.com/mirror/2/")
            ]
        );
        assert_eq!(listing.next, Some(url("http://www.xssed.com/archive/page=2/")));
    }

    #[test]
    fn test_last_listing_page() {
        let html = listing_page(&["/mirror/9/"], None);
        let listing = parse_listing(&html, &url("http://www.xssed.com/archive/page=5/")).unwrap();
        assert_eq!(listing.details.len(), 1);
        assert!(listing.next.is_none());
    }

    #[test]
    fn test_parse_detail() {
        let html = detail_page("XSS", "/mirror/78538/full");
        let item = parse_detail(&html, &url("http://www.xssed.com/mirror/78538/"))
            .unwrap()
            .unwrap();

        assert_eq!(item.id, "78538");
        assert_eq!(item.date, "12/03/2008");
        assert_eq!(item.status, "FIXED");
        assert_eq!(item.domain, "www.example.com");
        assert_eq!(item.category, "XSS");
        assert_eq!(item.pagerank, "5");
        assert_eq!(
            item.url,
            "http://www.example.com/search.php?q=\"><script>alert(1)</script>"
        );
        assert_eq!(item.file_urls, vec!["http://www.xssed.com/mirror/78538/full"]);
        assert!(item.files.is_empty());
    }

    #[test]
    fn test_non_xss_is_filtered() {
        let html = detail_page("Redirect", "/mirror/76616/full");
        let result = parse_detail(&html, &url("http://www.xssed.com/mirror/76616/")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_labels_are_empty() {
        let doc = parse_html("<table><tr><th>Category:&nbsp;XSS</th></tr></table>").unwrap();
        let item = extract_item(&doc, &url("http://www.xssed.com/mirror/5/"));
        assert_eq!(item.category, "XSS");
        assert_eq!(item.date, "");
        assert_eq!(item.status, "");
        assert_eq!(item.url, "");
        assert!(item.file_urls.is_empty());
    }

    #[test]
    fn test_item_id() {
        assert_eq!(item_id(&url("http://www.xssed.com/mirror/78538/")), "78538");
        assert_eq!(item_id(&url("http://www.xssed.com/mirror/78538/full")), "78538");
    }
}
