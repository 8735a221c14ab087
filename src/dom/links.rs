// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Outbound link extraction and URL canonicalization

use std::collections::HashSet;

use url::Url;

use super::parser::{attribute, Document};

/// Path extensions that never lead to an HTML document
const SKIP_EXTENSIONS: &[&str] = &[
    // images
    "jpg", "jpeg", "png", "gif", "svg", "ico", "bmp", "tif", "tiff", "webp", "psd", "eps",
    // audio / video
    "mp3", "wav", "ogg", "flac", "m4a", "wma", "mp4", "avi", "mov", "mkv", "webm", "flv", "wmv",
    "mpg", "mpeg", "3gp", "m4v", "swf",
    // office / documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf",
    // archives / binaries
    "zip", "tar", "gz", "tgz", "bz2", "rar", "7z", "exe", "msi", "dmg", "iso", "bin", "apk",
    "deb", "rpm", "jar",
    // assets
    "css", "js", "woff", "woff2", "ttf", "eot",
];

/// Check whether a URL path ends with a non-document extension
pub fn is_skipped_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    match path.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => SKIP_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

/// Canonicalize a URL: drop the fragment, sort the query parameters and
/// remove duplicated `(name, value)` pairs. An emptied query is removed.
pub fn canonicalize_url(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_fragment(None);

    if canonical.query().is_some() {
        let mut pairs: Vec<(String, String)> = canonical
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.sort();
        pairs.dedup();

        if pairs.is_empty() {
            canonical.set_query(None);
        } else {
            canonical.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }

    canonical
}

/// Extract the canonical outbound links of a page.
///
/// Reads `<a href>` and `<area href>`, resolves them against `<base href>`
/// (or the page URL), keeps only http(s) links to documents and drops
/// links back to the page itself. Order of first appearance is kept.
pub fn extract_links(doc: &Document, page_url: &Url) -> Vec<String> {
    let base = doc
        .base_href()
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone());
    let own = canonicalize_url(page_url);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let anchors = doc.elements("a");
    let areas = doc.elements("area");
    for element in anchors.iter().chain(areas.iter()) {
        let Some(href) = attribute(element, "href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let Ok(resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") || is_skipped_extension(&resolved) {
            continue;
        }

        let canonical = canonicalize_url(&resolved);
        if canonical == own {
            continue;
        }
        let canonical = canonical.to_string();
        if seen.insert(canonical.clone()) {
            links.push(canonical);
        }
    }

    links
}
