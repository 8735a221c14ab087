// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Read-only DOM built on html5ever
//!
//! Used where structure matters: link extraction for the walk and the
//! label-driven field lookup of the archive scraper. Feature extraction does
//! not build a tree; it runs on the streaming tokenizer instead.

mod links;
mod parser;

pub use links::{canonicalize_url, extract_links, is_skipped_extension};
pub use parser::{attribute, own_text_nodes, parse_html, tag_name, text_content, Document};
