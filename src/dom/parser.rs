// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Error, Result};

/// A parsed HTML document
pub struct Document {
    dom: RcDom,
}

/// Parse HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    Ok(Document { dom })
}

impl Document {
    /// Document node
    pub fn root(&self) -> &Handle {
        &self.dom.document
    }

    /// All elements with the given (lowercase) tag name, in document order
    pub fn elements(&self, tag: &str) -> Vec<Handle> {
        let mut found = Vec::new();
        collect_elements(self.root(), tag, &mut found);
        found
    }

    /// Value of `href` on the first `<base>` element
    pub fn base_href(&self) -> Option<String> {
        self.elements("base")
            .iter()
            .find_map(|base| attribute(base, "href"))
    }
}

fn collect_elements(handle: &Handle, tag: &str, found: &mut Vec<Handle>) {
    for child in handle.children.borrow().iter() {
        if tag_name(child).as_deref() == Some(tag) {
            found.push(child.clone());
        }
        collect_elements(child, tag, found);
    }
}

/// Tag name of an element node
pub fn tag_name(handle: &Handle) -> Option<String> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Attribute value of an element node
pub fn attribute(handle: &Handle, attr_name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Concatenated text of all descendant text nodes
pub fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    append_text(handle, &mut text);
    text
}

fn append_text(handle: &Handle, out: &mut String) {
    for child in handle.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => append_text(child, out),
            _ => {}
        }
    }
}

/// Direct text children only, one entry per text node
pub fn own_text_nodes(handle: &Handle) -> Vec<String> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(|child| match child.data {
            NodeData::Text { ref contents } => Some(contents.borrow().to_string()),
            _ => None,
        })
        .collect()
}
