// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML features
//!
//! A single pass over html5ever's tokenizer, without building a tree. Start
//! tags and attributes are counted against fixed name lists, and every piece
//! of script the page carries is collected for the JavaScript extractor:
//! inline `<script>` bodies, event-handler attribute values and
//! `javascript:` URLs.

use std::io::ErrorKind;
use std::path::Path;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use super::record::{FeatureFragment, FeatureValue};
use crate::error::Result;

/// Counted tags
pub const HTML_TAGS: &[&str] = &[
    "script", "iframe", "meta", "object", "embed", "link", "svg", "frame", "form", "div",
    "style", "img", "input", "textarea",
];

/// Counted attributes
pub const HTML_ATTRIBUTES: &[&str] = &[
    "action",
    "background",
    "classid",
    "codebase",
    "href",
    "longdesc",
    "profile",
    "src",
    "usemap",
    "http-equiv",
];

/// Counted event-handler attributes
pub const HTML_EVENTS: &[&str] = &[
    "onblur",
    "onchange",
    "onclick",
    "onerror",
    "onfocus",
    "onkeydown",
    "onkeypress",
    "onkeyup",
    "onload",
    "onmousedown",
    "onmouseout",
    "onmouseover",
    "onmouseup",
    "onsubmit",
    "onunload",
];

lazy_static! {
    // Browsers ignore whitespace and control characters inside the scheme
    static ref JAVASCRIPT_URL: Regex =
        Regex::new(r"(?is)^[\s\x00-\x20]*j\s*a\s*v\s*a\s*s\s*c\s*r\s*i\s*p\s*t\s*:(.*)$").unwrap();
}

/// Tag, attribute and event counts of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFeatures {
    /// Length of the document in characters
    pub length: usize,
    /// Counts aligned with [`HTML_TAGS`]
    pub tags: Vec<usize>,
    /// Counts aligned with [`HTML_ATTRIBUTES`]
    pub attributes: Vec<usize>,
    /// Counts aligned with [`HTML_EVENTS`]
    pub events: Vec<usize>,
    /// A `<script src=...>` was seen
    pub js_file: bool,
}

impl Default for HtmlFeatures {
    fn default() -> Self {
        Self {
            length: 0,
            tags: vec![0; HTML_TAGS.len()],
            attributes: vec![0; HTML_ATTRIBUTES.len()],
            events: vec![0; HTML_EVENTS.len()],
            js_file: false,
        }
    }
}

impl HtmlFeatures {
    /// Count for a tag name
    pub fn tag(&self, name: &str) -> usize {
        lookup(HTML_TAGS, &self.tags, name)
    }

    /// Count for an attribute name
    pub fn attribute(&self, name: &str) -> usize {
        lookup(HTML_ATTRIBUTES, &self.attributes, name)
    }

    /// Count for an event-handler name
    pub fn event(&self, name: &str) -> usize {
        lookup(HTML_EVENTS, &self.events, name)
    }
}

fn lookup(names: &[&str], counts: &[usize], name: &str) -> usize {
    names
        .iter()
        .position(|n| *n == name)
        .and_then(|i| counts.get(i).copied())
        .unwrap_or(0)
}

impl FeatureFragment for HtmlFeatures {
    fn fields(&self) -> Vec<(String, FeatureValue)> {
        let mut fields = Vec::with_capacity(2 + HTML_TAGS.len() + HTML_ATTRIBUTES.len() + HTML_EVENTS.len());
        fields.push(("html_length".to_string(), self.length.into()));
        for (name, count) in HTML_TAGS.iter().zip(&self.tags) {
            fields.push((format!("html_tag_{}", name), (*count).into()));
        }
        for (name, count) in HTML_ATTRIBUTES.iter().zip(&self.attributes) {
            fields.push((format!("html_attr_{}", name), (*count).into()));
        }
        for (name, count) in HTML_EVENTS.iter().zip(&self.events) {
            fields.push((format!("html_event_{}", name), (*count).into()));
        }
        fields.push(("js_file".to_string(), self.js_file.into()));
        fields
    }
}

/// Result of one HTML pass
#[derive(Debug, Clone, Default)]
pub struct HtmlAnalysis {
    /// Counted features
    pub features: HtmlFeatures,
    /// Script text found in the document, in document order
    pub scripts: Vec<String>,
}

impl HtmlAnalysis {
    /// All extracted script text joined with newlines
    pub fn script_text(&self) -> String {
        self.scripts.join("\n")
    }
}

struct FeatureSink {
    features: HtmlFeatures,
    scripts: Vec<String>,
    in_script: bool,
    script_body: String,
}

impl FeatureSink {
    fn new(length: usize) -> Self {
        Self {
            features: HtmlFeatures {
                length,
                ..Default::default()
            },
            scripts: Vec::new(),
            in_script: false,
            script_body: String::new(),
        }
    }

    fn flush_script(&mut self) {
        if self.in_script {
            self.in_script = false;
            let body = std::mem::take(&mut self.script_body);
            if !body.trim().is_empty() {
                self.scripts.push(body);
            }
        }
    }

    fn push_script(&mut self, code: &str) {
        let code = code.trim();
        if !code.is_empty() {
            self.scripts.push(code.to_string());
        }
    }

    fn start_tag(&mut self, tag: &Tag) -> TokenSinkResult<()> {
        let name: &str = &tag.name;

        if let Some(i) = HTML_TAGS.iter().position(|t| *t == name) {
            self.features.tags[i] += 1;
        }

        for attr in &tag.attrs {
            let attr_name: &str = &attr.name.local;
            let value: &str = &attr.value;

            if let Some(i) = HTML_ATTRIBUTES.iter().position(|a| *a == attr_name) {
                self.features.attributes[i] += 1;
            }

            if attr_name.starts_with("on") {
                if let Some(i) = HTML_EVENTS.iter().position(|e| *e == attr_name) {
                    self.features.events[i] += 1;
                }
                self.push_script(value);
            } else if let Some(caps) = JAVASCRIPT_URL.captures(value) {
                self.push_script(&caps[1]);
            }
        }

        match name {
            "script" => {
                if tag.attrs.iter().any(|a| &*a.name.local == "src") {
                    self.features.js_file = true;
                }
                self.flush_script();
                self.in_script = true;
                TokenSinkResult::RawData(RawKind::ScriptData)
            }
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
            _ => TokenSinkResult::Continue,
        }
    }
}

impl TokenSink for FeatureSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.start_tag(&tag),
                TagKind::EndTag => {
                    if &*tag.name == "script" {
                        self.flush_script();
                    }
                }
            },
            Token::CharacterTokens(text) => {
                if self.in_script {
                    self.script_body.push_str(&text);
                }
            }
            Token::EOFToken => self.flush_script(),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Extract HTML features and script text from a document.
///
/// Never fails: malformed markup is tokenized the way a browser would
/// recover from it, and unknown tags or attributes are not counted.
pub fn parse_html(html: &str) -> HtmlAnalysis {
    let sink = FeatureSink::new(html.chars().count());
    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

    let mut input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    let sink = tokenizer.sink;
    HtmlAnalysis {
        features: sink.features,
        scripts: sink.scripts,
    }
}

/// Extract features from a saved page.
///
/// A missing file yields `Ok(None)` so the page can be left out of the
/// dataset; other I/O errors are returned.
pub fn parse_html_file(path: impl AsRef<Path>) -> Result<Option<HtmlAnalysis>> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(parse_html(&String::from_utf8_lossy(&bytes)))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "file not found, skipping");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
