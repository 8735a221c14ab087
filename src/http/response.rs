// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

/// HTTP response representation
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Build a 200 response with the given content type
    pub fn with_content_type(url: Url, content_type: &str, body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(content_type) {
            headers.insert(CONTENT_TYPE, value);
        }
        Self::new(StatusCode::OK, headers, body.into(), url, 0)
    }

    /// Build a 200 `text/html` response
    pub fn html(url: Url, body: impl Into<Bytes>) -> Self {
        Self::with_content_type(url, "text/html; charset=utf-8", body)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Check if the response is an HTML document.
    ///
    /// The `Content-Type` header decides when present. Without one the body
    /// is sniffed for a doctype or `<html>` start.
    pub fn is_html(&self) -> bool {
        match self.content_type() {
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.contains("text/html") || ct.contains("application/xhtml")
            }
            None => sniff_html(&self.body),
        }
    }

    /// Get the final URL as string
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

fn sniff_html(body: &[u8]) -> bool {
    let head: Vec<u8> = body
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(16)
        .map(|b| b.to_ascii_lowercase())
        .collect();
    head.starts_with(b"<!doctype html") || head.starts_with(b"<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_response_status() {
        let resp = Response::new(StatusCode::OK, HeaderMap::new(), Bytes::new(), url(), 100);
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_is_html_from_header() {
        assert!(Response::html(url(), "<p>hi</p>").is_html());
        assert!(Response::with_content_type(url(), "application/xhtml+xml", "").is_html());
        assert!(!Response::with_content_type(url(), "application/pdf", "%PDF").is_html());
        assert!(!Response::with_content_type(url(), "image/png", "<html>").is_html());
    }

    #[test]
    fn test_is_html_sniffed() {
        let resp = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from("  \n<!DOCTYPE html><html></html>"),
            url(),
            0,
        );
        assert!(resp.is_html());

        let resp = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from("{\"json\": true}"),
            url(),
            0,
        );
        assert!(!resp.is_html());
    }

    #[test]
    fn test_response_text() {
        let resp = Response::html(url(), "Hello, World!");
        assert_eq!(resp.text_lossy(), "Hello, World!");
        assert_eq!(resp.body_len(), 13);
    }
}
