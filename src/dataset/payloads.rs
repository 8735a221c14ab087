// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Synthetic attack rows from a payload list
//!
//! Each payload is assumed to land in a vulnerable URL parameter. It yields
//! a reflected row, where the payload travels in the URL, and a stored row,
//! where the URL carries nothing. Both see the payload in the page.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::assembler::ClassLabel;
use super::writer::write_csv;
use crate::error::Result;
use crate::features::{parse_html, parse_js, parse_url, FeatureRecord};

/// One attack payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub xss_string: String,
    /// Injection context, e.g. `tag` or `attribute`
    pub xss_injection: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XssType {
    Reflected,
    Stored,
}

impl fmt::Display for XssType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XssType::Reflected => f.write_str("reflected"),
            XssType::Stored => f.write_str("stored"),
        }
    }
}

/// Load `payloads.json`
pub fn load_payloads(path: impl AsRef<Path>) -> Result<Vec<Payload>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}

/// Row of one payload in one delivery mode
pub fn payload_record(payload: &Payload, xss_type: XssType) -> FeatureRecord {
    let url = match xss_type {
        XssType::Reflected => format!("&param={}", payload.xss_string),
        XssType::Stored => String::new(),
    };
    let analysis = parse_html(&payload.xss_string);
    let js = parse_js(&analysis.script_text());

    let mut record = FeatureRecord::new().with(&ClassLabel::Xss);
    record.insert("xss_injection", payload.xss_injection.as_str());
    record.insert("xss_string", payload.xss_string.as_str());
    record.insert("xss_type", xss_type.to_string());
    record
        .with(&parse_url(&url))
        .with(&analysis.features)
        .with(&js)
}

/// Reflected and stored rows for every payload, in input order
pub fn payload_records(payloads: &[Payload]) -> Vec<FeatureRecord> {
    payloads
        .iter()
        .flat_map(|p| {
            [
                payload_record(p, XssType::Reflected),
                payload_record(p, XssType::Stored),
            ]
        })
        .collect()
}

/// Read payloads and write their rows to a CSV file
pub fn generate_payloads(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<usize> {
    let payloads = load_payloads(input)?;
    write_csv(&payload_records(&payloads), output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(s: &str) -> Payload {
        Payload {
            xss_string: s.to_string(),
            xss_injection: "tag".to_string(),
        }
    }

    #[test]
    fn test_reflected_and_stored() {
        let records = payload_records(&[payload("<script>alert(0)</script>")]);
        assert_eq!(records.len(), 2);

        let reflected = &records[0];
        assert_eq!(reflected.get("xss_type").unwrap().to_string(), "reflected");
        assert_eq!(reflected.get_int("class"), Some(1));
        assert_eq!(reflected.get_int("url_script_tag"), Some(1));
        assert_eq!(reflected.get_int("html_tag_script"), Some(1));
        assert_eq!(reflected.get_int("js_method_alert"), Some(1));

        let stored = &records[1];
        assert_eq!(stored.get("xss_type").unwrap().to_string(), "stored");
        assert_eq!(stored.get_int("url_length"), Some(0));
        assert_eq!(stored.get_int("html_tag_script"), Some(1));
        assert_eq!(stored.keys(), reflected.keys());
    }

    #[test]
    fn test_prefix_columns() {
        let record = payload_record(&payload("<img src=x onerror=alert(1)>"), XssType::Reflected);
        let keys = record.keys();
        assert_eq!(&keys[..5], &["class", "xss_injection", "xss_string", "xss_type", "url_length"]);
        assert_eq!(record.get_int("html_event_onerror"), Some(1));
    }

    #[test]
    fn test_generate_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("payloads.json");
        let output = dir.path().join("attacks.csv");
        std::fs::write(
            &input,
            r#"[{"xss_string": "<svg onload=alert(1)>", "xss_injection": "tag"},
                {"xss_string": "\" onmouseover=\"alert(1)", "xss_injection": "attribute"}]"#,
        )
        .unwrap();

        assert_eq!(generate_payloads(&input, &output).unwrap(), 4);
        let csv = std::fs::read_to_string(&output).unwrap();
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.starts_with("class,xss_injection,xss_string,xss_type,url_length,"));
    }
}
