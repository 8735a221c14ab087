// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSV output with a fixed header

use std::io;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::error::{Error, Result};
use crate::features::FeatureRecord;

/// Header of a batch: the keys of the first record.
///
/// Every record must have exactly these keys in this order.
pub fn check_schema(records: &[FeatureRecord]) -> Result<Vec<String>> {
    let first = records.first().ok_or(Error::EmptyDataset)?;
    let header = first.keys();
    for (row, record) in records.iter().enumerate().skip(1) {
        let keys = record.keys();
        if keys != header {
            return Err(Error::SchemaMismatch {
                row,
                expected: header,
                found: keys,
            });
        }
    }
    Ok(header)
}

/// Write records to any writer. Nothing is written unless the whole batch
/// passes the schema check.
pub fn write_records<W: io::Write>(records: &[FeatureRecord], out: W) -> Result<usize> {
    let header = check_schema(records)?;
    let mut writer = Writer::from_writer(out);
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(record.values().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Write records to a CSV file. The file is not created on schema errors.
pub fn write_csv(records: &[FeatureRecord], path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    check_schema(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let rows = write_records(records, std::fs::File::create(path)?)?;
    info!(rows, path = %path.display(), "dataset written");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, i64)]) -> FeatureRecord {
        let mut record = FeatureRecord::new();
        for (k, v) in pairs {
            record.insert(*k, *v);
        }
        record
    }

    #[test]
    fn test_write_records() {
        let mut a = record(&[("class", 0), ("url_length", 12)]);
        a.insert("js_file", true);
        let mut b = record(&[("class", 1), ("url_length", 40)]);
        b.insert("js_file", false);

        let mut out = Vec::new();
        assert_eq!(write_records(&[a, b], &mut out).unwrap(), 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "class,url_length,js_file\n0,12,1\n1,40,0\n"
        );
    }

    #[test]
    fn test_schema_mismatch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let records = vec![
            record(&[("class", 0), ("url_length", 1)]),
            record(&[("class", 1), ("html_length", 2)]),
        ];

        let err = write_csv(&records, &path).unwrap_err();
        match err {
            Error::SchemaMismatch { row, expected, found } => {
                assert_eq!(row, 1);
                assert_eq!(expected, vec!["class", "url_length"]);
                assert_eq!(found, vec!["class", "html_length"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_reordered_keys_are_drift() {
        let records = vec![
            record(&[("a", 0), ("b", 1)]),
            record(&[("b", 1), ("a", 0)]),
        ];
        assert!(check_schema(&records).unwrap_err().is_schema_error());
    }

    #[test]
    fn test_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        assert!(matches!(write_csv(&[], &path), Err(Error::EmptyDataset)));
        assert!(!path.exists());
    }

    #[test]
    fn test_text_values_are_quoted() {
        let mut r = FeatureRecord::new();
        r.insert("xss_string", "<a href=\"x\">,");
        let mut out = Vec::new();
        write_records(&[r], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "xss_string\n\"<a href=\"\"x\"\">,\"\n"
        );
    }
}
