// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::path::Path;

use serde_json::json;
use xssdata::dataset::{generate, GenerateOptions};

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn classes(csv_path: &Path) -> (Vec<String>, Vec<String>) {
    let mut reader = csv::Reader::from_path(csv_path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    let class_column = header.iter().position(|h| h == "class").unwrap();
    let classes = reader
        .records()
        .map(|r| r.unwrap()[class_column].to_string())
        .collect();
    (header, classes)
}

#[tokio::test]
async fn test_benign_and_xss_pages_become_labelled_rows() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();

    let benign = [
        ("http://a.test/", "<html><body><a href='/x'>x</a></body></html>"),
        ("http://b.test/news", "<html><head><script src='/app.js'></script></head></html>"),
        ("http://c.test/?page=2", "<div onclick=\"location.href='/y'\">go</div>"),
    ];
    let mut walk = Vec::new();
    for (i, (url, html)) in benign.iter().enumerate() {
        let rel = format!("html/randomsample/page{}", i);
        write(&base.join(&rel), html);
        walk.push(json!({"url": url, "file_path": rel, "fetched_at": "2026-01-01T00:00:00Z"}));
    }
    // listed but never downloaded
    walk.push(json!({"url": "http://gone.test/", "file_path": "html/randomsample/gone"}));
    write(&base.join("randomwalk.json"), &serde_json::to_string(&walk).unwrap());

    let mut archive = Vec::new();
    for (i, category) in ["XSS", "Script Insertion"].iter().enumerate() {
        let rel = format!("html/xssed/mirror{}", i);
        write(&base.join(&rel), "<script>alert(document.cookie)</script>");
        archive.push(json!({
            "id": i.to_string(),
            "category": category,
            "url": "http://v.test/search?q=%3Cscript%3Ealert(1)%3C%2Fscript%3E",
            "file_urls": ["http://www.xssed.com/mirror/1/full"],
            "files": [{"url": "http://www.xssed.com/mirror/1/full", "path": rel, "checksum": ""}]
        }));
    }
    archive.push(json!({"id": "9", "category": "XSS", "url": "http://w.test/", "files": []}));
    write(&base.join("xssed.json"), &serde_json::to_string(&archive).unwrap());

    let options = GenerateOptions {
        walk_json: Some(base.join("randomwalk.json")),
        archive_json: Some(base.join("xssed.json")),
        base_dir: base.to_path_buf(),
        output: base.join("out/data.csv"),
        concurrency: 4,
    };
    let report = generate(&options).await.unwrap();
    assert_eq!(report.benign, 3);
    assert_eq!(report.xss, 2);
    assert_eq!(report.skipped, 1);

    let (header, classes) = classes(&options.output);
    assert_eq!(header[0], "class");
    assert!(header.contains(&"url_script_tag".to_string()));
    assert!(header.contains(&"html_event_onclick".to_string()));
    assert!(header.contains(&"js_strict_syntax".to_string()));
    assert_eq!(classes, vec!["0", "0", "0", "1", "1"]);
}

#[tokio::test]
async fn test_nothing_to_write_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("randomwalk.json"), "[]");

    let options = GenerateOptions {
        walk_json: Some(dir.path().join("randomwalk.json")),
        archive_json: None,
        base_dir: dir.path().to_path_buf(),
        output: dir.path().join("data.csv"),
        concurrency: 2,
    };
    let err = generate(&options).await.unwrap_err();
    assert!(matches!(err, xssdata::Error::EmptyDataset));
    assert!(!options.output.exists());
}
