//! Shared test utilities.
//!
//! A sample page that exercises every rewriter, a content map writer, and
//! helpers for reading produced archives back.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A small portal-style page: logo inside a link wrapper, a keyword nav,
/// outbound and script links, and a form.
pub const SAMPLE_SITE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Acme Portal</title></head>
<body>
  <div class="top">
    <a href="/" class="brand-link" style="padding: 4px"><img src="/static/acme-logo.svg?v=2" alt="Acme"></a>
  </div>
  <nav class="primary">
    <a href="https://news.example.com" target="_blank">News</a>
    <a href="https://maps.example.com">Maps</a>
    <a href="javascript:void(0)" onclick="openMenu()">More</a>
  </nav>
  <h1>Welcome to Acme</h1>
  <p>Read <a href="/about">about us</a> or <a name="skip">skip</a>.</p>
  <form action="https://search.example.com/q" method="get">
    <input type="text" name="q">
    <input type="submit" value="Search">
    <button type="submit">Go</button>
  </form>
</body>
</html>
"#;

pub const SAMPLE_CONTENT: &str = r#"{
  "about": "We build <em>things</em>.",
  "contact": {"content": "Write to <a href=\"mailto:hi@acme.test\">us</a>.", "updated": "2024-01-01"},
  "our team": "Five people."
}"#;

/// Write [`SAMPLE_CONTENT`] to `<dir>/content.json`.
pub fn write_content_map(dir: &Path) -> PathBuf {
    let path = dir.join("content.json");
    std::fs::write(&path, SAMPLE_CONTENT).unwrap();
    path
}

pub fn read_zip_entry(archive: &Path, name: &str) -> String {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    text
}
