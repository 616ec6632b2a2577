//! Naming rules for section keys.
//!
//! A content-map key drives three derived names:
//!
//! - **Display title**: title-cased key, used for nav labels and page titles.
//!   `"about us"` → `"About Us"`.
//! - **Slug**: whitespace (and path separators) become `_`, then lowercase.
//!   `"Contact Us"` → `"contact_us"`.
//! - **Section href**: `sections/<slug>.html`, relative to the main page.
//!
//! All three are pure functions so the nav rewriter, the section page
//! generator and the archive checks agree on file names.

use crate::types::SECTIONS_DIR;

/// Title-case a key: the first letter of every run of letters is uppercased,
/// the rest lowercased. Any non-letter starts a new word, so `"faq's"`
/// becomes `"Faq'S"` and `"q&a"` becomes `"Q&A"`.
pub fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut in_word = false;
    for c in key.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// File stem for a section page.
///
/// Path separators are mapped like whitespace so a key can never name a file
/// outside `sections/`.
pub fn section_slug(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect::<String>()
        .to_lowercase()
}

pub fn section_file_name(key: &str) -> String {
    format!("{}.html", section_slug(key))
}

/// Link target for a section page, relative to the main page.
pub fn section_href(key: &str) -> String {
    format!("{}/{}", SECTIONS_DIR, section_file_name(key))
}
