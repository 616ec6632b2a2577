//! Section page generation.
//!
//! One standalone page per selected key, written to `sections/<slug>.html`:
//!
//! ```text
//! content map ──▶ enhancer (original on failure) ──▶ parse as fragment
//!             ──▶ neutralize links ──▶ serialize ──▶ section_page()
//! ```
//!
//! Only the content is neutralized, so the generated back-link to the main
//! page keeps working. A `sections/submit.html` acknowledgment is written
//! once, next to the pages.

use crate::content::ContentMap;
use crate::dom::Fragment;
use crate::enhance::{Enhancer, enhance_or_original};
use crate::naming::{section_file_name, title_case};
use crate::pages;
use crate::rewrite::links::neutralize_links_under;
use crate::types::{CONSTRUCTION_PAGE, SUBMIT_PAGE};
use std::collections::HashSet;
use std::path::Path;

/// A section page that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPage {
    pub key: String,
    pub file_name: String,
    pub links_neutralized: usize,
    /// Why enhancement was skipped, when it failed.
    pub enhance_fallback: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionsOutcome {
    pub pages: Vec<SectionPage>,
    /// Selected keys with no entry in the content map.
    pub missing: Vec<String>,
    /// Selected keys skipped because an earlier key has the same file name.
    pub collisions: Vec<String>,
    /// Whether `sections/submit.html` was created by this call.
    pub submit_created: bool,
}

fn section_placeholder() -> String {
    format!("../{CONSTRUCTION_PAGE}")
}

/// Render the final HTML for one section.
///
/// The content is parsed as a fragment and its links are neutralized before
/// it is embedded, so stray end tags in the content cannot move anchors out
/// of reach. Returns the page and the number of content links rewritten.
pub fn render_section(key: &str, content: &str) -> (String, usize) {
    let fragment = Fragment::parse(content, "p");
    let neutralized = neutralize_links_under(&fragment.root(), &section_placeholder());
    let page = pages::section_page(&title_case(key), &fragment.to_html());
    (page.into_string(), neutralized)
}

/// Write one page per selected key into `sections_dir`, plus the shared
/// submit acknowledgment.
pub fn generate(
    selected_keys: &[String],
    content_map: &ContentMap,
    enhancer: &dyn Enhancer,
    sections_dir: &Path,
) -> std::io::Result<SectionsOutcome> {
    std::fs::create_dir_all(sections_dir)?;
    let mut outcome = SectionsOutcome::default();
    let mut written = HashSet::new();

    for key in selected_keys {
        let Some(content) = content_map.content(key) else {
            outcome.missing.push(key.clone());
            continue;
        };
        let file_name = section_file_name(key);
        if !written.insert(file_name.clone()) {
            outcome.collisions.push(key.clone());
            continue;
        }
        let enhanced = enhance_or_original(enhancer, content, key);
        let (html, links_neutralized) = render_section(key, &enhanced.text);
        std::fs::write(sections_dir.join(&file_name), html)?;
        outcome.pages.push(SectionPage {
            key: key.clone(),
            file_name,
            links_neutralized,
            enhance_fallback: enhanced.fallback,
        });
    }

    let submit_path = sections_dir.join(SUBMIT_PAGE);
    if !submit_path.exists() {
        std::fs::write(&submit_path, pages::section_submit_page().into_string())?;
        outcome.submit_created = true;
    }

    Ok(outcome)
}
