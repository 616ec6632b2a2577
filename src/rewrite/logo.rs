//! Ranked logo search.
//!
//! Branding markup is never standardized, so the search runs through stages
//! of decreasing confidence. Each stage scans the whole document before the
//! next one starts; within a stage the first match in document order wins.
//!
//! 1. `<img>` pointing at an `.svg` file with a keyword in src/alt/id/class
//! 2. inline `<svg>` with a keyword in id/class/aria-label/role
//! 3. any `<img>` with a keyword in src/alt/id/class
//! 4. first `<svg>`, else first `<img>`

use crate::dom::{self, Document, Handle};

/// Substrings that mark an element as branding.
pub const LOGO_KEYWORDS: &[&str] = &[
    "logo",
    "brand",
    "site-logo",
    "nav-logo",
    "header-logo",
    "googlelogo",
    "main",
];

/// Which stage of the search produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoStage {
    KeywordVectorImage,
    KeywordInlineSvg,
    KeywordImage,
    FirstInlineSvg,
    FirstImage,
}

impl LogoStage {
    pub fn is_fallback(self) -> bool {
        matches!(self, LogoStage::FirstInlineSvg | LogoStage::FirstImage)
    }
}

impl std::fmt::Display for LogoStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LogoStage::KeywordVectorImage => "keyword svg image",
            LogoStage::KeywordInlineSvg => "keyword inline svg",
            LogoStage::KeywordImage => "keyword image",
            LogoStage::FirstInlineSvg => "first inline svg",
            LogoStage::FirstImage => "first image",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct LogoMatch {
    pub node: Handle,
    pub stage: LogoStage,
}

fn contains_keyword(haystack: &str) -> bool {
    LOGO_KEYWORDS.iter().any(|k| haystack.contains(k))
}

/// `src` with any query string or fragment removed.
fn resolved_path(src: &str) -> &str {
    let end = src.find(['?', '#']).unwrap_or(src.len());
    &src[..end]
}

fn is_vector_source(src: &str) -> bool {
    resolved_path(&src.to_lowercase()).ends_with(".svg")
}

fn combined_attrs(node: &Handle, names: &[&str]) -> String {
    names
        .iter()
        .map(|name| dom::attr_or_empty(node, name))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn image_signature(node: &Handle) -> String {
    combined_attrs(node, &["src", "alt", "id", "class"])
}

fn svg_signature(node: &Handle) -> String {
    combined_attrs(node, &["id", "class", "aria-label", "role"])
}

/// Find the element most likely to be the site logo. Read-only.
pub fn locate(document: &Document) -> Option<LogoMatch> {
    let images = document.elements(&["img"]);
    let svgs = document.elements(&["svg"]);
    let found = |node: &Handle, stage| LogoMatch {
        node: node.clone(),
        stage,
    };

    if let Some(img) = images.iter().find(|img| {
        is_vector_source(&dom::attr_or_empty(img, "src")) && contains_keyword(&image_signature(img))
    }) {
        return Some(found(img, LogoStage::KeywordVectorImage));
    }

    if let Some(svg) = svgs.iter().find(|svg| contains_keyword(&svg_signature(svg))) {
        return Some(found(svg, LogoStage::KeywordInlineSvg));
    }

    if let Some(img) = images
        .iter()
        .find(|img| contains_keyword(&image_signature(img)))
    {
        return Some(found(img, LogoStage::KeywordImage));
    }

    if let Some(svg) = svgs.first() {
        return Some(found(svg, LogoStage::FirstInlineSvg));
    }
    images.first().map(|img| found(img, LogoStage::FirstImage))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located_id(html: &str) -> Option<(String, LogoStage)> {
        let doc = Document::parse(html);
        locate(&doc).map(|m| (dom::attr_or_empty(&m.node, "id"), m.stage))
    }

    #[test]
    fn keyword_tables_are_lowercase() {
        for k in LOGO_KEYWORDS {
            assert_eq!(*k, k.to_lowercase());
        }
    }

    #[test]
    fn vector_keyword_beats_raster_keyword() {
        let html = r#"
            <img id="raster" src="/img/logo.png">
            <img id="vector" src="/img/brand.svg">
        "#;
        assert_eq!(
            located_id(html),
            Some(("vector".into(), LogoStage::KeywordVectorImage))
        );
    }

    #[test]
    fn svg_source_with_query_string_counts_as_vector() {
        let html = r#"
            <img id="raster" alt="Logo" src="/a.png">
            <img id="vector" class="Site-Logo" src="/a.SVG?v=3">
        "#;
        assert_eq!(
            located_id(html),
            Some(("vector".into(), LogoStage::KeywordVectorImage))
        );
    }

    #[test]
    fn svg_file_without_keyword_is_not_stage_one() {
        let html = r#"
            <img id="icon" src="/icons/cart.svg">
            <img id="raster" src="/img/logo.png">
        "#;
        assert_eq!(
            located_id(html),
            Some(("raster".into(), LogoStage::KeywordImage))
        );
    }

    #[test]
    fn inline_svg_keyword_beats_raster_keyword() {
        let html = r#"
            <img id="raster" alt="company logo" src="x.png">
            <svg id="mark" aria-label="Brand mark"></svg>
        "#;
        assert_eq!(
            located_id(html),
            Some(("mark".into(), LogoStage::KeywordInlineSvg))
        );
    }

    #[test]
    fn inline_svg_role_is_checked() {
        let html = r#"<svg id="s1"></svg><svg id="s2" role="main-mark"></svg>"#;
        assert_eq!(
            located_id(html),
            Some(("s2".into(), LogoStage::KeywordInlineSvg))
        );
    }

    #[test]
    fn keyword_match_uses_class_list() {
        let html = r#"
            <img id="first" src="a.png">
            <img id="second" class="header header-logo" src="b.png">
        "#;
        assert_eq!(
            located_id(html),
            Some(("second".into(), LogoStage::KeywordImage))
        );
    }

    #[test]
    fn first_match_in_document_order_wins() {
        let html = r#"
            <div><img id="a" alt="logo" src="a.png"></div>
            <img id="b" alt="logo" src="b.png">
        "#;
        assert_eq!(located_id(html).unwrap().0, "a");
    }

    #[test]
    fn fallback_prefers_svg_over_image() {
        let html = r#"<img id="pic" src="a.png"><svg id="icon"></svg>"#;
        assert_eq!(
            located_id(html),
            Some(("icon".into(), LogoStage::FirstInlineSvg))
        );
    }

    #[test]
    fn fallback_first_image_in_document_order() {
        let html = r#"<p><img id="one" src="a.png"></p><img id="two" src="b.png">"#;
        let (id, stage) = located_id(html).unwrap();
        assert_eq!(id, "one");
        assert_eq!(stage, LogoStage::FirstImage);
        assert!(stage.is_fallback());
    }

    #[test]
    fn no_images_returns_none() {
        assert!(located_id("<h1>Plain</h1><p>text</p>").is_none());
    }

    #[test]
    fn locate_does_not_mutate() {
        let doc = Document::parse(r#"<img alt="logo" src="a.svg">"#);
        let before = doc.to_html();
        let _ = locate(&doc);
        assert_eq!(doc.to_html(), before);
    }
}
