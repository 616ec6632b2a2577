//! Banner insertion and logo replacement.
//!
//! Both operations take an optional [`PreparedAsset`]; `None` leaves the
//! document untouched and reports [`BannerOutcome::Skipped`] /
//! [`LogoOutcome::Skipped`].
//!
//! Logo placement when an asset is supplied:
//!
//! ```text
//! located, parent is div/span/a ──▶ rebuild parent (style + class only) around new logo
//! located, any other parent     ──▶ replace located node
//! not located, h1/h2/h3 exists  ──▶ insert before first heading
//! not located, body exists      ──▶ first child of body
//! otherwise                     ──▶ create body holding the logo
//! ```

use super::logo::{self, LogoStage};
use crate::assets::PreparedAsset;
use crate::dom::{self, Document};

pub const BANNER_ALT: &str = "Homepage Banner";
pub const BANNER_STYLE: &str = "display: block; width: 100%; margin: 10px auto;";
pub const LOGO_ALT: &str = "Custom Logo";
pub const LOGO_STYLE: &str = "max-height: 92px; display: block; margin: 30px auto;";

/// Parents that are treated as a logo wrapper and rebuilt around the new logo.
const WRAPPER_TAGS: &[&str] = &["div", "span", "a"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerOutcome {
    Skipped,
    Inserted { src: String, created_body: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoOutcome {
    Skipped,
    /// The located logo's wrapper element was rebuilt around the new logo.
    WrapperRebuilt { tag: String, stage: LogoStage },
    /// The located logo element itself was swapped out.
    Replaced { stage: LogoStage },
    BeforeHeading { heading: String },
    BodyTop,
    CreatedBody,
}

/// Insert the banner image as the first child of `<body>`.
pub fn insert_banner(document: &Document, banner: Option<&PreparedAsset>) -> BannerOutcome {
    let Some(banner) = banner else {
        return BannerOutcome::Skipped;
    };
    let src = banner.href();
    let img = dom::create_element(
        "img",
        &[("src", &src), ("alt", BANNER_ALT), ("style", BANNER_STYLE)],
    );
    let (body, created_body) = document.ensure_body();
    dom::prepend_child(&body, &img);
    BannerOutcome::Inserted { src, created_body }
}

/// Put the custom logo where the site's own logo was, or somewhere prominent
/// when no logo can be found.
pub fn replace_logo(document: &Document, logo: Option<&PreparedAsset>) -> LogoOutcome {
    let Some(logo) = logo else {
        return LogoOutcome::Skipped;
    };
    let new_logo = dom::create_element(
        "img",
        &[("src", &logo.href()), ("alt", LOGO_ALT), ("style", LOGO_STYLE)],
    );

    if let Some(found) = logo::locate(document) {
        let parent = dom::parent(&found.node);
        let wrapper_tag = parent
            .as_ref()
            .and_then(dom::tag_name)
            .filter(|tag| WRAPPER_TAGS.contains(tag))
            .map(str::to_string);

        if let (Some(parent), Some(tag)) = (parent, wrapper_tag) {
            let mut attrs = Vec::new();
            let style = dom::attr(&parent, "style");
            let class = dom::attr(&parent, "class");
            if let Some(style) = style.as_deref() {
                attrs.push(("style", style));
            }
            if let Some(class) = class.as_deref() {
                attrs.push(("class", class));
            }
            let wrapper = dom::create_element(&tag, &attrs);
            dom::append_child(&wrapper, &new_logo);
            if dom::replace_node(&parent, &wrapper) {
                return LogoOutcome::WrapperRebuilt {
                    tag,
                    stage: found.stage,
                };
            }
        } else if dom::replace_node(&found.node, &new_logo) {
            return LogoOutcome::Replaced { stage: found.stage };
        }
    }

    if let Some(heading) = document.first_element(&["h1", "h2", "h3"]) {
        if dom::insert_before(&heading, &new_logo) {
            return LogoOutcome::BeforeHeading {
                heading: dom::tag_name(&heading).unwrap_or_default().to_string(),
            };
        }
    }

    let (body, created_body) = document.ensure_body();
    dom::prepend_child(&body, &new_logo);
    if created_body {
        LogoOutcome::CreatedBody
    } else {
        LogoOutcome::BodyTop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetRole;
    use std::path::PathBuf;

    fn asset(role: AssetRole, file_name: &str) -> PreparedAsset {
        PreparedAsset {
            role,
            name: file_name.trim_start_matches("optimized_").to_string(),
            original: PathBuf::from("uploads").join(file_name),
            file_name: file_name.to_string(),
            optimize_failure: None,
        }
    }

    fn custom_logos(doc: &Document) -> Vec<dom::Handle> {
        doc.elements(&["img"])
            .into_iter()
            .filter(|img| dom::attr(img, "alt").as_deref() == Some(LOGO_ALT))
            .collect()
    }

    // =========================================================================
    // Banner
    // =========================================================================

    #[test]
    fn banner_is_first_child_of_body() {
        let doc = Document::parse("<body><p>first</p></body>");
        let banner = asset(AssetRole::Banner, "optimized_banner.jpg");

        let outcome = insert_banner(&doc, Some(&banner));
        assert_eq!(
            outcome,
            BannerOutcome::Inserted {
                src: "images/optimized_banner.jpg".into(),
                created_body: false
            }
        );

        let body = doc.body().unwrap();
        let first = dom::first_element_under(&body, &["img", "p"]).unwrap();
        assert_eq!(dom::tag_name(&first), Some("img"));
        assert_eq!(dom::attr(&first, "alt").as_deref(), Some(BANNER_ALT));
        assert_eq!(dom::attr(&first, "style").as_deref(), Some(BANNER_STYLE));
    }

    #[test]
    fn no_banner_is_noop() {
        let doc = Document::parse("<p>x</p>");
        let before = doc.to_html();
        assert_eq!(insert_banner(&doc, None), BannerOutcome::Skipped);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn unoptimized_banner_uses_original_name() {
        let doc = Document::parse("<p>x</p>");
        let mut banner = asset(AssetRole::Banner, "banner.svg");
        banner.optimize_failure = Some("unsupported".into());
        insert_banner(&doc, Some(&banner));
        assert!(doc.to_html().contains(r#"src="images/banner.svg""#));
    }

    // =========================================================================
    // Logo
    // =========================================================================

    #[test]
    fn wrapper_is_rebuilt_with_style_and_class_only() {
        let doc = Document::parse(
            r#"<a href="/" class="home" style="color: red" data-track="x"><img src="logo.png"><span>Acme</span></a>"#,
        );
        let logo = asset(AssetRole::Logo, "optimized_logo.png");

        let outcome = replace_logo(&doc, Some(&logo));
        assert_eq!(
            outcome,
            LogoOutcome::WrapperRebuilt {
                tag: "a".into(),
                stage: LogoStage::KeywordImage
            }
        );

        let wrapper = doc.first_element(&["a"]).unwrap();
        assert_eq!(dom::attr(&wrapper, "class").as_deref(), Some("home"));
        assert_eq!(dom::attr(&wrapper, "style").as_deref(), Some("color: red"));
        assert!(!dom::has_attr(&wrapper, "href"));
        assert!(!dom::has_attr(&wrapper, "data-track"));
        assert_eq!(dom::elements_under(&wrapper, &[]).len(), 1);
        assert!(!doc.to_html().contains("Acme"));
        assert_eq!(custom_logos(&doc).len(), 1);
    }

    #[test]
    fn logo_under_other_parent_is_replaced() {
        let doc = Document::parse(r#"<header><img id="old" alt="brand" src="b.png"></header>"#);
        let logo = asset(AssetRole::Logo, "optimized_logo.png");

        let outcome = replace_logo(&doc, Some(&logo));
        assert_eq!(
            outcome,
            LogoOutcome::Replaced {
                stage: LogoStage::KeywordImage
            }
        );
        let header = doc.first_element(&["header"]).unwrap();
        let imgs = dom::elements_under(&header, &["img"]);
        assert_eq!(imgs.len(), 1);
        assert_eq!(dom::attr(&imgs[0], "alt").as_deref(), Some(LOGO_ALT));
        assert!(!doc.to_html().contains(r#"id="old""#));
    }

    #[test]
    fn no_logo_goes_before_first_heading() {
        let doc = Document::parse("<p>intro</p><h2>Welcome</h2><h1>Later</h1>");
        let logo = asset(AssetRole::Logo, "optimized_logo.png");

        let outcome = replace_logo(&doc, Some(&logo));
        assert_eq!(
            outcome,
            LogoOutcome::BeforeHeading {
                heading: "h2".into()
            }
        );
        let html = doc.to_html();
        let logo_at = html.find(LOGO_ALT).unwrap();
        assert!(logo_at > html.find("intro").unwrap());
        assert!(logo_at < html.find("Welcome").unwrap());
    }

    #[test]
    fn no_logo_no_heading_goes_to_body_top() {
        let doc = Document::parse("<p>only text</p>");
        let logo = asset(AssetRole::Logo, "optimized_logo.png");

        assert_eq!(replace_logo(&doc, Some(&logo)), LogoOutcome::BodyTop);
        let body = doc.body().unwrap();
        let first = dom::first_element_under(&body, &["img", "p"]).unwrap();
        assert_eq!(dom::tag_name(&first), Some("img"));
    }

    #[test]
    fn missing_body_is_created() {
        let doc = Document::parse("<html><head><title>x</title></head></html>");
        // html5ever always implies a body; drop it to exercise the fallback.
        if let Some(body) = doc.body() {
            dom::detach(&body);
        }
        let logo = asset(AssetRole::Logo, "optimized_logo.png");

        assert_eq!(replace_logo(&doc, Some(&logo)), LogoOutcome::CreatedBody);
        let body = doc.body().unwrap();
        assert_eq!(dom::elements_under(&body, &["img"]).len(), 1);
    }

    #[test]
    fn no_logo_asset_is_noop() {
        let doc = Document::parse(r#"<img alt="logo" src="a.svg">"#);
        let before = doc.to_html();
        assert_eq!(replace_logo(&doc, None), LogoOutcome::Skipped);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn logo_before_banner_keeps_both() {
        let doc = Document::parse("<p>text</p>");
        let outcome = replace_logo(&doc, Some(&asset(AssetRole::Logo, "optimized_l.png")));
        assert_eq!(outcome, LogoOutcome::BodyTop);
        insert_banner(&doc, Some(&asset(AssetRole::Banner, "optimized_b.jpg")));

        let imgs = doc.elements(&["img"]);
        assert_eq!(imgs.len(), 2);
        assert_eq!(dom::attr(&imgs[0], "alt").as_deref(), Some(BANNER_ALT));
        assert_eq!(dom::attr(&imgs[1], "alt").as_deref(), Some(LOGO_ALT));
    }
}
