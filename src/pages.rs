//! Built-in HTML pages written into every bundle.
//!
//! | Page | Location | Purpose |
//! |------|----------|---------|
//! | [`construction_page`] | `construction.html` | Target of every neutralized link |
//! | [`submit_page`] | `submit.html` | Target of every neutralized form |
//! | [`section_page`] | `sections/<slug>.html` | One per selected section |
//! | [`section_submit_page`] | `sections/submit.html` | Acknowledgment next to the sections |
//!
//! The two root placeholders can be replaced by user files through the
//! `[pages]` config table; section pages are always generated.

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// `id` of the element wrapping section content. Link neutralization on
/// section pages is confined to this subtree.
const SECTION_CONTENT_ID: &str = "section-content";

const BACK_TO_HOME: &str = "../modified_website.html";

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.5; color: #222; }
h1 { font-weight: 600; }
.back { margin-top: 2rem; }
"#;

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

pub fn construction_page() -> Markup {
    base_document(
        "Under Construction",
        html! {
            h1 { "Under Construction" }
            p { "This page is not available yet. Please check back soon." }
        },
    )
}

pub fn submit_page() -> Markup {
    base_document(
        "Form Submission",
        html! {
            h1 { "Form Submission" }
            p { "Thank you. Your form has been submitted." }
        },
    )
}

/// A section page. `content_html` is trusted markup and is inserted as-is.
pub fn section_page(title: &str, content_html: &str) -> Markup {
    base_document(
        title,
        html! {
            h1 { (title) }
            div id=(SECTION_CONTENT_ID) {
                p { (PreEscaped(content_html)) }
            }
            p.back { a href=(BACK_TO_HOME) { "← Back to Home" } }
        },
    )
}

pub fn section_submit_page() -> Markup {
    base_document(
        "Form Submission",
        html! {
            h1 { "Form Submission" }
            p { "Your form has been submitted." }
            p.back { a href=(BACK_TO_HOME) { "Back to Home" } }
        },
    )
}
