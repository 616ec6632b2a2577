//! Primary navigation replacement.
//!
//! The nav container is found by content rather than markup: the first
//! `div`, `nav`, `header` or `center` (document order) whose text mentions a
//! typical portal destination. Its children are replaced by one link per
//! selected section.

use crate::dom::{self, Document, Handle};
use crate::naming::{section_href, title_case};

/// Words whose presence marks a container as the site's top navigation.
pub const NAV_KEYWORDS: &[&str] = &[
    "search", "images", "maps", "news", "youtube", "gmail", "drive",
];

const NAV_CONTAINER_TAGS: &[&str] = &["div", "nav", "header", "center"];

pub const NAV_LINK_STYLE: &str = "margin-right: 10px; font-weight: bold;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavContainer {
    /// An existing element was cleared and reused.
    Existing { tag: String },
    /// No candidate matched; a `<div>` was added at the top of body.
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavOutcome {
    pub container: NavContainer,
    pub links: usize,
}

/// Lowercased text with each text node trimmed.
fn compact_text(node: &Handle) -> String {
    dom::stripped_text(node).to_lowercase()
}

fn find_container(document: &Document) -> Option<Handle> {
    document
        .elements(NAV_CONTAINER_TAGS)
        .into_iter()
        .find(|node| {
            let text = compact_text(node);
            NAV_KEYWORDS.iter().any(|k| text.contains(k))
        })
}

/// Replace the nav container's contents with links to the selected sections,
/// in the given order.
pub fn rewrite(document: &Document, selected_keys: &[String]) -> NavOutcome {
    let (nav, container) = match find_container(document) {
        Some(node) => {
            let tag = dom::tag_name(&node).unwrap_or_default().to_string();
            (node, NavContainer::Existing { tag })
        }
        None => {
            let div = dom::create_element("div", &[]);
            let (body, _) = document.ensure_body();
            dom::prepend_child(&body, &div);
            (div, NavContainer::Created)
        }
    };

    dom::clear_children(&nav);
    for key in selected_keys {
        let link = dom::create_element(
            "a",
            &[("href", &section_href(key)), ("style", NAV_LINK_STYLE)],
        );
        dom::append_child(&link, &dom::create_text(&title_case(key)));
        dom::append_child(&nav, &link);
    }

    NavOutcome {
        container,
        links: selected_keys.len(),
    }
}
