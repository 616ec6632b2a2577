//! Outbound link neutralization.
//!
//! Every `<a>` that carries an `href` (even an empty one) is pointed at a
//! local placeholder page. `target` is removed so the placeholder opens in
//! place, and `onclick` is dropped from `javascript:` links since the handler
//! usually duplicates the script URL. Anchors without `href` are left alone.
//!
//! Running the neutralizer twice gives the same tree as running it once.

use crate::dom::{self, Document, Handle};

fn is_script_url(href: &str) -> bool {
    href.trim_start()
        .get(..11)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
}

fn neutralize_anchor(anchor: &Handle, placeholder: &str) -> bool {
    let Some(href) = dom::attr(anchor, "href") else {
        return false;
    };
    if is_script_url(&href) {
        dom::remove_attr(anchor, "onclick");
    }
    dom::set_attr(anchor, "href", placeholder);
    dom::remove_attr(anchor, "target");
    true
}

/// Rewrite every anchor below `node`. Returns how many were rewritten.
pub fn neutralize_links_under(node: &Handle, placeholder: &str) -> usize {
    dom::elements_under(node, &["a"])
        .iter()
        .filter(|a| neutralize_anchor(a, placeholder))
        .count()
}

/// Rewrite every anchor in the document. Returns how many were rewritten.
pub fn neutralize_links(document: &Document, placeholder: &str) -> usize {
    neutralize_links_under(document.root(), placeholder)
}
