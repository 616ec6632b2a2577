//! Form submission neutralization.
//!
//! Forms post to the local submit page instead of their original endpoint,
//! and submit controls are redirected there as well: `<input type=submit>`
//! through `formaction`, `<button type=submit>` through an `onclick` that
//! navigates and cancels the native submit.

use crate::dom::{self, Document, Handle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormOutcome {
    pub forms: usize,
    pub submit_inputs: usize,
    pub submit_buttons: usize,
}

fn is_submit(node: &Handle) -> bool {
    dom::attr(node, "type").is_some_and(|t| t.eq_ignore_ascii_case("submit"))
}

pub fn button_redirect(submit_page: &str) -> String {
    format!("location.href='{submit_page}'; return false;")
}

pub fn neutralize_forms(document: &Document, submit_page: &str) -> FormOutcome {
    let mut outcome = FormOutcome::default();

    for form in document.elements(&["form"]) {
        dom::set_attr(&form, "action", submit_page);
        outcome.forms += 1;
    }

    for control in document.elements(&["input", "button"]) {
        if !is_submit(&control) {
            continue;
        }
        if dom::is_element(&control, "input") {
            dom::set_attr(&control, "formaction", submit_page);
            outcome.submit_inputs += 1;
        } else {
            dom::set_attr(&control, "onclick", &button_redirect(submit_page));
            outcome.submit_buttons += 1;
        }
    }

    outcome
}
