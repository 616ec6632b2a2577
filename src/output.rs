//! CLI output formatting.
//!
//! Output is information-first: each section leads with its positional index
//! and display title, with file names as secondary context. Every `format_*`
//! function is pure and returns lines; the matching `print_*` wrapper writes
//! them to stdout.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Sections
//! 001 About → sections/about.html
//! 002 Contact Us → sections/contact_us.html
//!     Enhancement skipped: response contained no text
//!     Dropped: faq
//! Rewrites
//!     Links: 14 → construction.html
//!     Forms: 1 form, 2 submit controls → submit.html
//!     Navigation: existing <nav>, 2 links
//!     Logo: rebuilt <a> wrapper (keyword svg image)
//!     Banner: images/optimized_banner.jpg
//! Warnings
//!     no logo supplied
//! Archive
//!     generated/website_0b9f….zip (9 files)
//! ```
//!
//! ## Sections
//!
//! ```text
//! 001 about
//! 002 contact us
//! ```

use crate::content::ContentMap;
use crate::naming::title_case;
use crate::pipeline::RunReport;
use crate::rewrite::branding::{BannerOutcome, LogoOutcome};
use crate::rewrite::forms::FormOutcome;
use crate::rewrite::navigation::{NavContainer, NavOutcome};
use crate::types::{CONSTRUCTION_PAGE, SECTIONS_DIR, SUBMIT_PAGE};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

fn nav_line(nav: &NavOutcome) -> String {
    let container = match &nav.container {
        NavContainer::Existing { tag } => format!("existing <{tag}>"),
        NavContainer::Created => "new <div>".to_string(),
    };
    format!("{container}, {}", plural(nav.links, "link", "links"))
}

fn forms_line(forms: &FormOutcome) -> String {
    format!(
        "{}, {} → {}",
        plural(forms.forms, "form", "forms"),
        plural(
            forms.submit_inputs + forms.submit_buttons,
            "submit control",
            "submit controls"
        ),
        SUBMIT_PAGE
    )
}

fn logo_line(logo: &LogoOutcome) -> String {
    match logo {
        LogoOutcome::Skipped => "skipped".to_string(),
        LogoOutcome::WrapperRebuilt { tag, stage } => format!("rebuilt <{tag}> wrapper ({stage})"),
        LogoOutcome::Replaced { stage } => format!("replaced ({stage})"),
        LogoOutcome::BeforeHeading { heading } => format!("inserted before <{heading}>"),
        LogoOutcome::BodyTop => "inserted at top of body".to_string(),
        LogoOutcome::CreatedBody => "inserted into new body".to_string(),
    }
}

fn banner_line(banner: &BannerOutcome) -> String {
    match banner {
        BannerOutcome::Skipped => "skipped".to_string(),
        BannerOutcome::Inserted { src, .. } => src.clone(),
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the report of a successful build.
pub fn format_run_report(report: &RunReport) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];
    for (i, page) in report.sections.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}/{}",
            format_index(i + 1),
            title_case(&page.key),
            SECTIONS_DIR,
            page.file_name
        ));
        if let Some(reason) = &page.enhance_fallback {
            lines.push(format!("{}Enhancement skipped: {}", indent(1), reason));
        }
    }
    if !report.dropped_keys.is_empty() {
        lines.push(format!("{}Dropped: {}", indent(1), report.dropped_keys.join(", ")));
    }
    if !report.sections.missing.is_empty() {
        lines.push(format!(
            "{}No content: {}",
            indent(1),
            report.sections.missing.join(", ")
        ));
    }
    if !report.sections.collisions.is_empty() {
        lines.push(format!(
            "{}Same file name as an earlier section: {}",
            indent(1),
            report.sections.collisions.join(", ")
        ));
    }

    lines.push("Rewrites".to_string());
    lines.push(format!(
        "{}Links: {} → {}",
        indent(1),
        report.links_neutralized,
        CONSTRUCTION_PAGE
    ));
    lines.push(format!("{}Forms: {}", indent(1), forms_line(&report.forms)));
    lines.push(format!("{}Navigation: {}", indent(1), nav_line(&report.nav)));
    lines.push(format!("{}Logo: {}", indent(1), logo_line(&report.logo)));
    lines.push(format!("{}Banner: {}", indent(1), banner_line(&report.banner)));

    if !report.asset_warnings.is_empty() {
        lines.push("Warnings".to_string());
        for warning in &report.asset_warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }

    lines.push("Archive".to_string());
    lines.push(format!(
        "{}{} ({})",
        indent(1),
        report.archive.display(),
        plural(report.entries.len(), "file", "files")
    ));
    lines
}

pub fn print_run_report(report: &RunReport) {
    for line in format_run_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Sections listing
// ============================================================================

/// Numbered list of the keys in a content map, in file order.
pub fn format_sections_list(map: &ContentMap) -> Vec<String> {
    map.keys()
        .enumerate()
        .map(|(i, key)| format!("{} {}", format_index(i + 1), key))
        .collect()
}

pub fn print_sections_list(map: &ContentMap) {
    for line in format_sections_list(map) {
        println!("{}", line);
    }
}
