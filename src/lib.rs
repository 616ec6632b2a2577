//! # Site Rebrand
//!
//! Turns an existing web page into a rebranded, self-contained static site:
//! the logo and banner are swapped for uploaded images, the top navigation
//! points at newly generated section pages, and every outbound link and form
//! is redirected to a local placeholder. The result ships as one zip archive.
//!
//! # Architecture: Decide, Mutate, Package
//!
//! ```text
//! 1. Resolve   content.json + selection   →  validated keys        (nothing on disk yet)
//! 2. Rewrite   fetched HTML               →  mutated Document      (pure decision functions)
//! 3. Package   Document + assets + pages  →  website_<uuid>.zip    (private staging dir)
//! ```
//!
//! Every heuristic in stage 2 is a function from a [`dom::Document`] to an
//! outcome value. The functions never log; [`pipeline`] turns outcomes into
//! `tracing` events and a [`pipeline::RunReport`]. This keeps the heuristics
//! testable against small HTML snippets.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Orchestrates a run and enforces step order |
//! | [`dom`] | html5ever document tree, traversal and mutation helpers |
//! | [`rewrite`] | Logo search, branding, navigation, link and form neutralization |
//! | [`sections`] | Section page generation from the content map |
//! | [`pages`] | Built-in page templates rendered with Maud |
//! | [`assemble`] | Staging directory and deterministic zip packaging |
//! | [`assets`] | Banner/logo lookup and optimized copies |
//! | [`imaging`] | Image downscaling behind the [`imaging::ImageOptimizer`] trait |
//! | [`content`] | Content map loading and section selection |
//! | [`fetch`] | Source retrieval over HTTP or from disk |
//! | [`enhance`] | Optional section text rewriting via a chat-completions API |
//! | [`config`] | `site-rebrand.toml` loading, merging and validation |
//! | [`naming`] | Display titles and section file names |
//! | [`types`] | Bundle layout constants and shared small types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Neutralize Before Injecting
//!
//! Links and forms are neutralized before the navigation rewriter adds its
//! section links. Doing it the other way round would point the fresh nav at
//! the placeholder page.
//!
//! ## Staging, Then Archive
//!
//! All files are written into a randomly named staging directory inside the
//! output directory and zipped from there. The archive is written under a
//! `.part` name and renamed when complete, so callers see either a whole
//! archive or none. The staging directory is a `tempfile::TempDir`, which
//! removes it on every exit path.
//!
//! ## Maud For Generated Pages
//!
//! Placeholder and section pages are [Maud](https://maud.lambda.xyz/)
//! templates: malformed HTML is a build error and interpolated titles are
//! escaped. Section content is trusted markup and is inserted verbatim, then
//! parsed so its links can be neutralized.

pub mod assemble;
pub mod assets;
pub mod config;
pub mod content;
pub mod dom;
pub mod enhance;
pub mod fetch;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pages;
pub mod pipeline;
pub mod rewrite;
pub mod sections;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
