//! Heuristic rewrites of the main document.
//!
//! Each submodule is a decision function over a [`Document`](crate::dom::Document)
//! that returns an outcome value describing what it matched and which
//! fallback it took. Nothing here logs; the pipeline turns outcomes into
//! log events and report lines.
//!
//! | Module | Role |
//! |--------|------|
//! | [`logo`] | Ranked search for the existing logo element (read-only) |
//! | [`branding`] | Banner insertion and logo replacement |
//! | [`navigation`] | Primary nav replacement with section links |
//! | [`links`] | Every anchor → placeholder page |
//! | [`forms`] | Every form and submit control → submit page |
//!
//! The keyword tables driving the heuristics are constants in their modules
//! so they can be audited and tested on their own.

pub mod branding;
pub mod forms;
pub mod links;
pub mod logo;
pub mod navigation;
