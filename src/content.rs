//! Content map loading and section selection.
//!
//! The content map is a JSON object whose keys name sections and whose values
//! are either the section text or a record with a `content` field:
//!
//! ```json
//! {
//!   "about": "We build things.",
//!   "contact": { "content": "Email us.", "updated": "2024-01-01" }
//! }
//! ```
//!
//! Key order is preserved from the file. Other record fields are ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentMapError {
    #[error("content map not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading content map: {0}")]
    Io(#[from] std::io::Error),
    #[error("content map is empty")]
    Empty,
    #[error("content map is not a valid JSON object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("section '{0}' must be a string or an object with a string 'content' field")]
    InvalidEntry(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no sections selected")]
    Empty,
    #[error("none of the selected sections exist in the content map: {}", .0.join(", "))]
    NoOverlap(Vec<String>),
}

/// Body of one section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SectionBody {
    Text(String),
    Record { content: String },
}

impl SectionBody {
    pub fn content(&self) -> &str {
        match self {
            SectionBody::Text(text) => text,
            SectionBody::Record { content } => content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    pub body: SectionBody,
}

/// Ordered, read-only key → section mapping.
#[derive(Debug, Clone, Default)]
pub struct ContentMap {
    sections: Vec<Section>,
}

impl ContentMap {
    /// Parse a content map from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ContentMapError> {
        if text.trim().is_empty() {
            return Err(ContentMapError::Empty);
        }
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        if object.is_empty() {
            return Err(ContentMapError::Empty);
        }
        let sections = object
            .into_iter()
            .map(|(key, value)| match serde_json::from_value::<SectionBody>(value) {
                Ok(body) => Ok(Section { key, body }),
                Err(_) => Err(ContentMapError::InvalidEntry(key)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sections })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sections.iter().any(|s| s.key == key)
    }

    /// Section text for `key`, whichever shape it was stored in.
    pub fn content(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.body.content())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Load a content map from a JSON file.
pub fn load_content_map(path: &Path) -> Result<ContentMap, ContentMapError> {
    if !path.exists() {
        return Err(ContentMapError::NotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    ContentMap::from_json(&text)
}

/// The validated selection for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selected keys present in the content map, in caller order, deduplicated.
    pub keys: Vec<String>,
    /// Requested keys that the content map does not contain.
    pub dropped: Vec<String>,
}

/// Resolve the caller's requested keys against the content map.
///
/// Unknown keys are dropped (and reported); the run is only rejected when no
/// requested key survives.
pub fn select(map: &ContentMap, requested: &[String]) -> Result<Selection, SelectionError> {
    if requested.is_empty() {
        return Err(SelectionError::Empty);
    }
    let mut keys: Vec<String> = Vec::new();
    let mut dropped: Vec<String> = Vec::new();
    for key in requested {
        if keys.contains(key) || dropped.contains(key) {
            continue;
        }
        if map.contains(key) {
            keys.push(key.clone());
        } else {
            dropped.push(key.clone());
        }
    }
    if keys.is_empty() {
        return Err(SelectionError::NoOverlap(dropped));
    }
    Ok(Selection { keys, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_strings_and_records_in_order() {
        let map = ContentMap::from_json(
            r#"{"zeta": "Last letter.", "about": {"content": "We build things.", "extra": 1}}"#,
        )
        .unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "about"]);
        assert_eq!(map.content("about"), Some("We build things."));
        assert_eq!(map.content("zeta"), Some("Last letter."));
        assert_eq!(map.content("missing"), None);
    }

    #[test]
    fn keys_are_case_preserving() {
        let map = ContentMap::from_json(r#"{"About Us": "x"}"#).unwrap();
        assert!(map.contains("About Us"));
        assert!(!map.contains("about us"));
    }

    #[test]
    fn blank_file_is_empty_error() {
        assert!(matches!(
            ContentMap::from_json("   \n"),
            Err(ContentMapError::Empty)
        ));
    }

    #[test]
    fn empty_object_is_empty_error() {
        assert!(matches!(
            ContentMap::from_json("{}"),
            Err(ContentMapError::Empty)
        ));
    }

    #[test]
    fn non_object_is_json_error() {
        assert!(matches!(
            ContentMap::from_json(r#"["about"]"#),
            Err(ContentMapError::Json(_))
        ));
    }

    #[test]
    fn wrong_value_shape_names_the_key() {
        let err = ContentMap::from_json(r#"{"about": "ok", "count": 3}"#).unwrap_err();
        assert!(matches!(err, ContentMapError::InvalidEntry(ref k) if k == "count"));

        let err = ContentMap::from_json(r#"{"about": {"text": "no content"}}"#).unwrap_err();
        assert!(matches!(err, ContentMapError::InvalidEntry(ref k) if k == "about"));
    }

    #[test]
    fn load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_content_map(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(ContentMapError::NotFound(_))));
    }

    #[test]
    fn load_from_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        std::fs::write(&path, r#"{"about": "We build things."}"#).unwrap();
        let map = load_content_map(&path).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn select_keeps_caller_order_and_drops_unknown() {
        let map = ContentMap::from_json(r#"{"about": "a", "contact": "c"}"#).unwrap();
        let selection = select(&map, &keys(&["contact", "faq", "about", "contact"])).unwrap();
        assert_eq!(selection.keys, keys(&["contact", "about"]));
        assert_eq!(selection.dropped, keys(&["faq"]));
    }

    #[test]
    fn select_empty_request() {
        let map = ContentMap::from_json(r#"{"about": "a"}"#).unwrap();
        assert_eq!(select(&map, &[]), Err(SelectionError::Empty));
    }

    #[test]
    fn select_without_overlap() {
        let map = ContentMap::from_json(r#"{"about": "a"}"#).unwrap();
        assert_eq!(
            select(&map, &keys(&["faq"])),
            Err(SelectionError::NoOverlap(keys(&["faq"])))
        );
    }
}
