//! Shared types and the fixed bundle layout.
//!
//! Every produced archive has the same shape:
//!
//! ```text
//! modified_website.html        # rewritten main document
//! construction.html            # placeholder for every neutralized link
//! submit.html                  # placeholder for every neutralized form
//! images/                      # banner/logo assets (optimized when possible)
//! sections/
//! ├── <slug>.html              # one page per selected content-map key
//! └── submit.html              # shared submission acknowledgment
//! ```

pub const MAIN_PAGE: &str = "modified_website.html";
pub const CONSTRUCTION_PAGE: &str = "construction.html";
pub const SUBMIT_PAGE: &str = "submit.html";
pub const IMAGES_DIR: &str = "images";
pub const SECTIONS_DIR: &str = "sections";

/// Prefix given to optimized copies of uploaded images.
pub const OPTIMIZED_PREFIX: &str = "optimized_";

/// Banner and logo file names, relative to the upload directory.
///
/// Either may be absent. The files are never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAssets {
    pub banner: Option<String>,
    pub logo: Option<String>,
}

impl ImageAssets {
    pub fn is_empty(&self) -> bool {
        self.banner.is_none() && self.logo.is_none()
    }
}

/// Which branding slot an asset fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRole {
    Banner,
    Logo,
}

impl std::fmt::Display for AssetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetRole::Banner => write!(f, "banner"),
            AssetRole::Logo => write!(f, "logo"),
        }
    }
}
