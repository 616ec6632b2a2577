//! Parameter types for image optimization.
//!
//! These structs describe *what* to do, not *how*. They sit between the
//! asset preparation code (which decides file names) and the
//! [`backend`](super::backend) (which does the pixel work), so tests can
//! swap in a mock backend without touching naming logic.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// One optimization: read `source`, fit it inside `max_width` × `max_height`
/// (never upscaling) and write the result to `output`.
///
/// The output format follows the extension of `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_width: u32,
    pub max_height: u32,
    pub quality: Quality,
}
