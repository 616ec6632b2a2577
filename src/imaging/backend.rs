//! Image optimization backend trait and shared types.
//!
//! The production implementation is
//! [`RustOptimizer`](super::rust_backend::RustOptimizer). Tests use the
//! recording [`MockOptimizer`](tests::MockOptimizer) instead.

use super::params::OptimizeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported image format: {0}")]
    Unsupported(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image optimization backends.
///
/// Implementations must leave `params.source` untouched and either write a
/// complete file to `params.output` or return an error.
pub trait ImageOptimizer {
    fn optimize(&self, params: &OptimizeParams) -> Result<(), OptimizeError>;
}
