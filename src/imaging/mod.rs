//! Image optimization in pure Rust, no system tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format guessed from content) |
//! | **Downscale** | `DynamicImage::resize_exact` with Lanczos3 |
//! | **Encode** | JPEG with configurable quality; PNG, GIF, WebP via `image` |
//!
//! The module is split into:
//! - **Calculations**: pure bounding-box math (unit testable)
//! - **Parameters**: data describing one optimization
//! - **Backend**: [`ImageOptimizer`] trait + [`RustOptimizer`]
//!
//! Optimization is best-effort: callers treat every [`OptimizeError`] as a
//! signal to fall back to the original file.

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{ImageOptimizer, OptimizeError};
pub use calculations::fit_within;
pub use params::{OptimizeParams, Quality};
pub use rust_backend::{RustOptimizer, is_optimizable};
