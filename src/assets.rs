//! Banner and logo asset preparation.
//!
//! For each supplied asset the original upload is located, an optimized copy
//! is attempted directly inside the bundle's `images/` directory, and the
//! page-relative `src` for the branding rewriter is decided:
//!
//! ```text
//! uploads/logo.png ──optimize──▶ <staging>/images/optimized_logo.png   src="images/optimized_logo.png"
//!                  └─(failed)──▶ <staging>/images/logo.png             src="images/logo.png"
//! ```
//!
//! Uploaded files are never modified.

use crate::imaging::{ImageOptimizer, OptimizeParams, Quality};
use crate::types::{AssetRole, IMAGES_DIR, OPTIMIZED_PREFIX};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("{role} file not found: {}", .path.display())]
    Missing { role: AssetRole, path: PathBuf },
    #[error("{role} name '{name}' must be a plain file name")]
    InvalidName { role: AssetRole, name: String },
}

/// Optimization settings shared by all assets of a run.
#[derive(Debug, Clone, Copy)]
pub struct OptimizeSettings {
    pub max_size: (u32, u32),
    pub quality: Quality,
}

/// An asset that exists and has a decided place in the bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAsset {
    pub role: AssetRole,
    /// Upload file name as supplied by the caller.
    pub name: String,
    /// Location of the untouched upload.
    pub original: PathBuf,
    /// File name inside `images/`.
    pub file_name: String,
    /// Why optimization was skipped or failed; `None` when the optimized
    /// copy is in place.
    pub optimize_failure: Option<String>,
}

impl PreparedAsset {
    pub fn is_optimized(&self) -> bool {
        self.optimize_failure.is_none()
    }

    /// `src` value for elements in the main document.
    pub fn href(&self) -> String {
        format!("{}/{}", IMAGES_DIR, self.file_name)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty() && path.file_name().is_some_and(|f| f == path.as_os_str())
}

/// Locate `name` in `upload_dir` and try to write an optimized copy into
/// `images_dir`.
///
/// A missing upload is an [`AssetError`]; an optimization failure is not an
/// error and is recorded on the returned asset instead.
pub fn prepare_asset(
    optimizer: &dyn ImageOptimizer,
    role: AssetRole,
    name: &str,
    upload_dir: &Path,
    images_dir: &Path,
    settings: OptimizeSettings,
) -> Result<PreparedAsset, AssetError> {
    if !is_plain_file_name(name) {
        return Err(AssetError::InvalidName {
            role,
            name: name.to_string(),
        });
    }
    let original = upload_dir.join(name);
    if !original.is_file() {
        return Err(AssetError::Missing {
            role,
            path: original,
        });
    }

    let optimized_name = format!("{OPTIMIZED_PREFIX}{name}");
    let params = OptimizeParams {
        source: original.clone(),
        output: images_dir.join(&optimized_name),
        max_width: settings.max_size.0,
        max_height: settings.max_size.1,
        quality: settings.quality,
    };

    let (file_name, optimize_failure) = match optimizer.optimize(&params) {
        Ok(()) if params.output.is_file() => (optimized_name, None),
        Ok(()) => (
            name.to_string(),
            Some("optimizer produced no file".to_string()),
        ),
        Err(e) => (name.to_string(), Some(e.to_string())),
    };

    Ok(PreparedAsset {
        role,
        name: name.to_string(),
        original,
        file_name,
        optimize_failure,
    })
}

/// Make sure the bytes behind [`PreparedAsset::href`] exist in `images_dir`.
///
/// Optimized copies are already in place; originals are copied in.
pub fn place_asset(asset: &PreparedAsset, images_dir: &Path) -> std::io::Result<PathBuf> {
    let target = images_dir.join(&asset.file_name);
    if !target.is_file() {
        std::fs::copy(&asset.original, &target)?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockOptimizer;
    use tempfile::TempDir;

    fn settings() -> OptimizeSettings {
        OptimizeSettings {
            max_size: (800, 800),
            quality: Quality::default(),
        }
    }

    fn setup(files: &[&str]) -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let uploads = tmp.path().join("uploads");
        let images = tmp.path().join("images");
        std::fs::create_dir_all(&uploads).unwrap();
        std::fs::create_dir_all(&images).unwrap();
        for f in files {
            std::fs::write(uploads.join(f), f.as_bytes()).unwrap();
        }
        (tmp, uploads, images)
    }

    #[test]
    fn optimized_asset_uses_prefixed_name() {
        let (_tmp, uploads, images) = setup(&["logo.png"]);
        let optimizer = MockOptimizer::new();

        let asset = prepare_asset(
            &optimizer,
            AssetRole::Logo,
            "logo.png",
            &uploads,
            &images,
            settings(),
        )
        .unwrap();

        assert!(asset.is_optimized());
        assert_eq!(asset.href(), "images/optimized_logo.png");
        assert!(images.join("optimized_logo.png").is_file());

        let calls = optimizer.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].max_width, 800);
        assert_eq!(calls[0].source, uploads.join("logo.png"));
    }

    #[test]
    fn failed_optimization_falls_back_to_original() {
        let (_tmp, uploads, images) = setup(&["banner.svg"]);
        let optimizer = MockOptimizer::failing_on(&["banner.svg"]);

        let asset = prepare_asset(
            &optimizer,
            AssetRole::Banner,
            "banner.svg",
            &uploads,
            &images,
            settings(),
        )
        .unwrap();

        assert!(!asset.is_optimized());
        assert_eq!(asset.href(), "images/banner.svg");
        assert!(!images.join("banner.svg").exists());

        let placed = place_asset(&asset, &images).unwrap();
        assert_eq!(std::fs::read(placed).unwrap(), b"banner.svg");
    }

    #[test]
    fn missing_upload_is_error() {
        let (_tmp, uploads, images) = setup(&[]);
        let result = prepare_asset(
            &MockOptimizer::new(),
            AssetRole::Banner,
            "banner.jpg",
            &uploads,
            &images,
            settings(),
        );
        assert!(matches!(
            result,
            Err(AssetError::Missing {
                role: AssetRole::Banner,
                ..
            })
        ));
    }

    #[test]
    fn path_components_rejected() {
        let (_tmp, uploads, images) = setup(&[]);
        for name in ["../secret.png", "sub/logo.png", ""] {
            let result = prepare_asset(
                &MockOptimizer::new(),
                AssetRole::Logo,
                name,
                &uploads,
                &images,
                settings(),
            );
            assert!(
                matches!(result, Err(AssetError::InvalidName { .. })),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn place_optimized_asset_is_noop() {
        let (_tmp, uploads, images) = setup(&["logo.png"]);
        let asset = prepare_asset(
            &MockOptimizer::new(),
            AssetRole::Logo,
            "logo.png",
            &uploads,
            &images,
            settings(),
        )
        .unwrap();

        let placed = place_asset(&asset, &images).unwrap();
        assert_eq!(placed, images.join("optimized_logo.png"));
        assert!(!images.join("logo.png").exists());
    }
}
