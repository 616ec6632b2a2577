//! Run orchestration.
//!
//! ```text
//! content map + selection ──▶ image check ──▶ fetch + parse
//!        (no staging yet)                        │
//!                                                ▼
//!  archive ◀── assemble ◀── nav / logo / banner ◀── neutralize links + forms ◀── staging + assets
//! ```
//!
//! Fatal failures become a [`PipelineError`] and leave nothing behind in the
//! output directory. Recoverable ones (missing upload, failed optimization,
//! failed enhancement) are logged, recorded in the [`RunReport`], and the run
//! continues with the affected piece left out or degraded.
//!
//! Links and forms are neutralized before navigation and branding are
//! rewritten, so the section links injected into the nav survive.

use crate::assemble::{self, AssemblyError, AssemblyInputs, StagingBundle};
use crate::assets::{self, OptimizeSettings, PreparedAsset};
use crate::config::RebrandConfig;
use crate::content::{self, ContentMapError, SelectionError};
use crate::dom::Document;
use crate::enhance::Enhancer;
use crate::fetch::{Fetch, FetchError};
use crate::imaging::{ImageOptimizer, Quality};
use crate::rewrite::branding::{self, BannerOutcome, LogoOutcome};
use crate::rewrite::forms::{self, FormOutcome};
use crate::rewrite::links;
use crate::rewrite::navigation::{self, NavOutcome};
use crate::sections::SectionsOutcome;
use crate::types::{AssetRole, CONSTRUCTION_PAGE, ImageAssets, SUBMIT_PAGE};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("content map error: {0}")]
    ContentMap(#[from] ContentMapError),
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),
    #[error("no banner or logo image supplied")]
    NoImages,
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("assembly error: {0}")]
    Assembly(#[from] AssemblyError),
}

/// What to rebrand.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// `http(s)://` URL or local HTML file.
    pub source: String,
    pub content_path: PathBuf,
    /// Requested section keys; `None` selects every key of the content map.
    pub sections: Option<Vec<String>>,
    pub images: ImageAssets,
}

/// External capabilities used by a run.
pub struct Collaborators<'a> {
    pub fetcher: &'a dyn Fetch,
    pub optimizer: &'a dyn ImageOptimizer,
    pub enhancer: &'a dyn Enhancer,
}

/// Every decision a successful run made.
#[derive(Debug)]
pub struct RunReport {
    pub archive: PathBuf,
    pub archive_name: String,
    pub entries: Vec<String>,
    pub selected: Vec<String>,
    /// Requested keys missing from the content map.
    pub dropped_keys: Vec<String>,
    pub nav: NavOutcome,
    pub banner: BannerOutcome,
    pub logo: LogoOutcome,
    pub asset_warnings: Vec<String>,
    pub links_neutralized: usize,
    pub forms: FormOutcome,
    pub sections: SectionsOutcome,
}

fn prepare_assets(
    optimizer: &dyn ImageOptimizer,
    images: &ImageAssets,
    upload_dir: &Path,
    images_dir: &Path,
    settings: OptimizeSettings,
    warnings: &mut Vec<String>,
) -> (Option<PreparedAsset>, Option<PreparedAsset>) {
    let mut prepare = |role: AssetRole, name: Option<&String>| {
        let Some(name) = name else {
            if role == AssetRole::Logo {
                warn!("no logo supplied, keeping the site's own logo");
                warnings.push("no logo supplied".to_string());
            }
            return None;
        };
        match assets::prepare_asset(optimizer, role, name, upload_dir, images_dir, settings) {
            Ok(asset) => {
                match &asset.optimize_failure {
                    None => debug!(%role, file = %asset.file_name, "optimized image"),
                    Some(reason) => {
                        warn!(%role, name = %asset.name, %reason, "optimization failed, using original");
                        warnings.push(format!("{role} optimization failed ({reason}), using original"));
                    }
                }
                Some(asset)
            }
            Err(e) => {
                warn!(%role, error = %e, "skipping {role}");
                warnings.push(e.to_string());
                None
            }
        }
    };
    let banner = prepare(AssetRole::Banner, images.banner.as_ref());
    let logo = prepare(AssetRole::Logo, images.logo.as_ref());
    (banner, logo)
}

/// Run the whole rebranding pipeline and return the report.
pub fn run(
    request: &RunRequest,
    config: &RebrandConfig,
    collaborators: &Collaborators<'_>,
) -> Result<RunReport, PipelineError> {
    let content_map = content::load_content_map(&request.content_path)?;
    let requested: Vec<String> = match &request.sections {
        Some(keys) => keys.clone(),
        None => content_map.keys().map(str::to_string).collect(),
    };
    let selection = content::select(&content_map, &requested)?;
    for key in &selection.dropped {
        warn!(key = %key, "section not in content map, dropping");
    }
    debug!(keys = ?selection.keys, "selected sections");

    if config.images.require_image && request.images.is_empty() {
        return Err(PipelineError::NoImages);
    }

    let html = collaborators.fetcher.fetch(&request.source)?;
    let document = Document::parse(&html);
    info!(source = %request.source, bytes = html.len(), "fetched source document");

    let output_dir = &config.paths.output_dir;
    let bundle = StagingBundle::acquire(output_dir)?;
    debug!(staging = %bundle.root().display(), "acquired staging directory");

    let mut asset_warnings = Vec::new();
    let settings = OptimizeSettings {
        max_size: (config.images.max_size[0], config.images.max_size[1]),
        quality: Quality::new(config.images.quality),
    };
    let (banner, logo) = prepare_assets(
        collaborators.optimizer,
        &request.images,
        &config.paths.upload_dir,
        &bundle.images_dir(),
        settings,
        &mut asset_warnings,
    );

    let links_neutralized = links::neutralize_links(&document, CONSTRUCTION_PAGE);
    debug!(count = links_neutralized, "neutralized links");
    let form_outcome = forms::neutralize_forms(&document, SUBMIT_PAGE);
    debug!(outcome = ?form_outcome, "neutralized forms");

    let nav = navigation::rewrite(&document, &selection.keys);
    debug!(?nav, "rewrote navigation");
    let logo_outcome = branding::replace_logo(&document, logo.as_ref());
    debug!(outcome = ?logo_outcome, "placed logo");
    let banner_outcome = branding::insert_banner(&document, banner.as_ref());
    debug!(outcome = ?banner_outcome, "placed banner");

    let prepared: Vec<PreparedAsset> = banner.into_iter().chain(logo).collect();
    let inputs = AssemblyInputs {
        assets: &prepared,
        selected_keys: &selection.keys,
        content_map: &content_map,
        enhancer: collaborators.enhancer,
        pages: &config.pages,
    };
    let assembly = assemble::assemble(&document, bundle, output_dir, &inputs)?;

    for page in &assembly.sections.pages {
        if let Some(reason) = &page.enhance_fallback {
            warn!(key = %page.key, %reason, "enhancement failed, using original text");
        }
    }
    for key in &assembly.sections.missing {
        warn!(key = %key, "no content for section");
    }
    for key in &assembly.sections.collisions {
        warn!(key = %key, "section file name already taken, skipping");
    }
    if let Some(e) = &assembly.cleanup_error {
        warn!(error = %e, "failed to remove staging directory");
    }
    info!(
        archive = %assembly.archive.display(),
        entries = assembly.entries.len(),
        "created archive"
    );

    Ok(RunReport {
        archive: assembly.archive,
        archive_name: assembly.archive_name,
        entries: assembly.entries,
        selected: selection.keys,
        dropped_keys: selection.dropped,
        nav,
        banner: banner_outcome,
        logo: logo_outcome,
        asset_warnings,
        links_neutralized,
        forms: form_outcome,
        sections: assembly.sections,
    })
}
