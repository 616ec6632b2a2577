//! Output assembly: staging directory → zip archive.
//!
//! Everything a run produces is first written into a private staging
//! directory inside the output directory. Only a complete archive is ever
//! visible to callers:
//!
//! ```text
//! <output>/
//! ├── staging-a1B2c3/               # StagingBundle, removed on close or drop
//! │   ├── modified_website.html
//! │   ├── construction.html
//! │   ├── submit.html
//! │   ├── images/
//! │   └── sections/
//! │       ├── <slug>.html
//! │       └── submit.html
//! ├── website_<uuid>.zip.part       # while being written
//! └── website_<uuid>.zip            # renamed into place on success
//! ```
//!
//! Archive entries are added in file-name order with `/`-separated relative
//! paths and a fixed timestamp, so the same staging tree always produces the
//! same archive bytes.

use crate::assets::{PreparedAsset, place_asset};
use crate::config::PagesConfig;
use crate::content::ContentMap;
use crate::dom::Document;
use crate::enhance::Enhancer;
use crate::pages;
use crate::rewrite::links::neutralize_links;
use crate::sections::{self, SectionsOutcome};
use crate::types::{CONSTRUCTION_PAGE, IMAGES_DIR, MAIN_PAGE, SECTIONS_DIR, SUBMIT_PAGE};
use maud::Markup;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const STAGING_PREFIX: &str = "staging-";

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to create staging directory in {}: {source}", .dir.display())]
    Staging {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read page template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to walk staging directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("archive {} was not produced or is empty", .0.display())]
    EmptyArchive(PathBuf),
}

/// Private, randomly named working directory for one run.
///
/// Removed when dropped, so every early return cleans up after itself.
/// [`StagingBundle::close`] does the same but reports failures.
#[derive(Debug)]
pub struct StagingBundle {
    dir: TempDir,
}

impl StagingBundle {
    /// Create `<output_dir>/staging-XXXXXX` with empty `images/` and
    /// `sections/` subdirectories. Creates `output_dir` if needed.
    pub fn acquire(output_dir: &Path) -> Result<Self, AssemblyError> {
        let staging_error = |source| AssemblyError::Staging {
            dir: output_dir.to_path_buf(),
            source,
        };
        fs::create_dir_all(output_dir).map_err(staging_error)?;
        let dir = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(output_dir)
            .map_err(staging_error)?;
        let bundle = Self { dir };
        fs::create_dir_all(bundle.images_dir()).map_err(staging_error)?;
        fs::create_dir_all(bundle.sections_dir()).map_err(staging_error)?;
        Ok(bundle)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root().join(IMAGES_DIR)
    }

    pub fn sections_dir(&self) -> PathBuf {
        self.root().join(SECTIONS_DIR)
    }

    /// Remove the staging directory, reporting any failure.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

/// Whether `name` is a staging directory name.
pub fn is_staging_dir_name(name: &str) -> bool {
    name.starts_with(STAGING_PREFIX)
}

/// Everything besides the main document that goes into the bundle.
pub struct AssemblyInputs<'a> {
    pub assets: &'a [PreparedAsset],
    pub selected_keys: &'a [String],
    pub content_map: &'a ContentMap,
    pub enhancer: &'a dyn Enhancer,
    pub pages: &'a PagesConfig,
}

/// What [`assemble`] produced.
#[derive(Debug)]
pub struct Assembly {
    pub archive: PathBuf,
    pub archive_name: String,
    /// Archive entry names, in archive order.
    pub entries: Vec<String>,
    pub sections: SectionsOutcome,
    /// Links neutralized inside the two placeholder pages.
    pub placeholder_links: usize,
    /// Set when the staging directory could not be removed. The archive is
    /// still valid.
    pub cleanup_error: Option<String>,
}

/// Name for a new archive: `website_<uuid-v4>.zip`.
pub fn archive_file_name() -> String {
    format!("website_{}.zip", uuid::Uuid::new_v4())
}

/// Write a placeholder page, from `template` when given, otherwise from the
/// built-in page. Returns the number of links neutralized in it.
fn write_placeholder(
    target: &Path,
    template: Option<&Path>,
    builtin: fn() -> Markup,
) -> Result<usize, AssemblyError> {
    let html = match template {
        Some(path) => fs::read_to_string(path).map_err(|source| AssemblyError::Template {
            path: path.to_path_buf(),
            source,
        })?,
        None => builtin().into_string(),
    };
    let document = Document::parse(&html);
    let neutralized = neutralize_links(&document, CONSTRUCTION_PAGE);
    fs::write(target, document.to_html())?;
    Ok(neutralized)
}

/// Relative path of `path` under `root` with `/` separators.
fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

fn write_entries(staging_root: &Path, destination: &Path) -> Result<Vec<String>, AssemblyError> {
    let mut zip = ZipWriter::new(File::create(destination)?);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut entries = Vec::new();
    for entry in WalkDir::new(staging_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry_name(staging_root, entry.path()) else {
            continue;
        };
        zip.start_file(name.as_str(), options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        entries.push(name);
    }
    zip.finish()?;
    Ok(entries)
}

/// Zip every file under `staging_root` into `archive_path`.
///
/// The archive is written next to its final location with a `.part` suffix
/// and renamed only once complete; on any failure the partial file is
/// removed.
pub fn write_archive(staging_root: &Path, archive_path: &Path) -> Result<Vec<String>, AssemblyError> {
    let mut part_name = archive_path.as_os_str().to_owned();
    part_name.push(".part");
    let part = PathBuf::from(part_name);

    let entries = match write_entries(staging_root, &part) {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => {
            let _ = fs::remove_file(&part);
            return Err(AssemblyError::EmptyArchive(archive_path.to_path_buf()));
        }
        Err(e) => {
            let _ = fs::remove_file(&part);
            return Err(e);
        }
    };
    if let Err(e) = fs::rename(&part, archive_path) {
        let _ = fs::remove_file(&part);
        return Err(e.into());
    }

    let written = fs::metadata(archive_path).map(|m| m.len()).unwrap_or(0);
    if written == 0 {
        return Err(AssemblyError::EmptyArchive(archive_path.to_path_buf()));
    }
    Ok(entries)
}

/// Fill the staging bundle and package it into `output_dir`.
///
/// Consumes the bundle: it is closed on success and dropped (removed) on
/// failure.
pub fn assemble(
    document: &Document,
    bundle: StagingBundle,
    output_dir: &Path,
    inputs: &AssemblyInputs<'_>,
) -> Result<Assembly, AssemblyError> {
    let root = bundle.root().to_path_buf();

    let placeholder_links = write_placeholder(
        &root.join(CONSTRUCTION_PAGE),
        inputs.pages.construction_path(),
        pages::construction_page,
    )? + write_placeholder(
        &root.join(SUBMIT_PAGE),
        inputs.pages.submit_path(),
        pages::submit_page,
    )?;

    let images_dir = bundle.images_dir();
    for asset in inputs.assets {
        place_asset(asset, &images_dir)?;
    }

    fs::write(root.join(MAIN_PAGE), document.to_html())?;

    let sections = sections::generate(
        inputs.selected_keys,
        inputs.content_map,
        inputs.enhancer,
        &bundle.sections_dir(),
    )?;

    let archive_name = archive_file_name();
    let archive = output_dir.join(&archive_name);
    let entries = write_archive(&root, &archive)?;

    let cleanup_error = bundle.close().err().map(|e| e.to_string());

    Ok(Assembly {
        archive,
        archive_name,
        entries,
        sections,
        placeholder_links,
        cleanup_error,
    })
}
