use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::gallery::Gallery;
use crate::render::{self, DetailView};

/// Names of the detail pages written by the last build, kept inside `projects/`
pub const PAGE_MANIFEST: &str = ".showcase-pages.json";

/// Files written by a site build
#[derive(Debug, Default)]
pub struct SiteSummary {
    pub index: PathBuf,
    pub detail_pages: Vec<PathBuf>,
}

/// Write `index.html` and one detail page per card into `out_dir`.
///
/// Pages listed in the manifest of an earlier build are removed first. Any
/// other file under `projects/` is left untouched.
pub fn write_site(gallery: &Gallery, out_dir: &Path) -> Result<SiteSummary> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let projects_dir = out_dir.join("projects");
    remove_previous_pages(&projects_dir)?;

    let mut summary = SiteSummary::default();
    let mut written = Vec::new();

    if !gallery.projects().is_empty() {
        fs::create_dir_all(&projects_dir).with_context(|| {
            format!("Failed to create pages directory: {}", projects_dir.display())
        })?;
    }
    for (i, project) in gallery.projects().iter().enumerate() {
        let path = out_dir.join(render::detail_page_path(i + 1, project));
        let page = render::detail_page(&DetailView::render(project));
        fs::write(&path, page)
            .with_context(|| format!("Failed to write detail page: {}", path.display()))?;
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            written.push(name.to_string());
        }
        summary.detail_pages.push(path);
    }

    if !written.is_empty() {
        let manifest = projects_dir.join(PAGE_MANIFEST);
        let json = serde_json::to_string_pretty(&written)
            .context("Failed to serialize page manifest")?;
        fs::write(&manifest, json)
            .with_context(|| format!("Failed to write page manifest: {}", manifest.display()))?;
    }

    let index = out_dir.join("index.html");
    fs::write(&index, gallery.render_index())
        .with_context(|| format!("Failed to write index page: {}", index.display()))?;
    summary.index = index;

    tracing::debug!(
        out = %out_dir.display(),
        pages = summary.detail_pages.len(),
        "site written"
    );
    Ok(summary)
}

/// Delete the pages recorded by the previous build, then its manifest
fn remove_previous_pages(projects_dir: &Path) -> Result<()> {
    let manifest = projects_dir.join(PAGE_MANIFEST);
    if !manifest.exists() {
        return Ok(());
    }

    let content = fs::read_to_string(&manifest)
        .with_context(|| format!("Failed to read page manifest: {}", manifest.display()))?;
    let names: Vec<String> = match serde_json::from_str(&content) {
        Ok(names) => names,
        Err(e) => {
            tracing::warn!(
                manifest = %manifest.display(),
                error = %e,
                "ignoring unreadable page manifest"
            );
            Vec::new()
        }
    };

    for name in names.iter().filter(|name| is_page_name(name)) {
        let page = projects_dir.join(name);
        if page.is_file() {
            fs::remove_file(&page)
                .with_context(|| format!("Failed to remove old detail page: {}", page.display()))?;
        }
    }

    fs::remove_file(&manifest)
        .with_context(|| format!("Failed to remove page manifest: {}", manifest.display()))
}

/// A bare `*.html` file name, so a manifest can never reach outside `projects/`
fn is_page_name(name: &str) -> bool {
    Path::new(name)
        .file_name()
        .is_some_and(|file| file == name)
        && Path::new(name).extension().is_some_and(|ext| ext == "html")
}
