use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ProjectConfig;
use crate::ui;

pub const PROJECTS_FILE: &str = "projects.json";

/// Get the showcase configuration directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine the user configuration directory")?;
    Ok(base.join("showcase"))
}

/// Pick the project list to load.
///
/// An explicit path always wins. Otherwise `./projects.json` is used when present,
/// falling back to `<config dir>/showcase/projects.json`.
pub fn resolve_projects_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let local = std::env::current_dir()?.join(PROJECTS_FILE);
    if local.exists() {
        return Ok(local);
    }

    Ok(config_dir()?.join(PROJECTS_FILE))
}

/// Load and validate the ordered project list
pub fn load_projects_from_path(path: &Path) -> Result<Vec<ProjectConfig>> {
    if !path.exists() {
        anyhow::bail!("Project list not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project list: {}", path.display()))?;

    let projects = parse_projects(&content)
        .with_context(|| format!("Invalid project list: {}", path.display()))?;

    tracing::debug!(path = %path.display(), count = projects.len(), "loaded project list");
    Ok(projects)
}

/// Parse and validate project list JSON
pub fn parse_projects(content: &str) -> Result<Vec<ProjectConfig>> {
    let projects: Vec<ProjectConfig> = serde_json::from_str(content).context(
        "Expected format: array of project objects with 'repo' (owner/name), 'title', \
        'icon' and optional 'hasGhPages' fields",
    )?;

    for (index, project) in projects.iter().enumerate() {
        if project.title.trim().is_empty() {
            anyhow::bail!(
                "Invalid project at index {index}: 'title' field cannot be empty\n\
                Repository: {}",
                project.repo
            );
        }
    }

    let mut seen = HashSet::new();
    for project in &projects {
        if !seen.insert(&project.repo) {
            ui::print_warning(&format!(
                "Repository '{}' is listed more than once and will be shown repeatedly",
                project.repo
            ));
        }
    }

    Ok(projects)
}
