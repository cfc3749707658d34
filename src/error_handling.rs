use crate::gallery::{Gallery, PageState};
use crate::ui;
use anyhow::Result;
use std::path::Path;

/// Turn the settled gallery state into the command result, with guidance
pub fn handle_gallery_state(gallery: &Gallery) -> Result<()> {
    match gallery.state() {
        PageState::RateLimited => show_rate_limit_error(),
        PageState::Failed => show_load_failure(),
        PageState::Loading => anyhow::bail!("Gallery was never loaded"),
        PageState::Ready(projects) => {
            if gallery.dropped() > 0 {
                ui::print_warning(&format!(
                    "{} configured project(s) could not be fetched and were left out",
                    gallery.dropped()
                ));
                ui::print_info("   • The warnings above name each project and the reason");
            }
            if projects.is_empty() {
                ui::print_warning("No projects to show");
            }
            Ok(())
        }
    }
}

/// Report a project list that could not be loaded
pub fn show_config_error(path: &Path, error: &anyhow::Error) {
    ui::print_error(&format!("Could not load project list: {}", path.display()));
    ui::print_info("Project list issues:");
    ui::print_info(&format!("   • Error: {error:#}"));
    ui::print_info("   • Expected a JSON array of {\"repo\": \"owner/name\", \"title\", \"icon\"}");
    ui::print_info("   • Pass a different file with --config <path>");
}

fn show_rate_limit_error() -> Result<()> {
    ui::print_error("GitHub API rate limit exceeded");
    ui::print_info("Rate limit issues:");
    ui::print_info("   • Wait for the rate limit to reset (usually about an hour)");
    ui::print_info("   • Check your limit: curl -s https://api.github.com/rate_limit");
    ui::print_info("   • Use a personal access token for higher limits: --token or GITHUB_TOKEN");
    anyhow::bail!("GitHub API rate limit exceeded")
}

fn show_load_failure() -> Result<()> {
    ui::print_error("The project data could not be loaded");
    ui::print_info("Initialization failed:");
    ui::print_info("   • Check the project list with 'showcase validate'");
    ui::print_info("   • Re-run with RUST_LOG=showcase=debug for details");
    anyhow::bail!("Failed to load project data")
}
