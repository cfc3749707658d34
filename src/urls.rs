use crate::models::RepoId;

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_WEB_URL: &str = "https://github.com";
pub const RAW_CONTENT_URL: &str = "https://raw.githubusercontent.com";

/// Branch used when the API does not report a default branch
pub const FALLBACK_BRANCH: &str = "HEAD";

/// Preview image checked into the repository at `images/overview.png`
#[must_use]
pub fn derive_image_url(repo: &RepoId, branch: &str) -> String {
    format!("{}images/overview.png", derive_repo_base_url(repo, branch))
}

/// Raw-content root of a branch. Always ends with `/` so relative paths join onto it.
#[must_use]
pub fn derive_repo_base_url(repo: &RepoId, branch: &str) -> String {
    format!("{RAW_CONTENT_URL}/{repo}/{branch}/")
}

/// GitHub Pages address for a repository: `https://<owner>.github.io/<name>/`
#[must_use]
pub fn derive_pages_url(repo: &RepoId) -> String {
    format!("https://{}.github.io/{}/", repo.owner(), repo.name())
}

#[must_use]
pub fn github_url(repo: &RepoId) -> String {
    format!("{GITHUB_WEB_URL}/{repo}")
}

/// Live demo link: an explicit homepage wins, otherwise the Pages address.
///
/// Returns `None` unless the project is flagged as having Pages.
#[must_use]
pub fn live_demo_url(repo: &RepoId, has_gh_pages: bool, homepage: Option<&str>) -> Option<String> {
    if !has_gh_pages {
        return None;
    }

    Some(
        homepage
            .filter(|h| !h.trim().is_empty())
            .map_or_else(|| derive_pages_url(repo), str::to_string),
    )
}
