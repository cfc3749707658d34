use crate::aggregate::{aggregate, BatchOutcome};
use crate::github::MetadataSource;
use crate::models::{EnhancedProject, ProjectConfig};
use crate::render::{self, DetailView};
use crate::search::ProjectSearch;

pub const DEFAULT_PAGE_TITLE: &str = "Projects";

/// What the grid currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Loading,
    RateLimited,
    Failed,
    Ready(Vec<EnhancedProject>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Closed,
    Open(usize),
}

/// Application state for one gallery build.
///
/// Created per run and rebuilt from scratch on every load; nothing is cached.
#[derive(Debug)]
pub struct Gallery {
    title: String,
    state: PageState,
    detail: DetailState,
    dropped: usize,
}

impl Gallery {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            state: PageState::Loading,
            detail: DetailState::Closed,
            dropped: 0,
        }
    }

    /// Fetch metadata for every configured project and settle the page state
    pub async fn load<S: MetadataSource>(&mut self, source: &S, configs: &[ProjectConfig]) {
        self.state = PageState::Loading;
        self.detail = DetailState::Closed;
        self.dropped = 0;

        match aggregate(source, configs).await {
            BatchOutcome::RateLimited => self.state = PageState::RateLimited,
            BatchOutcome::Projects { projects, dropped } => {
                self.dropped = dropped;
                self.state = PageState::Ready(projects);
            }
        }
    }

    /// Record an initialization failure (config load, client setup)
    pub fn fail(&mut self, error: &anyhow::Error) {
        tracing::error!("failed to initialize gallery: {error:#}");
        self.state = PageState::Failed;
        self.detail = DetailState::Closed;
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn state(&self) -> &PageState {
        &self.state
    }

    /// Number of configured projects left out because their fetch failed
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    #[must_use]
    pub fn projects(&self) -> &[EnhancedProject] {
        match &self.state {
            PageState::Ready(projects) => projects,
            _ => &[],
        }
    }

    /// Grid content for the current state
    #[must_use]
    pub fn render_grid(&self) -> String {
        match &self.state {
            PageState::Loading => render::loading_message().to_string(),
            PageState::RateLimited => render::rate_limit_message().to_string(),
            PageState::Failed => render::failure_message().to_string(),
            PageState::Ready(projects) if projects.is_empty() => {
                render::empty_message().to_string()
            }
            PageState::Ready(projects) => render::render_cards(projects),
        }
    }

    #[must_use]
    pub fn render_index(&self) -> String {
        render::index_page(&self.title, &self.render_grid())
    }

    /// Open the detail view for a project, rendering it afresh
    pub fn open(&mut self, index: usize) -> Option<DetailView> {
        let project = self.projects().get(index)?;
        let view = DetailView::render(project);
        self.detail = DetailState::Open(index);
        Some(view)
    }

    /// Open the detail view of the best fuzzy match for `query`
    pub fn open_matching(&mut self, query: &str) -> Option<DetailView> {
        let index = ProjectSearch::new().best_match(self.projects(), query)?;
        self.open(index)
    }

    pub fn close(&mut self) {
        self.detail = DetailState::Closed;
    }

    #[must_use]
    pub const fn detail_state(&self) -> DetailState {
        self.detail
    }

    /// Project shown in the open detail view
    #[must_use]
    pub fn open_project(&self) -> Option<&EnhancedProject> {
        match self.detail {
            DetailState::Open(index) => self.projects().get(index),
            DetailState::Closed => None,
        }
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::FetchError;
    use crate::models::{Readme, RemoteMetadata, RepoId};

    struct StaticSource {
        rate_limited: bool,
    }

    impl MetadataSource for StaticSource {
        async fn fetch(&self, repo: &RepoId) -> Result<Option<RemoteMetadata>, FetchError> {
            if self.rate_limited && repo.name() == "b" {
                return Err(FetchError::RateLimited);
            }
            Ok(Some(RemoteMetadata {
                description: format!("{repo} description"),
                language: Some("Rust".to_string()),
                stars: 1,
                forks: 2,
                readme: Readme::Available(format!("# {repo}")),
                topics: vec!["tag".to_string()],
                image_url: None,
                homepage: None,
                repo_base_url: format!("https://raw.githubusercontent.com/{repo}/main/"),
            }))
        }
    }

    fn configs() -> Vec<ProjectConfig> {
        ["me/a", "me/b"]
            .iter()
            .map(|repo| ProjectConfig {
                repo: repo.parse().unwrap(),
                title: format!("Project {repo}"),
                icon: "*".to_string(),
                has_gh_pages: false,
            })
            .collect()
    }

    #[test]
    fn test_new_gallery_is_loading() {
        let gallery = Gallery::default();
        assert_eq!(gallery.state(), &PageState::Loading);
        assert!(gallery.render_grid().contains("Loading projects"));
        assert_eq!(gallery.detail_state(), DetailState::Closed);
    }

    #[tokio::test]
    async fn test_rate_limited_grid_is_only_the_message() {
        let mut gallery = Gallery::default();
        gallery
            .load(&StaticSource { rate_limited: true }, &configs())
            .await;

        assert_eq!(gallery.state(), &PageState::RateLimited);
        assert_eq!(gallery.render_grid(), render::rate_limit_message());
        assert!(gallery.projects().is_empty());
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent() {
        let mut gallery = Gallery::default();
        gallery
            .load(&StaticSource { rate_limited: false }, &configs())
            .await;

        let first = gallery.open(1).unwrap();
        gallery.close();
        gallery.open(0).unwrap();
        gallery.close();
        let again = gallery.open(1).unwrap();

        assert_eq!(first, again);
        assert!(again.body.contains("<h1>me/b</h1>"));
        assert_eq!(gallery.detail_state(), DetailState::Open(1));
        assert_eq!(gallery.open_project().unwrap().title(), "Project me/b");

        gallery.close();
        assert!(gallery.open_project().is_none());
    }

    #[tokio::test]
    async fn test_open_out_of_range_stays_closed() {
        let mut gallery = Gallery::default();
        gallery
            .load(&StaticSource { rate_limited: false }, &configs())
            .await;

        assert!(gallery.open(5).is_none());
        assert_eq!(gallery.detail_state(), DetailState::Closed);
    }

    #[test]
    fn test_failure_state() {
        let mut gallery = Gallery::default();
        gallery.fail(&anyhow::anyhow!("boom"));
        assert_eq!(gallery.render_grid(), render::failure_message());
    }
}
