use crate::models::EnhancedProject;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

pub struct ProjectSearch {
    matcher: SkimMatcherV2,
}

impl ProjectSearch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Fuzzy match projects by title or `owner/name`.
    ///
    /// Returns `(index, score)` pairs, best match first. An empty query matches
    /// everything in display order with score 0.
    pub fn search(&self, projects: &[EnhancedProject], query: &str) -> Vec<(usize, i64)> {
        let query = query.trim();
        if query.is_empty() {
            return (0..projects.len()).map(|i| (i, 0)).collect();
        }

        let mut matches: Vec<(usize, i64)> = projects
            .iter()
            .enumerate()
            .filter_map(|(i, project)| {
                let by_title = self.matcher.fuzzy_match(project.title(), query);
                let by_repo = self.matcher.fuzzy_match(&project.repo().to_string(), query);
                by_title.max(by_repo).map(|score| (i, score))
            })
            .collect();

        // Stable sort keeps display order for equal scores
        matches.sort_by(|a, b| b.1.cmp(&a.1));

        matches
    }

    /// Index of the single best match
    pub fn best_match(&self, projects: &[EnhancedProject], query: &str) -> Option<usize> {
        self.search(projects, query).first().map(|(i, _)| *i)
    }
}

impl Default for ProjectSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectConfig, Readme, RemoteMetadata};

    fn create_test_project(repo: &str, title: &str) -> EnhancedProject {
        EnhancedProject::new(
            ProjectConfig {
                repo: repo.parse().unwrap(),
                title: title.to_string(),
                icon: "*".to_string(),
                has_gh_pages: false,
            },
            RemoteMetadata {
                description: String::new(),
                language: None,
                stars: 0,
                forks: 0,
                readme: Readme::Unavailable,
                topics: Vec::new(),
                image_url: None,
                homepage: None,
                repo_base_url: String::new(),
            },
        )
    }

    #[test]
    fn test_fuzzy_search_by_title() {
        let search = ProjectSearch::new();
        let projects = vec![
            create_test_project("me/weather", "Weather Station"),
            create_test_project("me/chess", "Chess Engine"),
        ];

        let results = search.search(&projects, "chess");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 1);
    }

    #[test]
    fn test_fuzzy_search_by_repo() {
        let search = ProjectSearch::new();
        let projects = vec![
            create_test_project("me/wx-station", "Weather Station"),
            create_test_project("me/engine", "Chess"),
        ];

        assert_eq!(search.best_match(&projects, "me/engine"), Some(1));
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let search = ProjectSearch::new();
        let projects = vec![
            create_test_project("me/a", "A"),
            create_test_project("me/b", "B"),
        ];

        assert_eq!(search.search(&projects, "  "), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_no_match() {
        let search = ProjectSearch::new();
        let projects = vec![create_test_project("me/a", "Alpha")];
        assert_eq!(search.best_match(&projects, "zzz"), None);
    }
}
