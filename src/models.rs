use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text shown when GitHub has no description for a repository
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Placeholder README text that is treated the same as a missing README
pub const README_UNAVAILABLE: &str = "README not available";

/// Repository identifier of the form `owner/name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File-system friendly identifier, e.g. `octocat-hello-world`
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}-{}", self.owner, self.name).to_lowercase()
    }
}

impl FromStr for RepoId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((owner, name)) = s.split_once('/') else {
            return Err(format!("'{s}' is not of the form owner/name"));
        };

        if owner.is_empty() || name.is_empty() {
            return Err(format!("'{s}' has an empty owner or name"));
        }
        if name.contains('/') {
            return Err(format!("'{s}' contains more than one '/'"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(format!("'{s}' contains whitespace"));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl TryFrom<String> for RepoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepoId> for String {
    fn from(repo: RepoId) -> Self {
        repo.to_string()
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One entry of the local project list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub repo: RepoId,
    pub title: String,
    pub icon: String,
    #[serde(rename = "hasGhPages", default, skip_serializing_if = "std::ops::Not::not")]
    pub has_gh_pages: bool,
}

/// README content of a repository, or the absence marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readme {
    Available(String),
    Unavailable,
}

impl Readme {
    /// Markdown worth rendering, if any.
    ///
    /// Empty content and the placeholder text both count as missing.
    #[must_use]
    pub fn markdown(&self) -> Option<&str> {
        match self {
            Self::Available(text) if !text.is_empty() && text != README_UNAVAILABLE => {
                Some(text)
            }
            _ => None,
        }
    }
}

impl From<Option<String>> for Readme {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Unavailable, Self::Available)
    }
}

/// Metadata fetched from the hosting API for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMetadata {
    pub description: String,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub readme: Readme,
    pub topics: Vec<String>,
    pub image_url: Option<String>,
    pub homepage: Option<String>,
    pub repo_base_url: String,
}

/// A configured project merged with its fetched metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedProject {
    pub config: ProjectConfig,
    pub metadata: RemoteMetadata,
}

impl EnhancedProject {
    #[must_use]
    pub const fn new(config: ProjectConfig, metadata: RemoteMetadata) -> Self {
        Self { config, metadata }
    }

    #[must_use]
    pub const fn repo(&self) -> &RepoId {
        &self.config.repo
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.config.title
    }
}

impl fmt::Display for EnhancedProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.config.title)
    }
}

/// Subset of `GET /repos/{owner}/{repo}` that the gallery consumes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoResponse {
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    pub homepage: Option<String>,
    pub default_branch: Option<String>,
}

/// Subset of `GET /repos/{owner}/{repo}/readme`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadmeResponse {
    pub content: Option<String>,
    pub encoding: Option<String>,
}
