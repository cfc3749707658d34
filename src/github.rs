use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    Readme, ReadmeResponse, RemoteMetadata, RepoId, RepoResponse, DEFAULT_DESCRIPTION,
};
use crate::urls;

/// Failure of a single repository fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API refused the request because of rate limiting
    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    #[must_use]
    pub const fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Source of per-repository metadata.
///
/// `Ok(None)` means the repository could not be found or read; the caller drops it.
pub trait MetadataSource {
    fn fetch(
        &self,
        repo: &RepoId,
    ) -> impl Future<Output = Result<Option<RemoteMetadata>, FetchError>>;
}

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

/// Client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(options: ClientOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
            if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            } else {
                tracing::warn!("ignoring GitHub token that is not a valid header value");
            }
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let api_url = options
            .api_url
            .unwrap_or_else(|| urls::GITHUB_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http: builder.build()?,
            api_url,
        })
    }

    async fn fetch_repository(&self, repo: &RepoId) -> Result<Option<RepoResponse>, FetchError> {
        let url = format!("{}/repos/{repo}", self.api_url);
        tracing::debug!(%repo, %url, "fetching repository");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if is_rate_limit_status(status) {
            tracing::warn!(%repo, %status, "rate limited by GitHub");
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            tracing::warn!(%repo, %status, "repository not found");
            return Ok(None);
        }

        match response.json::<RepoResponse>().await {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                tracing::warn!(%repo, error = %e, "malformed repository response");
                Ok(None)
            }
        }
    }

    async fn fetch_readme(&self, repo: &RepoId) -> Result<Readme, FetchError> {
        let url = format!("{}/repos/{repo}/readme", self.api_url);
        tracing::debug!(%repo, %url, "fetching readme");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!(%repo, status = %response.status(), "no readme");
            return Ok(Readme::Unavailable);
        }

        let data = response.json::<ReadmeResponse>().await.unwrap_or_default();
        if data.encoding.as_deref().is_some_and(|e| e != "base64") {
            tracing::debug!(%repo, encoding = ?data.encoding, "unsupported readme encoding");
            return Ok(Readme::Unavailable);
        }

        Ok(decode_base64_utf8(data.content.as_deref()).into())
    }
}

impl MetadataSource for GitHubClient {
    async fn fetch(&self, repo: &RepoId) -> Result<Option<RemoteMetadata>, FetchError> {
        let Some(data) = self.fetch_repository(repo).await? else {
            return Ok(None);
        };
        let readme = self.fetch_readme(repo).await?;

        Ok(Some(build_metadata(repo, data, readme)))
    }
}

/// Rate limiting is reported as 403, or 429 for secondary limits
#[must_use]
pub fn is_rate_limit_status(status: StatusCode) -> bool {
    status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
}

/// Decode base64 text as UTF-8.
///
/// GitHub wraps encoded content across lines, so whitespace is ignored. Invalid
/// base64 or invalid UTF-8 gives `None`.
#[must_use]
pub fn decode_base64_utf8(encoded: Option<&str>) -> Option<String> {
    let encoded = encoded?;
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let bytes = STANDARD.decode(compact).ok()?;
    String::from_utf8(bytes).ok()
}

/// Combine the repository response and README into metadata
#[must_use]
pub fn build_metadata(repo: &RepoId, data: RepoResponse, readme: Readme) -> RemoteMetadata {
    let branch = data
        .default_branch
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or(urls::FALLBACK_BRANCH);

    RemoteMetadata {
        description: data
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        language: data.language,
        stars: data.stargazers_count,
        forks: data.forks_count,
        readme,
        topics: data.topics,
        image_url: Some(urls::derive_image_url(repo, branch)),
        homepage: data.homepage.filter(|h| !h.trim().is_empty()),
        repo_base_url: urls::derive_repo_base_url(repo, branch),
    }
}
