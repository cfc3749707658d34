use futures::future::join_all;

use crate::github::{FetchError, MetadataSource};
use crate::models::{EnhancedProject, ProjectConfig, RemoteMetadata};

/// Result of fetching metadata for the whole project list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// At least one fetch hit the rate limit. Nothing is rendered.
    RateLimited,
    /// Projects whose fetch succeeded, in configuration order
    Projects {
        projects: Vec<EnhancedProject>,
        dropped: usize,
    },
}

/// Fetch every project concurrently and merge the results.
///
/// All requests are issued before any is awaited and every one runs to
/// completion; a failing item never cancels the others.
pub async fn aggregate<S: MetadataSource>(source: &S, configs: &[ProjectConfig]) -> BatchOutcome {
    tracing::debug!(count = configs.len(), "fetching project metadata");

    let outcomes = join_all(configs.iter().map(|config| source.fetch(&config.repo))).await;
    classify(configs, outcomes)
}

/// Join per-item outcomes into the batch result.
///
/// A rate-limit failure anywhere overrides everything else. Otherwise failed and
/// absent items are dropped and the rest keep their configured order.
pub fn classify<I>(configs: &[ProjectConfig], outcomes: I) -> BatchOutcome
where
    I: IntoIterator<Item = Result<Option<RemoteMetadata>, FetchError>>,
{
    let outcomes: Vec<_> = outcomes.into_iter().collect();

    if outcomes
        .iter()
        .any(|outcome| outcome.as_ref().is_err_and(FetchError::is_rate_limit))
    {
        return BatchOutcome::RateLimited;
    }

    let mut projects = Vec::with_capacity(configs.len());
    let mut dropped = 0;

    for (config, outcome) in configs.iter().zip(outcomes) {
        match outcome {
            Ok(Some(metadata)) => projects.push(EnhancedProject::new(config.clone(), metadata)),
            Ok(None) => {
                tracing::warn!(repo = %config.repo, "no metadata, dropping project");
                dropped += 1;
            }
            Err(e) => {
                tracing::warn!(repo = %config.repo, error = %e, "fetch failed, dropping project");
                dropped += 1;
            }
        }
    }

    BatchOutcome::Projects { projects, dropped }
}
