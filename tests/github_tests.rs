
use serde_json::json;
use showcase::aggregate::{aggregate, BatchOutcome};
use showcase::github::{ClientOptions, FetchError, GitHubClient, MetadataSource};
use showcase::models::{ProjectConfig, Readme, RepoId};
use std::time::{Duration, Instant};
use test_utils::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new(ClientOptions {
        api_url: Some(server.uri()),
        ..ClientOptions::default()
    })
    .unwrap()
}

fn repo(id: &str) -> RepoId {
    id.parse().unwrap()
}

fn config(id: &str) -> ProjectConfig {
    ProjectConfig {
        repo: repo(id),
        title: id.to_string(),
        icon: "*".to_string(),
        has_gh_pages: false,
    }
}

#[tokio::test]
async fn test_fetch_repository_with_readme() {
    let server = MockServer::start().await;
    mount_repo(&server, "me/app", repo_body("An app", "develop")).await;
    mount_readme(&server, "me/app", "# App\n\nÜmlauts and emoji 🚀 survive.\n").await;

    let metadata = client(&server).fetch(&repo("me/app")).await.unwrap().unwrap();

    assert_eq!(metadata.description, "An app");
    assert_eq!(metadata.language.as_deref(), Some("Rust"));
    assert_eq!(metadata.stars, 10);
    assert_eq!(metadata.forks, 2);
    assert_eq!(metadata.topics, ["cli", "rust"]);
    assert_eq!(
        metadata.readme,
        Readme::Available("# App\n\nÜmlauts and emoji 🚀 survive.\n".to_string())
    );
    assert_eq!(
        metadata.repo_base_url,
        "https://raw.githubusercontent.com/me/app/develop/"
    );
    assert_eq!(
        metadata.image_url.as_deref(),
        Some("https://raw.githubusercontent.com/me/app/develop/images/overview.png")
    );
}

#[tokio::test]
async fn test_rate_limit_is_distinguished() {
    let server = MockServer::start().await;
    mount_status(&server, "me/app", 403).await;

    let err = client(&server).fetch(&repo("me/app")).await.unwrap_err();
    assert!(matches!(err, FetchError::RateLimited));
}

#[tokio::test]
async fn test_secondary_rate_limit() {
    let server = MockServer::start().await;
    mount_status(&server, "me/app", 429).await;

    let err = client(&server).fetch(&repo("me/app")).await.unwrap_err();
    assert!(err.is_rate_limit());
}

#[tokio::test]
async fn test_not_found_is_absent_not_error() {
    let server = MockServer::start().await;
    mount_status(&server, "me/gone", 404).await;

    assert!(client(&server).fetch(&repo("me/gone")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_readme_is_unavailable() {
    let server = MockServer::start().await;
    mount_repo(&server, "me/app", repo_body("An app", "main")).await;

    let metadata = client(&server).fetch(&repo("me/app")).await.unwrap().unwrap();
    assert_eq!(metadata.readme, Readme::Unavailable);
}

#[tokio::test]
async fn test_undecodable_readme_is_unavailable() {
    let server = MockServer::start().await;
    mount_repo(&server, "me/app", repo_body("An app", "main")).await;
    Mock::given(method("GET"))
        .and(path("/repos/me/app/readme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            // decodes to 0xFF 0xFE, which is not UTF-8
            "content": "//4=\n",
            "encoding": "base64"
        })))
        .mount(&server)
        .await;

    let metadata = client(&server).fetch(&repo("me/app")).await.unwrap().unwrap();
    assert_eq!(metadata.readme, Readme::Unavailable);
}

#[tokio::test]
async fn test_token_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/me/app"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_body("Authed", "main")))
        .mount(&server)
        .await;

    let client = GitHubClient::new(ClientOptions {
        api_url: Some(server.uri()),
        token: Some("secret-token".to_string()),
        timeout: None,
    })
    .unwrap();

    let metadata = client.fetch(&repo("me/app")).await.unwrap().unwrap();
    assert_eq!(metadata.description, "Authed");
}

#[tokio::test]
async fn test_aggregate_over_http_keeps_order_and_drops_missing() {
    let server = MockServer::start().await;
    mount_repo(&server, "me/first", repo_body("First", "main")).await;
    mount_status(&server, "me/missing", 404).await;
    mount_repo(&server, "me/last", repo_body("Last", "main")).await;

    let configs = vec![config("me/first"), config("me/missing"), config("me/last")];
    let outcome = aggregate(&client(&server), &configs).await;

    let BatchOutcome::Projects { projects, dropped } = outcome else {
        panic!("unexpected rate limit");
    };
    let descriptions: Vec<_> = projects
        .iter()
        .map(|p| p.metadata.description.as_str())
        .collect();
    assert_eq!(descriptions, ["First", "Last"]);
    assert_eq!(dropped, 1);
}

#[tokio::test]
async fn test_aggregate_rate_limit_wins() {
    let server = MockServer::start().await;
    mount_repo(&server, "me/first", repo_body("First", "main")).await;
    mount_status(&server, "me/limited", 403).await;

    let configs = vec![config("me/first"), config("me/limited")];
    assert_eq!(
        aggregate(&client(&server), &configs).await,
        BatchOutcome::RateLimited
    );
}

#[tokio::test]
async fn test_aggregate_requests_overlap() {
    let server = MockServer::start().await;
    let repos = ["me/a", "me/b", "me/c", "me/d"];
    for id in repos {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(repo_body(id, "main"))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;
    }

    let configs: Vec<_> = repos.iter().map(|id| config(id)).collect();
    let started = Instant::now();
    let outcome = aggregate(&client(&server), &configs).await;

    // Sequential fetching would take at least 1.6s
    assert!(started.elapsed() < Duration::from_millis(1400));
    assert!(matches!(outcome, BatchOutcome::Projects { dropped: 0, .. }));
}
