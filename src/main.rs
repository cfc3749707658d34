use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use showcase::config;
use showcase::error_handling;
use showcase::gallery::{self, Gallery};
use showcase::github::{ClientOptions, GitHubClient};
use showcase::site;
use showcase::ui;
use showcase::urls;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Portfolio gallery generator backed by live GitHub metadata")]
#[command(version)]
#[command(
    long_about = "Builds a static portfolio gallery from a local list of GitHub repositories.\n\nEach repository's description, language, stars, forks, topics and README are fetched live from the GitHub API and rendered as cards with a detail page per project."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch project metadata and write the gallery site
    Build {
        #[command(flatten)]
        source: SourceArgs,
        /// Output directory
        #[arg(short, long, default_value = "site")]
        out: PathBuf,
        /// Page title
        #[arg(long, default_value = gallery::DEFAULT_PAGE_TITLE)]
        title: String,
    },
    /// Fetch project metadata and list the cards
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show the detail view of the project best matching a title or owner/name
    Show {
        /// Title or repository to search for
        query: String,
        #[command(flatten)]
        source: SourceArgs,
        /// Print the detail view as HTML instead of text
        #[arg(long)]
        html: bool,
    },
    /// Check the project list without contacting GitHub
    Validate {
        /// Project list (defaults to ./projects.json, then the user config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Project list (defaults to ./projects.json, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// GitHub API base URL
    #[arg(long, default_value = urls::GITHUB_API_URL)]
    api_url: String,
    /// GitHub token for higher rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl SourceArgs {
    fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_url: Some(self.api_url.clone()),
            token: self.token.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source, out, title } => build_site(&source, &out, title).await,
        Commands::List { source } => list_projects(&source).await,
        Commands::Show {
            query,
            source,
            html,
        } => show_project(&query, &source, html).await,
        Commands::Validate { config } => validate_projects(config.as_deref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the project list and fetch metadata into the gallery
async fn load_gallery(gallery: &mut Gallery, source: &SourceArgs) -> Result<()> {
    let path = config::resolve_projects_path(source.config.as_deref())?;
    let configs = match config::load_projects_from_path(&path) {
        Ok(configs) => configs,
        Err(e) => {
            error_handling::show_config_error(&path, &e);
            return Err(e);
        }
    };

    let client =
        GitHubClient::new(source.client_options()).context("Failed to create GitHub client")?;

    ui::print_info(&format!("Loading {} projects...", configs.len()));
    gallery.load(&client, &configs).await;
    Ok(())
}

/// Load into a fresh gallery; initialization errors become the failed state
async fn loaded_gallery(title: String, source: &SourceArgs) -> Gallery {
    let mut gallery = Gallery::new(title);
    if let Err(e) = load_gallery(&mut gallery, source).await {
        gallery.fail(&e);
    }
    gallery
}

async fn build_site(source: &SourceArgs, out: &Path, title: String) -> Result<()> {
    let gallery = loaded_gallery(title, source).await;

    let summary = site::write_site(&gallery, out)?;
    ui::print_success(&format!(
        "✓ Wrote {} with {} project pages",
        summary.index.display(),
        summary.detail_pages.len()
    ));

    error_handling::handle_gallery_state(&gallery)
}

async fn list_projects(source: &SourceArgs) -> Result<()> {
    let gallery = loaded_gallery(gallery::DEFAULT_PAGE_TITLE.to_string(), source).await;
    error_handling::handle_gallery_state(&gallery)?;

    println!();
    for (index, project) in gallery.projects().iter().enumerate() {
        ui::print_card(index, project);
    }
    Ok(())
}

async fn show_project(query: &str, source: &SourceArgs, html: bool) -> Result<()> {
    let mut gallery = loaded_gallery(gallery::DEFAULT_PAGE_TITLE.to_string(), source).await;
    error_handling::handle_gallery_state(&gallery)?;

    let Some(view) = gallery.open_matching(query) else {
        let titles: Vec<String> = gallery
            .projects()
            .iter()
            .map(|p| format!("  • {} ({})", p.title(), p.repo()))
            .collect();
        ui::show_error_with_help(
            &format!("No project matches '{query}'"),
            &["Available projects:", &titles.join("\n")],
        );
        anyhow::bail!("No project matches '{query}'");
    };

    if html {
        println!("{}", view.to_html("index.html"));
    } else if let Some(project) = gallery.open_project() {
        println!();
        ui::print_detail(project);
    }
    gallery.close();

    Ok(())
}

fn validate_projects(explicit: Option<&Path>) -> Result<()> {
    let path = config::resolve_projects_path(explicit)?;
    let projects = match config::load_projects_from_path(&path) {
        Ok(projects) => projects,
        Err(e) => {
            error_handling::show_config_error(&path, &e);
            return Err(e);
        }
    };

    ui::print_header(&format!("Project list: {}", path.display()));
    for project in &projects {
        let pages = if project.has_gh_pages { " [pages]" } else { "" };
        println!("  {} {} ({}){pages}", project.icon, project.title, project.repo);
    }
    ui::print_success(&format!(
        "✓ Configuration is valid: {} projects",
        projects.len()
    ));
    Ok(())
}
