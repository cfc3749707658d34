use crate::models::EnhancedProject;
use crate::render::DEFAULT_LANGUAGE;
use crate::urls;

/// ANSI color codes
pub struct Colors;

impl Colors {
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const PURPLE: &'static str = "\x1b[35m";
    pub const CYAN: &'static str = "\x1b[36m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const RESET: &'static str = "\x1b[0m";
}

/// Print colored text to stdout
pub fn print_colored(text: &str, color: &str) {
    println!("{}{}{}", color, text, Colors::RESET);
}

/// Print colored text to stderr
pub fn eprint_colored(text: &str, color: &str) {
    eprintln!("{}{}{}", color, text, Colors::RESET);
}

/// Print success message
pub fn print_success(text: &str) {
    print_colored(text, Colors::GREEN);
}

/// Print error message
pub fn print_error(text: &str) {
    eprint_colored(text, Colors::RED);
}

/// Print warning message to stderr, keeping stdout clean for listings
pub fn print_warning(text: &str) {
    eprint_colored(text, Colors::YELLOW);
}

/// Print info message
pub fn print_info(text: &str) {
    print_colored(text, Colors::BLUE);
}

/// Print header message
pub fn print_header(text: &str) {
    print_colored(text, Colors::PURPLE);
}

/// Show a helpful error with suggestions
pub fn show_error_with_help(error: &str, suggestions: &[&str]) {
    print_error(&format!("❌ {error}"));
    eprintln!();
    if !suggestions.is_empty() {
        eprint_colored("💡 Here's how to fix it:", Colors::CYAN);
        for (i, suggestion) in suggestions.iter().enumerate() {
            eprintln!("   {}. {}", i + 1, suggestion);
        }
        eprintln!();
    }
}

/// Plain-text subtitle, mirroring the detail view
#[must_use]
pub fn subtitle_line(project: &EnhancedProject) -> String {
    let metadata = &project.metadata;
    let mut line = format!(
        "{} Project • ⭐ {} • 🍴 {}",
        metadata.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
        metadata.stars,
        metadata.forks
    );
    if let Some(demo) = urls::live_demo_url(
        project.repo(),
        project.config.has_gh_pages,
        metadata.homepage.as_deref(),
    ) {
        line.push_str(&format!(" • 🚀 {demo}"));
    }
    line
}

/// One card as a terminal line: icon, title, repo and description
pub fn print_card(index: usize, project: &EnhancedProject) {
    println!(
        "{:>3}. {} {}{}{} {}({}){}",
        index + 1,
        project.config.icon,
        Colors::GREEN,
        project.title(),
        Colors::RESET,
        Colors::DIM,
        project.repo(),
        Colors::RESET
    );
    println!("     {}", project.metadata.description);
    if !project.metadata.topics.is_empty() {
        print_colored(
            &format!("     [{}]", project.metadata.topics.join("] [")),
            Colors::CYAN,
        );
    }
}

/// Detail view in the terminal; README markdown is printed as-is
pub fn print_detail(project: &EnhancedProject) {
    print_header(&format!("{} {}", project.config.icon, project.title()));
    println!("{}", subtitle_line(project));
    print_info(&urls::github_url(project.repo()));
    if !project.metadata.topics.is_empty() {
        print_colored(
            &format!("[{}]", project.metadata.topics.join("] [")),
            Colors::CYAN,
        );
    }
    println!();

    match project.metadata.readme.markdown() {
        Some(markdown) => println!("{}", markdown.trim_end()),
        None => {
            print_header("Description");
            println!("{}", project.metadata.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectConfig, Readme, RemoteMetadata};
    use crate::render;

    #[test]
    fn test_subtitle_line_matches_detail_view() {
        let project = EnhancedProject::new(
            ProjectConfig {
                repo: "octocat/hello".parse().unwrap(),
                title: "Hello".to_string(),
                icon: "👋".to_string(),
                has_gh_pages: true,
            },
            RemoteMetadata {
                description: "Says hello".to_string(),
                language: None,
                stars: 3,
                forks: 1,
                readme: Readme::Unavailable,
                topics: Vec::new(),
                image_url: None,
                homepage: None,
                repo_base_url: "https://raw.githubusercontent.com/octocat/hello/HEAD/".to_string(),
            },
        );

        let line = subtitle_line(&project);
        assert!(line.starts_with(&format!("{DEFAULT_LANGUAGE} Project • ⭐ 3 • 🍴 1")));
        assert!(render::render_subtitle(&project)
            .starts_with(&format!("{DEFAULT_LANGUAGE} Project")));
        assert!(line.ends_with("🚀 https://octocat.github.io/hello/"));
    }
}
