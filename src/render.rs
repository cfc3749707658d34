//! HTML rendering for the gallery.
//!
//! Everything here is a pure function of the project records, so the same
//! record always produces the same markup.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use url::Url;

use crate::models::EnhancedProject;
use crate::urls;

const README_IMAGE_CLASS: &str = "readme-image";
/// Shown in the subtitle when GitHub reports no language
pub const DEFAULT_LANGUAGE: &str = "Software";

/// Escape text for use in HTML content and quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Path of a card's detail page, relative to the site root.
///
/// The 1-based grid position leads the file name, so every card gets its own
/// page even when slugs collide (`a-b/c` and `a/b-c`) or a repo is listed twice.
#[must_use]
pub fn detail_page_path(position: usize, project: &EnhancedProject) -> String {
    format!("projects/{position}-{}.html", project.repo().slug())
}

#[must_use]
pub fn render_tech_tags(topics: &[String]) -> String {
    topics
        .iter()
        .map(|topic| format!("<span class=\"tech-tag\">{}</span>", escape_html(topic)))
        .collect()
}

/// Summary card at grid `position` (1-based), linking to its detail page
#[must_use]
pub fn render_card(position: usize, project: &EnhancedProject) -> String {
    let image_style = project
        .metadata
        .image_url
        .as_deref()
        .map(|url| format!(" style=\"background-image: url('{}');\"", escape_html(url)))
        .unwrap_or_default();

    format!(
        r#"<a class="project-card" href="{href}">
    <div class="project-image"{image_style}>
        <span class="icon-fallback">{icon}</span>
    </div>
    <div class="project-content">
        <h3 class="project-title">{title}</h3>
        <p class="project-description">{description}</p>
        <div class="project-tech">{tags}</div>
    </div>
</a>
"#,
        href = escape_html(&detail_page_path(position, project)),
        icon = escape_html(&project.config.icon),
        title = escape_html(project.title()),
        description = escape_html(&project.metadata.description),
        tags = render_tech_tags(&project.metadata.topics),
    )
}

#[must_use]
pub fn render_cards(projects: &[EnhancedProject]) -> String {
    projects
        .iter()
        .enumerate()
        .map(|(i, project)| render_card(i + 1, project))
        .collect()
}

/// Language, stars, forks and, for Pages projects, a live demo link
#[must_use]
pub fn render_subtitle(project: &EnhancedProject) -> String {
    let metadata = &project.metadata;
    let mut subtitle = format!(
        "{} Project • ⭐ {} • 🍴 {}",
        escape_html(metadata.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)),
        metadata.stars,
        metadata.forks
    );

    if let Some(demo) = urls::live_demo_url(
        project.repo(),
        project.config.has_gh_pages,
        metadata.homepage.as_deref(),
    ) {
        subtitle.push_str(&format!(
            r#" • <a href="{}" class="subtitle-link" target="_blank" rel="noopener noreferrer">🚀 Live Demo</a>"#,
            escape_html(&demo)
        ));
    }

    subtitle
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_GFM
}

/// Resolve a relative asset path against the repository raw base.
///
/// Returns `None` when the path is already absolute or cannot be resolved. A
/// leading `/` refers to the repository root, not the host root.
#[must_use]
pub fn resolve_asset_url(base: &Url, dest: &str) -> Option<String> {
    if dest.is_empty() || dest.starts_with('#') || dest.starts_with("//") {
        return None;
    }
    if Url::parse(dest).is_ok() {
        return None;
    }

    base.join(dest.trim_start_matches('/'))
        .ok()
        .map(String::from)
}

/// Convert README markdown to HTML.
///
/// Line breaks are kept, relative image sources are resolved against `base_url`
/// and every image gets the `readme-image` class.
#[must_use]
pub fn markdown_to_html(markdown: &str, base_url: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let base = Url::parse(base_url).ok();
    let events = Parser::new_ext(markdown, markdown_options()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = base
                .as_ref()
                .and_then(|base| resolve_asset_url(base, &dest_url))
                .map_or(dest_url, CowStr::from);
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out.replace("<img ", &format!("<img class=\"{README_IMAGE_CLASS}\" "))
}

/// README as HTML, or the plain description when there is no usable README
#[must_use]
pub fn render_body(project: &EnhancedProject) -> String {
    project.metadata.readme.markdown().map_or_else(
        || {
            format!(
                "<h3>Description</h3><p>{}</p>",
                escape_html(&project.metadata.description)
            )
        },
        |markdown| markdown_to_html(markdown, &project.metadata.repo_base_url),
    )
}

/// Rendered pieces of an open detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub subtitle: String,
    pub github_url: String,
    pub tech: String,
    pub preview: String,
    pub body: String,
}

impl DetailView {
    #[must_use]
    pub fn render(project: &EnhancedProject) -> Self {
        let preview = project.metadata.image_url.as_deref().map_or_else(
            || "<div class=\"slider-placeholder\">🖼️</div>".to_string(),
            |url| {
                format!(
                    "<img src=\"{}\" alt=\"Project preview for {}\" class=\"slider-image\">",
                    escape_html(url),
                    escape_html(project.title())
                )
            },
        );

        Self {
            title: project.title().to_string(),
            subtitle: render_subtitle(project),
            github_url: urls::github_url(project.repo()),
            tech: render_tech_tags(&project.metadata.topics),
            preview,
            body: render_body(project),
        }
    }

    /// Markup of the detail view, with `close_href` as the close control target
    #[must_use]
    pub fn to_html(&self, close_href: &str) -> String {
        format!(
            r#"<div class="modal" id="projectModal">
<div class="modal-content">
    <a class="close" href="{close}" aria-label="Close">&times;</a>
    <div class="modal-header">
        <h2 id="modalTitle">{title}</h2>
        <p id="modalSubtitle">{subtitle}</p>
        <a id="githubLink" href="{github}" target="_blank" rel="noopener noreferrer">View on GitHub</a>
    </div>
    <div id="modalTech" class="project-tech">{tech}</div>
    <div id="imageSlider"><div class="slider-container">{preview}</div></div>
    <div id="main-content-area">
{body}
    </div>
</div>
</div>
"#,
            close = escape_html(close_href),
            title = escape_html(&self.title),
            subtitle = self.subtitle,
            github = escape_html(&self.github_url),
            tech = self.tech,
            preview = self.preview,
            body = self.body,
        )
    }
}

#[must_use]
pub fn loading_message() -> &'static str {
    r#"<div class="status-message">Loading projects...</div>"#
}

#[must_use]
pub fn rate_limit_message() -> &'static str {
    r#"<div class="error-message"><span class="icon">⏳</span><h3>API limit reached</h3><p>Too many requests in a short time. Please try again in about an hour.</p></div>"#
}

#[must_use]
pub fn failure_message() -> &'static str {
    r#"<div class="error-message"><span class="icon">❌</span><h3>Error</h3><p>The project data could not be loaded.</p></div>"#
}

#[must_use]
pub fn empty_message() -> &'static str {
    r#"<div class="status-message">No projects to show.</div>"#
}

fn document(title: &str, stylesheet: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{stylesheet}">
</head>
<body>
{body}</body>
</html>
"#,
        title = escape_html(title),
        stylesheet = escape_html(stylesheet),
    )
}

/// Index document around the grid content (cards or a status message)
#[must_use]
pub fn index_page(title: &str, grid: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<div class=\"projects-grid\" id=\"projectsGrid\">\n{grid}</div>\n",
        escape_html(title)
    );
    document(title, "style.css", &body)
}

/// Standalone detail document, one directory below the index
#[must_use]
pub fn detail_page(detail: &DetailView) -> String {
    document(&detail.title, "../style.css", &detail.to_html("../index.html"))
}
