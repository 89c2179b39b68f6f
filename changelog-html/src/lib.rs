//! Changelog HTML - Release index page rendering
//!
//! This crate is the presentation layer over `changelog-core`:
//! - Page layout (navigation, library groups, release articles)
//! - Hidden anchors for group and release links
//! - Token to element mapping for release bodies
//! - Release date formatting

pub mod date;
pub mod markup;

use changelog_core::config::RenderConfig;
use changelog_core::{ReleaseGroup, ReleaseNote};
use html_escape::{encode_double_quoted_attribute, encode_text};

pub use markup::render_tokens;

/// Render the full release index page
pub fn render_page(groups: &[ReleaseGroup], config: &RenderConfig) -> String {
    let title = encode_text(&config.title);
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    out.push_str("<section data-app-section=\"docs\">\n");
    out.push_str(&format!(
        "<header><h1 data-head-link=\"1\">{title}</h1></header>\n"
    ));

    out.push_str("<nav>\n");
    for group in groups {
        out.push_str(&format!(
            "<a href=\"#{}\">{}</a>\n",
            encode_double_quoted_attribute(&group.group_id),
            encode_text(&group.library)
        ));
    }
    out.push_str("</nav>\n");

    for group in groups {
        out.push_str(&render_group(group, config));
    }

    out.push_str("</section>\n</body>\n</html>\n");
    out
}

/// Render one library group with all its releases
pub fn render_group(group: &ReleaseGroup, config: &RenderConfig) -> String {
    let group_id = encode_double_quoted_attribute(&group.group_id);
    let mut out = hidden_anchor(&group.group_id, true);

    out.push_str("<section data-release-group>\n");
    out.push_str(&format!(
        "<header><h2 data-head-link=\"2\"><a href=\"#{group_id}\">{}</a></h2></header>\n",
        encode_text(&group.library)
    ));
    for release in &group.releases {
        out.push_str(&render_release(release, config));
    }
    out.push_str("</section>\n");
    out
}

/// Render one release article
pub fn render_release(release: &ReleaseNote, config: &RenderConfig) -> String {
    let release_id = encode_double_quoted_attribute(&release.release_id);
    let mut out = hidden_anchor(&release.release_id, false);

    out.push_str(&format!(
        "<article data-many-lines=\"{}\" data-large-article=\"{}\">\n",
        release.many_lines, release.large_article
    ));
    out.push_str(&format!(
        "<header><h3 data-head-link=\"3\"><a href=\"#{release_id}\">{}</a></h3>",
        encode_text(&release.version)
    ));
    if let Some(time) = date::release_time(release.date) {
        out.push_str(&format!(
            "<time datetime=\"{}\">{}</time>",
            date::iso_date(&time),
            date::display_date(&time)
        ));
    }
    out.push_str("</header>\n");
    out.push_str(&render_tokens(&release.content, config));
    out.push_str("</article>\n");
    out
}

fn hidden_anchor(id: &str, group: bool) -> String {
    let kind = if group { "group" } else { "release" };
    format!(
        "<a data-anchor=\"{kind}\" id=\"{}\" aria-hidden=\"true\"> </a>\n",
        encode_double_quoted_attribute(id)
    )
}
