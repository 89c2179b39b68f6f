//! Token to HTML mapping
//!
//! Every token kind maps to one element. Attributes the page does not
//! support are logged and dropped, and tokens without a dedicated variant are
//! shown as a visible marker instead of failing the page.

use changelog_core::config::RenderConfig;
use changelog_core::format_id;
use changelog_core::token::{extract_text, ExtractOptions, Token};
use html_escape::{encode_double_quoted_attribute, encode_text};
use log::warn;

/// Render a token sequence
pub fn render_tokens(tokens: &[Token], config: &RenderConfig) -> String {
    let mut out = String::new();
    for token in tokens {
        render_token(token, config, &mut out);
    }
    out
}

fn render_children(children: &[Token], config: &RenderConfig, out: &mut String) {
    for child in children {
        render_token(child, config, out);
    }
}

fn wrap(tag: &str, children: &[Token], config: &RenderConfig, out: &mut String) {
    out.push_str(&format!("<{tag}>"));
    render_children(children, config, out);
    out.push_str(&format!("</{tag}>"));
}

fn render_token(token: &Token, config: &RenderConfig, out: &mut String) {
    match token {
        Token::Strong { children } => wrap("strong", children, config, out),
        Token::Emphasis { children } => wrap("em", children, config, out),
        Token::Strikethrough { children } => wrap("del", children, config, out),
        Token::BlockQuote { children } => {
            wrap("blockquote", children, config, out);
            out.push('\n');
        }
        Token::HardBreak => out.push_str("<br>"),
        Token::SoftBreak => out.push('\n'),
        Token::Rule => out.push_str("<hr>\n"),
        Token::CodeSpan { value } => {
            out.push_str(&format!("<code>{}</code>", encode_text(value)));
        }
        Token::Text { value } | Token::Html { value } => out.push_str(&encode_text(value)),
        Token::Paragraph { children } => {
            out.push_str("<p data-md-element=\"paragraph\">");
            render_children(children, config, out);
            out.push_str("</p>\n");
        }
        Token::Heading { level, children } => render_heading(*level, children, config, out),
        Token::Link {
            href,
            title,
            children,
        } => {
            if let Some(title) = title {
                warn!("link title is not supported, ignoring {title:?}");
            }
            let href = if config.rewrite_md_links {
                rewrite_md_link(href)
            } else {
                href.clone()
            };
            out.push_str(&format!(
                "<a href=\"{}\">",
                encode_double_quoted_attribute(&href)
            ));
            render_children(children, config, out);
            out.push_str("</a>");
        }
        Token::CodeBlock { lang, value } => {
            let class = lang
                .as_deref()
                .map(|lang| {
                    format!(
                        " class=\"language-{}\"",
                        encode_double_quoted_attribute(lang)
                    )
                })
                .unwrap_or_default();
            out.push_str(&format!(
                "<pre data-element=\"code\"><code{class}>{}</code></pre>\n",
                encode_text(value)
            ));
        }
        Token::List {
            ordered,
            start,
            children,
        } => {
            if *ordered {
                match start {
                    Some(start) if *start != 1 => out.push_str(&format!(
                        "<ol data-md-element=\"list\" start=\"{start}\">\n"
                    )),
                    _ => out.push_str("<ol data-md-element=\"list\">\n"),
                }
                render_children(children, config, out);
                out.push_str("</ol>\n");
            } else {
                out.push_str("<ul data-md-element=\"list\">\n");
                render_children(children, config, out);
                out.push_str("</ul>\n");
            }
        }
        Token::ListItem { checked, children } => {
            out.push_str("<li>");
            if let Some(checked) = checked {
                warn!("task list items are not supported");
                let checked = if *checked { " checked" } else { "" };
                out.push_str(&format!("<input type=\"checkbox\" disabled{checked}> "));
            }
            render_children(children, config, out);
            out.push_str("</li>\n");
        }
        Token::Image { href, children, .. } => {
            let alt = extract_text(children, &ExtractOptions::default()).join("");
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                encode_double_quoted_attribute(href),
                encode_double_quoted_attribute(&alt)
            ));
        }
        Token::Unsupported { kind, .. } => {
            warn!("no renderer for {kind} token");
            out.push_str(&format!(
                "<span data-unsupported style=\"color: firebrick; font-size: 3em\">token {}</span>",
                encode_text(kind)
            ));
        }
    }
}

fn render_heading(level: u8, children: &[Token], config: &RenderConfig, out: &mut String) {
    let level = level.clamp(1, 6);
    let id = format_id(&extract_text(children, &ExtractOptions::default()).join(""));
    out.push_str(&format!(
        "<h{level} data-head-link=\"{level}\"><a href=\"#{}\">",
        encode_double_quoted_attribute(&id)
    ));
    render_children(children, config, out);
    out.push_str(&format!("</a></h{level}>\n"));
}

/// Point links at sibling Markdown files to anchors on this page
pub fn rewrite_md_link(href: &str) -> String {
    for ext in [".md", ".MD"] {
        if href.ends_with(ext) {
            return format!("#{}", href.replacen(ext, "", 1));
        }
    }
    for marker in [".md#", ".MD#"] {
        if href.contains(marker) {
            return href.replacen(marker, "#", 1);
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use changelog_core::token::parse_to_ast;

    fn render(markdown: &str) -> String {
        render_tokens(&parse_to_ast(markdown), &RenderConfig::default())
    }

    #[test]
    fn test_rewrite_md_link() {
        assert_eq!(rewrite_md_link("api.md"), "#api");
        assert_eq!(rewrite_md_link("API.MD"), "#API");
        assert_eq!(rewrite_md_link("api.md#combine"), "api#combine");
        assert_eq!(rewrite_md_link("guide.MD#intro"), "guide#intro");
        assert_eq!(
            rewrite_md_link("https://effector.dev"),
            "https://effector.dev"
        );
    }

    #[test]
    fn test_paragraph_inline() {
        assert_eq!(
            render("Some **bold**, *em* and ~~old~~ `code`\n"),
            "<p data-md-element=\"paragraph\">Some <strong>bold</strong>, <em>em</em> and <del>old</del> <code>code</code></p>\n"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            render("a < b & c\n"),
            "<p data-md-element=\"paragraph\">a &lt; b &amp; c</p>\n"
        );
    }

    #[test]
    fn test_heading_anchor() {
        assert_eq!(
            render("### Breaking changes\n"),
            "<h3 data-head-link=\"3\"><a href=\"#breaking-changes\">Breaking changes</a></h3>\n"
        );
    }

    #[test]
    fn test_link_rewritten() {
        let html = render("[see](docs/api.md)\n");
        assert!(html.contains("<a href=\"#docs/api\">see</a>"));
    }

    #[test]
    fn test_link_kept_when_rewrite_disabled() {
        let config = RenderConfig {
            rewrite_md_links: false,
            ..RenderConfig::default()
        };
        let html = render_tokens(&parse_to_ast("[see](api.md)\n"), &config);
        assert!(html.contains("<a href=\"api.md\">see</a>"));
    }

    #[test]
    fn test_link_title_dropped() {
        let html = render("[see](https://example.com \"Title\")\n");
        assert!(html.contains("<a href=\"https://example.com\">see</a>"));
        assert!(!html.contains("Title"));
    }

    #[test]
    fn test_code_block() {
        assert_eq!(
            render("```ts\nconst a = <T>() => 1\n```\n"),
            "<pre data-element=\"code\"><code class=\"language-ts\">const a = &lt;T&gt;() =&gt; 1\n</code></pre>\n"
        );
    }

    #[test]
    fn test_lists() {
        let html = render("- one\n- two\n");
        assert_eq!(
            html,
            "<ul data-md-element=\"list\">\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );

        let html = render("2. two\n3. three\n");
        assert!(html.starts_with("<ol data-md-element=\"list\" start=\"2\">"));
    }

    #[test]
    fn test_task_item_checkbox() {
        let html = render("- [x] done\n");
        assert!(html.contains("<li><input type=\"checkbox\" disabled checked> done</li>"));
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render("![logo](logo.png)\n"),
            "<p data-md-element=\"paragraph\"><img src=\"logo.png\" alt=\"logo\"></p>\n"
        );
    }

    #[test]
    fn test_unsupported_marker() {
        let html = render("| a |\n|---|\n| 1 |\n");
        assert!(html.contains("token table"));
        assert!(html.contains("data-unsupported"));
    }
}
