//! Markdown token tree
//!
//! The pulldown-cmark event stream is folded into an owned tree of [`Token`]s:
//! a flat top-level sequence where nested elements own their children. Release
//! segmentation only looks at the top level; everything below is carried
//! through untouched for the presentation layer.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use serde::Serialize;

/// A node in the parsed Markdown document
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    Heading { level: u8, children: Vec<Token> },
    Paragraph { children: Vec<Token> },
    Text { value: String },
    Strong { children: Vec<Token> },
    Emphasis { children: Vec<Token> },
    Strikethrough { children: Vec<Token> },
    BlockQuote { children: Vec<Token> },
    CodeSpan { value: String },
    CodeBlock { lang: Option<String>, value: String },
    Html { value: String },
    List {
        ordered: bool,
        start: Option<u64>,
        children: Vec<Token>,
    },
    /// `checked` is set for task-list items
    ListItem {
        checked: Option<bool>,
        children: Vec<Token>,
    },
    Link {
        href: String,
        title: Option<String>,
        children: Vec<Token>,
    },
    Image {
        href: String,
        title: Option<String>,
        children: Vec<Token>,
    },
    SoftBreak,
    HardBreak,
    Rule,
    /// Constructs without a dedicated variant (tables, footnotes, math, ...)
    Unsupported { kind: String, children: Vec<Token> },
}

/// Discriminant of a [`Token`], used to skip kinds during text extraction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Heading,
    Paragraph,
    Text,
    Strong,
    Emphasis,
    Strikethrough,
    BlockQuote,
    CodeSpan,
    CodeBlock,
    Html,
    List,
    ListItem,
    Link,
    Image,
    SoftBreak,
    HardBreak,
    Rule,
    Unsupported,
}

impl Token {
    /// Get the kind of this token
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Heading { .. } => TokenKind::Heading,
            Token::Paragraph { .. } => TokenKind::Paragraph,
            Token::Text { .. } => TokenKind::Text,
            Token::Strong { .. } => TokenKind::Strong,
            Token::Emphasis { .. } => TokenKind::Emphasis,
            Token::Strikethrough { .. } => TokenKind::Strikethrough,
            Token::BlockQuote { .. } => TokenKind::BlockQuote,
            Token::CodeSpan { .. } => TokenKind::CodeSpan,
            Token::CodeBlock { .. } => TokenKind::CodeBlock,
            Token::Html { .. } => TokenKind::Html,
            Token::List { .. } => TokenKind::List,
            Token::ListItem { .. } => TokenKind::ListItem,
            Token::Link { .. } => TokenKind::Link,
            Token::Image { .. } => TokenKind::Image,
            Token::SoftBreak => TokenKind::SoftBreak,
            Token::HardBreak => TokenKind::HardBreak,
            Token::Rule => TokenKind::Rule,
            Token::Unsupported { .. } => TokenKind::Unsupported,
        }
    }

    /// Heading level, if this token is a heading
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Token::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Child tokens (empty for leaves)
    pub fn children(&self) -> &[Token] {
        match self {
            Token::Heading { children, .. }
            | Token::Paragraph { children }
            | Token::Strong { children }
            | Token::Emphasis { children }
            | Token::Strikethrough { children }
            | Token::BlockQuote { children }
            | Token::List { children, .. }
            | Token::ListItem { children, .. }
            | Token::Link { children, .. }
            | Token::Image { children, .. }
            | Token::Unsupported { children, .. } => children,
            Token::Text { .. }
            | Token::CodeSpan { .. }
            | Token::CodeBlock { .. }
            | Token::Html { .. }
            | Token::SoftBreak
            | Token::HardBreak
            | Token::Rule => &[],
        }
    }
}

/// A container that is still collecting children
enum Pending {
    Heading(u8),
    Paragraph,
    Strong,
    Emphasis,
    Strikethrough,
    BlockQuote,
    CodeBlock(Option<String>),
    HtmlBlock,
    List(Option<u64>),
    ListItem(Option<bool>),
    Link { href: String, title: Option<String> },
    Image { href: String, title: Option<String> },
    Unsupported(&'static str),
}

impl Pending {
    fn from_tag(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Heading { level, .. } => Pending::Heading(level as u8),
            Tag::Paragraph => Pending::Paragraph,
            Tag::Strong => Pending::Strong,
            Tag::Emphasis => Pending::Emphasis,
            Tag::Strikethrough => Pending::Strikethrough,
            Tag::BlockQuote(_) => Pending::BlockQuote,
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                };
                Pending::CodeBlock(lang)
            }
            Tag::HtmlBlock => Pending::HtmlBlock,
            Tag::List(start) => Pending::List(start),
            Tag::Item => Pending::ListItem(None),
            Tag::Link {
                dest_url, title, ..
            } => Pending::Link {
                href: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::Image {
                dest_url, title, ..
            } => Pending::Image {
                href: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::Table(_) => Pending::Unsupported("table"),
            Tag::TableHead => Pending::Unsupported("table_head"),
            Tag::TableRow => Pending::Unsupported("table_row"),
            Tag::TableCell => Pending::Unsupported("table_cell"),
            Tag::FootnoteDefinition(_) => Pending::Unsupported("footnote_definition"),
            _ => Pending::Unsupported("block"),
        }
    }

    fn close(self, children: Vec<Token>) -> Token {
        match self {
            Pending::Heading(level) => Token::Heading { level, children },
            Pending::Paragraph => Token::Paragraph { children },
            Pending::Strong => Token::Strong { children },
            Pending::Emphasis => Token::Emphasis { children },
            Pending::Strikethrough => Token::Strikethrough { children },
            Pending::BlockQuote => Token::BlockQuote { children },
            Pending::CodeBlock(lang) => Token::CodeBlock {
                lang,
                value: concat_values(&children),
            },
            Pending::HtmlBlock => Token::Html {
                value: concat_values(&children),
            },
            Pending::List(start) => Token::List {
                ordered: start.is_some(),
                start,
                children,
            },
            Pending::ListItem(checked) => Token::ListItem { checked, children },
            Pending::Link { href, title } => Token::Link {
                href,
                title,
                children,
            },
            Pending::Image { href, title } => Token::Image {
                href,
                title,
                children,
            },
            Pending::Unsupported(kind) => Token::Unsupported {
                kind: kind.to_string(),
                children,
            },
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Raw text carried by leaf children of code and html blocks
fn concat_values(children: &[Token]) -> String {
    children
        .iter()
        .map(|child| match child {
            Token::Text { value } | Token::Html { value } | Token::CodeSpan { value } => {
                value.as_str()
            }
            _ => "",
        })
        .collect()
}

/// Parse markdown text into a top-level token sequence
pub fn parse_to_ast(text: &str) -> Vec<Token> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut root: Vec<Token> = Vec::new();
    let mut stack: Vec<(Pending, Vec<Token>)> = Vec::new();

    for event in Parser::new_ext(text, options) {
        let leaf = match event {
            Event::Start(tag) => {
                stack.push((Pending::from_tag(tag), Vec::new()));
                continue;
            }
            Event::End(_) => match stack.pop() {
                Some((pending, children)) => pending.close(children),
                None => continue,
            },
            Event::Text(text) => Token::Text {
                value: text.to_string(),
            },
            Event::Code(code) => Token::CodeSpan {
                value: code.to_string(),
            },
            Event::Html(html) | Event::InlineHtml(html) => Token::Html {
                value: html.to_string(),
            },
            Event::InlineMath(math) | Event::DisplayMath(math) => Token::Unsupported {
                kind: "math".to_string(),
                children: vec![Token::Text {
                    value: math.to_string(),
                }],
            },
            Event::FootnoteReference(label) => Token::Unsupported {
                kind: "footnote_reference".to_string(),
                children: vec![Token::Text {
                    value: label.to_string(),
                }],
            },
            Event::SoftBreak => Token::SoftBreak,
            Event::HardBreak => Token::HardBreak,
            Event::Rule => Token::Rule,
            Event::TaskListMarker(checked) => {
                // Marker may sit inside the item's paragraph for loose lists
                if let Some((pending, _)) = stack
                    .iter_mut()
                    .rev()
                    .find(|(pending, _)| matches!(pending, Pending::ListItem(_)))
                {
                    *pending = Pending::ListItem(Some(checked));
                }
                continue;
            }
        };

        match stack.last_mut() {
            Some((_, children)) => children.push(leaf),
            None => root.push(leaf),
        }
    }

    // Unbalanced input is not expected from pulldown-cmark, but never drop content
    while let Some((pending, children)) = stack.pop() {
        let token = pending.close(children);
        match stack.last_mut() {
            Some((_, parent)) => parent.push(token),
            None => root.push(token),
        }
    }

    root
}

/// Options for [`extract_text`]
#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    /// Token kinds whose text is omitted entirely
    pub skip: Vec<TokenKind>,
    /// Emit `\n` at line and block boundaries instead of spaces
    pub keep_line_breaks: bool,
}

impl ExtractOptions {
    /// Body text: code blocks skipped, line breaks kept
    pub fn prose() -> Self {
        Self {
            skip: vec![TokenKind::CodeBlock],
            keep_line_breaks: true,
        }
    }
}

/// Flatten tokens into their visible text pieces
///
/// Joining the result reproduces the text a reader would see. Images
/// contribute their alt text.
pub fn extract_text(tokens: &[Token], options: &ExtractOptions) -> Vec<String> {
    let mut pieces = Vec::new();
    for token in tokens {
        collect_text(token, options, &mut pieces);
    }
    pieces
}

fn collect_text(token: &Token, options: &ExtractOptions, pieces: &mut Vec<String>) {
    if options.skip.contains(&token.kind()) {
        return;
    }

    let line_break = if options.keep_line_breaks { "\n" } else { " " };

    match token {
        Token::Text { value } | Token::CodeSpan { value } | Token::Html { value } => {
            pieces.push(value.clone());
        }
        Token::CodeBlock { value, .. } => {
            pieces.push(value.clone());
        }
        Token::SoftBreak | Token::HardBreak => {
            pieces.push(line_break.to_string());
        }
        Token::Rule => {}
        Token::Heading { children, .. }
        | Token::Paragraph { children }
        | Token::ListItem { children, .. } => {
            for child in children {
                collect_text(child, options, pieces);
            }
            if options.keep_line_breaks {
                pieces.push("\n".to_string());
            }
        }
        Token::Strong { children }
        | Token::Emphasis { children }
        | Token::Strikethrough { children }
        | Token::BlockQuote { children }
        | Token::List { children, .. }
        | Token::Link { children, .. }
        | Token::Image { children, .. }
        | Token::Unsupported { children, .. } => {
            for child in children {
                collect_text(child, options, pieces);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Token {
        Token::Text {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_to_ast("").is_empty());
    }

    #[test]
    fn test_parse_headings_keep_level() {
        let tokens = parse_to_ast("# Title\n\n## effector 21.8.0\n\n### Details\n");
        let levels: Vec<_> = tokens.iter().filter_map(Token::heading_level).collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_heading_children() {
        let tokens = parse_to_ast("## effector **21.8.0**\n");
        assert_eq!(
            tokens,
            vec![Token::Heading {
                level: 2,
                children: vec![
                    text("effector "),
                    Token::Strong {
                        children: vec![text("21.8.0")],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_parse_top_level_is_flat() {
        let tokens = parse_to_ast("## 1.0.0\n\n- one\n- two\n\nDone.\n");
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Heading, TokenKind::List, TokenKind::Paragraph]
        );
        assert_eq!(tokens[1].children().len(), 2);
    }

    #[test]
    fn test_parse_code_block() {
        let tokens = parse_to_ast("```js\nconst a = 1\n```\n");
        assert_eq!(
            tokens,
            vec![Token::CodeBlock {
                lang: Some("js".to_string()),
                value: "const a = 1\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_link_with_title() {
        let tokens = parse_to_ast("[docs](api.md \"API\")\n");
        match &tokens[0].children()[0] {
            Token::Link { href, title, .. } => {
                assert_eq!(href, "api.md");
                assert_eq!(title.as_deref(), Some("API"));
            }
            other => panic!("expected link, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_task_list_item() {
        let tokens = parse_to_ast("- [x] done\n- [ ] open\n- plain\n");
        let checked: Vec<_> = tokens[0]
            .children()
            .iter()
            .map(|item| match item {
                Token::ListItem { checked, .. } => *checked,
                _ => panic!("expected list item"),
            })
            .collect();
        assert_eq!(checked, vec![Some(true), Some(false), None]);
    }

    #[test]
    fn test_parse_ordered_list() {
        let tokens = parse_to_ast("3. three\n4. four\n");
        match &tokens[0] {
            Token::List { ordered, start, .. } => {
                assert!(*ordered);
                assert_eq!(*start, Some(3));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_table_is_unsupported() {
        let tokens = parse_to_ast("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert_eq!(tokens[0].kind(), TokenKind::Unsupported);
    }

    #[test]
    fn test_extract_heading_text() {
        let tokens = parse_to_ast("## effector `21.8.0` [notes](x.md)\n");
        let title = extract_text(&tokens, &ExtractOptions::default()).join("");
        assert_eq!(title, "effector 21.8.0 notes");
    }

    #[test]
    fn test_extract_skips_code_blocks() {
        let tokens = parse_to_ast("First\n\n```\nhidden\n```\n\nSecond\n");
        let body = extract_text(&tokens, &ExtractOptions::prose()).join("");
        assert_eq!(body, "First\nSecond\n");
    }

    #[test]
    fn test_extract_line_breaks() {
        let tokens = parse_to_ast("one\ntwo\n\n- three\n- four\n");

        let kept = extract_text(&tokens, &ExtractOptions::prose()).join("");
        assert_eq!(kept, "one\ntwo\nthree\nfour\n");

        let flat = extract_text(&tokens, &ExtractOptions::default()).join("");
        assert_eq!(flat, "one twothreefour");
    }
}
