//! Regex-based syntax highlighting for the code panes.
//!
//! Each language has an ordered list of token rules. All rules run over a
//! line; where matches overlap, the one starting first wins, and for equal
//! starts the earlier rule wins.

use mailview_engine::Language;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use regex::Regex;

use crate::theme::Theme;

/// Renders source text as styled lines.
pub trait Highlighter {
    /// Highlight `text` written in `language`, one `Line` per source line.
    fn highlight(&self, language: Language, text: &str) -> Vec<Line<'static>>;
}

/// A regex with the style applied to its matches.
#[derive(Debug, Clone)]
pub struct TokenRule {
    pattern: Regex,
    style: Style,
}

impl TokenRule {
    /// Build a rule, returning `None` for an invalid pattern.
    pub fn try_new(pattern: &str, style: Style) -> Option<Self> {
        Regex::new(pattern).ok().map(|pattern| Self { pattern, style })
    }
}

/// Built-in highlighter covering every [`Language`].
#[derive(Debug, Clone)]
pub struct RegexHighlighter {
    jsx: Vec<TokenRule>,
    markup: Vec<TokenRule>,
    markdown: Vec<TokenRule>,
    default_style: Style,
}

impl Default for RegexHighlighter {
    fn default() -> Self {
        Self::new(&Theme::default())
    }
}

const JSX_RULES: &[(&str, Token)] = &[
    (r"//.*$", Token::Comment),
    (r"\{?/\*.*?\*/\}?", Token::Comment),
    (r#""(?:[^"\\]|\\.)*""#, Token::String),
    (r"'(?:[^'\\]|\\.)*'", Token::String),
    (r"`[^`]*`", Token::String),
    (r"</?[A-Za-z][\w.]*", Token::Tag),
    (r"/?>", Token::Tag),
    (
        r"\b(import|from|export|default|const|let|var|function|return|if|else|new|async|await|type|interface|extends|typeof)\b",
        Token::Keyword,
    ),
    (r"\b(true|false|null|undefined)\b", Token::Number),
    (r"\b[A-Za-z_][\w-]*=", Token::Attribute),
    (r"\b\d+(\.\d+)?\b", Token::Number),
];

const MARKUP_RULES: &[(&str, Token)] = &[
    (r"<!--.*?-->", Token::Comment),
    (r"(?i)<!doctype[^>]*>", Token::Keyword),
    (r#""[^"]*""#, Token::String),
    (r"'[^']*'", Token::String),
    (r"</?[A-Za-z][\w:-]*", Token::Tag),
    (r"/?>", Token::Tag),
    (r"\b[A-Za-z_:][\w:.-]*=", Token::Attribute),
    (r"&[A-Za-z0-9#]+;", Token::Number),
];

const MARKDOWN_RULES: &[(&str, Token)] = &[
    (r"^\s*[-=*_]{3,}\s*$", Token::Comment),
    (r"^#{1,6} .*$", Token::Keyword),
    (r"https?://[^\s)\]>]+", Token::Link),
    (r"\[[^\]]*\]", Token::Attribute),
];

/// Token classes mapped onto theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Comment,
    String,
    Tag,
    Keyword,
    Attribute,
    Number,
    Link,
}

impl Token {
    fn style(self, theme: &Theme) -> Style {
        match self {
            Self::Comment => Style::default()
                .fg(theme.comment)
                .add_modifier(Modifier::ITALIC),
            Self::String => Style::default().fg(theme.string),
            Self::Tag => Style::default().fg(theme.tag),
            Self::Keyword => Style::default()
                .fg(theme.keyword)
                .add_modifier(Modifier::BOLD),
            Self::Attribute => Style::default().fg(theme.attribute),
            Self::Number => Style::default().fg(theme.number),
            Self::Link => Style::default()
                .fg(theme.link)
                .add_modifier(Modifier::UNDERLINED),
        }
    }
}

fn compile(rules: &[(&str, Token)], theme: &Theme) -> Vec<TokenRule> {
    rules
        .iter()
        .filter_map(|(pattern, token)| TokenRule::try_new(pattern, token.style(theme)))
        .collect()
}

impl RegexHighlighter {
    /// Create a highlighter using the theme's syntax colors.
    pub fn new(theme: &Theme) -> Self {
        Self {
            jsx: compile(JSX_RULES, theme),
            markup: compile(MARKUP_RULES, theme),
            markdown: compile(MARKDOWN_RULES, theme),
            default_style: Style::default().fg(theme.text),
        }
    }

    /// Token rules for a language, in priority order.
    pub fn rules(&self, language: Language) -> &[TokenRule] {
        match language {
            Language::Jsx => &self.jsx,
            Language::Markup => &self.markup,
            Language::Markdown => &self.markdown,
        }
    }
}

impl Highlighter for RegexHighlighter {
    fn highlight(&self, language: Language, text: &str) -> Vec<Line<'static>> {
        let rules = self.rules(language);
        // .lines() yields nothing for ""
        if text.is_empty() {
            return vec![Line::default()];
        }
        text.lines()
            .map(|line| highlight_line(line, rules, self.default_style))
            .collect()
    }
}

/// Highlight one line of text.
fn highlight_line(line: &str, rules: &[TokenRule], default_style: Style) -> Line<'static> {
    let line = line.replace('\t', "    ");
    if line.is_empty() {
        return Line::default();
    }

    let mut matches: Vec<(usize, usize, Style)> = rules
        .iter()
        .flat_map(|rule| {
            rule.pattern
                .find_iter(&line)
                .filter(|m| !m.is_empty())
                .map(move |m| (m.start(), m.end(), rule.style))
        })
        .collect();
    // Stable: equal starts keep rule order.
    matches.sort_by_key(|&(start, _, _)| start);

    let mut spans = Vec::new();
    let mut pos = 0;
    for (start, end, style) in matches {
        if start < pos {
            continue;
        }
        if start > pos {
            spans.push(Span::styled(line[pos..start].to_string(), default_style));
        }
        spans.push(Span::styled(line[start..end].to_string(), style));
        pos = end;
    }
    if pos < line.len() {
        spans.push(Span::styled(line[pos..].to_string(), default_style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::mocha()
    }

    fn span_with<'a>(line: &'a Line<'static>, text: &str) -> &'a Span<'static> {
        line.spans
            .iter()
            .find(|s| s.content == text)
            .unwrap_or_else(|| panic!("no span {text:?} in {line:?}"))
    }

    #[test]
    fn test_all_rules_compile() {
        let h = RegexHighlighter::default();
        assert_eq!(h.rules(Language::Jsx).len(), JSX_RULES.len());
        assert_eq!(h.rules(Language::Markup).len(), MARKUP_RULES.len());
        assert_eq!(h.rules(Language::Markdown).len(), MARKDOWN_RULES.len());
    }

    #[test]
    fn test_one_line_per_source_line() {
        let h = RegexHighlighter::default();
        let lines = h.highlight(Language::Markup, "<html>\n<body>\n</body>\n</html>");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_text_is_one_line() {
        let h = RegexHighlighter::default();
        let lines = h.highlight(Language::Jsx, "");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans.is_empty());
    }

    #[test]
    fn test_text_is_preserved() {
        let h = RegexHighlighter::default();
        let source = r#"<a href="https://example.com" target='_blank'>Go &amp; see</a>"#;
        let lines = h.highlight(Language::Markup, source);
        let rebuilt: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_html_tokens() {
        let t = theme();
        let h = RegexHighlighter::new(&t);
        let lines = h.highlight(Language::Markup, r#"<p class="x">Hi</p>"#);
        let line = &lines[0];
        assert_eq!(span_with(line, "<p").style.fg, Some(t.tag));
        assert_eq!(span_with(line, "class=").style.fg, Some(t.attribute));
        assert_eq!(span_with(line, "\"x\"").style.fg, Some(t.string));
        assert_eq!(span_with(line, "Hi").style.fg, Some(t.text));
    }

    #[test]
    fn test_html_comment_wins_over_tags() {
        let t = theme();
        let h = RegexHighlighter::new(&t);
        let lines = h.highlight(Language::Markup, "<!-- <p>hidden</p> -->");
        assert_eq!(lines[0].spans.len(), 1);
        assert_eq!(lines[0].spans[0].style.fg, Some(t.comment));
    }

    #[test]
    fn test_jsx_keywords_and_strings() {
        let t = theme();
        let h = RegexHighlighter::new(&t);
        let lines = h.highlight(Language::Jsx, r#"import { Button } from "@react-email/button";"#);
        let line = &lines[0];
        assert_eq!(span_with(line, "import").style.fg, Some(t.keyword));
        assert_eq!(span_with(line, "from").style.fg, Some(t.keyword));
        assert_eq!(
            span_with(line, "\"@react-email/button\"").style.fg,
            Some(t.string)
        );
    }

    #[test]
    fn test_keyword_inside_string_is_string() {
        let t = theme();
        let h = RegexHighlighter::new(&t);
        let lines = h.highlight(Language::Jsx, r#"const s = "return";"#);
        assert_eq!(span_with(&lines[0], "\"return\"").style.fg, Some(t.string));
    }

    #[test]
    fn test_markdown_links() {
        let t = theme();
        let h = RegexHighlighter::new(&t);
        let lines = h.highlight(Language::Markdown, "Visit https://example.com today");
        assert_eq!(
            span_with(&lines[0], "https://example.com").style.fg,
            Some(t.link)
        );
    }

    #[test]
    fn test_tabs_expand() {
        let h = RegexHighlighter::default();
        let lines = h.highlight(Language::Markdown, "\tindented");
        let rebuilt: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rebuilt, "    indented");
    }
}
