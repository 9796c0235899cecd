//! Heuristic HTML detection and readability-style extraction
//!
//! Not a full Readability.js port — a deliberately small heuristic that
//! covers the common case (a page with one dominant `<article>`/`<main>`
//! container, or failing that the `<body>`) well enough for TTS prose.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static TAG_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").unwrap());

/// `true` when `text` looks like HTML rather than Markdown/plain text —
/// tag density dominates over markdown's line-oriented markers.
pub fn looks_like_html(text: &str) -> bool {
    let tag_hits = TAG_MARKER.find_iter(text).count();
    let markdown_hits = text
        .lines()
        .filter(|l| {
            let t = l.trim_start();
            t.starts_with('#') || t.starts_with("```") || t.starts_with("- ") || t.starts_with("* ")
        })
        .count();
    tag_hits > 3 && tag_hits > markdown_hits
}

/// Extract a `(title, body)` pair: the `<title>` text, and the text
/// content of the best-guess main content container.
pub fn extract_readable(html: &str) -> (Option<String>, String) {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let candidates = ["article", "main", "[role=main]", "#content", "body"];
    let mut body = String::new();
    for selector in candidates {
        if let Ok(sel) = Selector::parse(selector) {
            if let Some(el) = document.select(&sel).next() {
                body = el
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
                if !body.is_empty() {
                    break;
                }
            }
        }
    }

    (title, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_html_by_tag_density() {
        let html = "<html><body><p>hello</p><p>world</p></body></html>";
        assert!(looks_like_html(html));
    }

    #[test]
    fn markdown_is_not_html() {
        let md = "# Title\n\nSome *text* and a [link](http://x).";
        assert!(!looks_like_html(md));
    }

    #[test]
    fn extracts_title_and_article_body() {
        let html = "<html><head><title>My Page</title></head><body><article><p>Hello world.</p></article></body></html>";
        let (title, body) = extract_readable(html);
        assert_eq!(title.as_deref(), Some("My Page"));
        assert!(body.contains("Hello world."));
    }
}
