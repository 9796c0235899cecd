//! Link, image, and non-text markup handling

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());
static HTML_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static SVG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<svg.*?</svg>").unwrap());
static BADGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(\[!\[[^\n]*\]\([^)]*\)\]\([^)]*\)\s*)+$").unwrap());

/// Drop images, HTML comments, SVG blocks, and shields.io-style badge
/// lines (a line consisting only of linked images).
pub fn remove_non_text(text: &str) -> String {
    let text = HTML_COMMENT.replace_all(text, "");
    let text = SVG.replace_all(&text, "");
    let text = BADGE_LINE.replace_all(&text, "");
    IMAGE.replace_all(&text, "").into_owned()
}

/// Collapse markdown links to their anchor text, optionally speaking
/// the URL alongside it.
pub fn handle_links(text: &str, speak_urls: bool) -> String {
    LINK.replace_all(text, |caps: &regex::Captures| {
        let anchor = &caps[1];
        let url = &caps[2];
        if speak_urls {
            format!("{anchor} ({url})")
        } else {
            anchor.to_string()
        }
    })
    .into_owned()
}

static HTML_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*"([^"]*)"[^>]*>(.*?)</a>"#).unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());

/// Rewrite `<a href="...">anchor</a>` to plain anchor text before HTML
/// parsing, same `speak_urls` semantics as `handle_links`'s markdown path.
/// Anchors are matched non-greedily and any nested markup inside one is
/// stripped rather than preserved.
pub fn rewrite_html_links(raw_html: &str, speak_urls: bool) -> String {
    HTML_ANCHOR
        .replace_all(raw_html, |caps: &regex::Captures| {
            let href = &caps[1];
            let anchor = HTML_TAG.replace_all(&caps[2], "").trim().to_string();
            if speak_urls && !href.is_empty() {
                format!("{anchor} ({href})")
            } else {
                anchor
            }
        })
        .into_owned()
}

static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s?\([^()]*\)").unwrap());

/// Strip parenthetical asides entirely (`preserve_parentheses = false`).
pub fn strip_parentheses(text: &str) -> String {
    PARENTHETICAL.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_images() {
        assert_eq!(remove_non_text("before ![alt](x.png) after"), "before  after");
    }

    #[test]
    fn drops_html_comments() {
        assert_eq!(remove_non_text("a <!-- note --> b"), "a  b");
    }

    #[test]
    fn collapses_link_to_anchor() {
        assert_eq!(handle_links("see [docs](https://x.io)", false), "see docs");
    }

    #[test]
    fn speaks_url_when_requested() {
        assert_eq!(
            handle_links("see [docs](https://x.io)", true),
            "see docs (https://x.io)"
        );
    }

    #[test]
    fn strips_parenthetical_aside() {
        assert_eq!(strip_parentheses("a sentence (an aside) continues"), "a sentence continues");
    }

    #[test]
    fn html_collapses_anchor_to_text() {
        assert_eq!(
            rewrite_html_links(r#"see <a href="https://x.io">docs</a> today"#, false),
            "see docs today"
        );
    }

    #[test]
    fn html_speaks_url_when_requested() {
        assert_eq!(
            rewrite_html_links(r#"see <a href="https://x.io">docs</a> today"#, true),
            "see docs (https://x.io) today"
        );
    }
}
