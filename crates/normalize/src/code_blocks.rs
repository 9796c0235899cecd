//! Fenced and indented code block handling (`code_block_rule`)

use episodeer_core::CodeBlockRule;
use once_cell::sync::Lazy;
use regex::Regex;

static FENCED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?ms)^(```|~~~)[^\n]*\n.*?\n\1[ \t]*$").unwrap());

/// Apply `rule` to every fenced code block (` ``` ` or `~~~`) in `text`.
/// Indented (4-space) blocks are left to the paragraph splitter — by the
/// time code reaches here most indentation has already been normalized
/// out of prose, and fenced blocks are the common case in practice.
pub fn apply(text: &str, rule: CodeBlockRule) -> String {
    FENCED
        .replace_all(text, |caps: &regex::Captures| match rule {
            CodeBlockRule::Skip => String::new(),
            CodeBlockRule::Inline => strip_fence(&caps[0]),
            CodeBlockRule::Describe => "code block omitted.".to_string(),
        })
        .into_owned()
}

static HTML_PRE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<pre\b[^>]*>.*?</pre>").unwrap());

/// Same rule, applied to raw `<pre>...</pre>` markup before HTML parsing —
/// by the time `extract_readable` flattens to text there are no fence
/// markers left for `apply` to match against.
pub fn apply_html(raw_html: &str, rule: CodeBlockRule) -> String {
    match rule {
        CodeBlockRule::Inline => raw_html.to_string(),
        CodeBlockRule::Skip => HTML_PRE.replace_all(raw_html, "").into_owned(),
        CodeBlockRule::Describe => HTML_PRE
            .replace_all(raw_html, "<p>code block omitted.</p>")
            .into_owned(),
    }
}

fn strip_fence(block: &str) -> String {
    let mut lines = block.lines();
    lines.next();
    let body: Vec<&str> = lines.collect();
    let body = if body.last().map(|l| l.trim().is_empty() || l.starts_with("```") || l.starts_with("~~~")).unwrap_or(false) {
        &body[..body.len().saturating_sub(1)]
    } else {
        &body[..]
    };
    body.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "intro\n```rust\nfn main() {}\n```\noutro";

    #[test]
    fn skip_removes_block() {
        let out = apply(SAMPLE, CodeBlockRule::Skip);
        assert!(!out.contains("fn main"));
        assert!(out.contains("intro"));
        assert!(out.contains("outro"));
    }

    #[test]
    fn inline_keeps_code_text() {
        let out = apply(SAMPLE, CodeBlockRule::Inline);
        assert!(out.contains("fn main() {}"));
    }

    #[test]
    fn describe_replaces_with_phrase() {
        let out = apply(SAMPLE, CodeBlockRule::Describe);
        assert!(out.contains("code block omitted"));
        assert!(!out.contains("fn main"));
    }

    const HTML_SAMPLE: &str = "<p>intro</p><pre><code>fn main() {}</code></pre><p>outro</p>";

    #[test]
    fn html_skip_removes_pre_block() {
        let out = apply_html(HTML_SAMPLE, CodeBlockRule::Skip);
        assert!(!out.contains("fn main"));
        assert!(out.contains("intro"));
        assert!(out.contains("outro"));
    }

    #[test]
    fn html_describe_replaces_pre_block() {
        let out = apply_html(HTML_SAMPLE, CodeBlockRule::Describe);
        assert!(out.contains("code block omitted"));
        assert!(!out.contains("fn main"));
    }

    #[test]
    fn html_inline_keeps_pre_block_untouched() {
        let out = apply_html(HTML_SAMPLE, CodeBlockRule::Inline);
        assert_eq!(out, HTML_SAMPLE);
    }
}
