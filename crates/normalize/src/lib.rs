//! Deterministic raw-text → speakable-prose normalizer.
//!
//! `normalize()` is a pure function of `(&str, &CleaningConfig)` — no
//! clock, no RNG, no environment lookups — so the same input always
//! produces byte-identical output, the property the Chunker's
//! regeneration story depends on.

mod abbreviations;
mod code_blocks;
mod html;
mod links;
mod tables;

use episodeer_core::CleaningConfig;

/// Re-exported for the Ingestor, which needs the same readability-style
/// title/body split to name a Source before cleaning settings are known.
pub use html::extract_readable;
pub use html::looks_like_html;

/// Clean `raw_text` into a single UTF-8 prose string per `config`.
/// Never fails: malformed input degrades to best-effort cleanup rather
/// than an error, per spec.
pub fn normalize(raw_text: &str, config: &CleaningConfig) -> String {
    let text = if html::looks_like_html(raw_text) {
        normalize_html(raw_text, config)
    } else {
        normalize_markdown(raw_text, config)
    };

    let text = if config.expand_abbreviations {
        abbreviations::expand(&text)
    } else {
        text
    };

    collapse_blank_runs(&text)
}

/// Mirrors `normalize_markdown`'s pass sequence, but the config-driven
/// passes that only make sense against literal markup (code fences,
/// anchors, HTML comments/SVG) run on the raw HTML before parsing —
/// `extract_readable`'s flattened text has nothing left for them to
/// match. `handle_tables` and the parenthesis strip run after, same as
/// the markdown path, since those operate on prose either way.
fn normalize_html(raw_html: &str, config: &CleaningConfig) -> String {
    let raw = if config.remove_non_text {
        links::remove_non_text(raw_html)
    } else {
        raw_html.to_string()
    };
    let raw = code_blocks::apply_html(&raw, config.code_block_rule);
    let raw = links::rewrite_html_links(&raw, config.speak_urls);

    let (title, body) = html::extract_readable(&raw);
    let combined = match title {
        Some(title) => format!("{title}\n\n{body}"),
        None => body,
    };

    let combined = if !config.preserve_parentheses {
        links::strip_parentheses(&combined)
    } else {
        combined
    };

    if config.handle_tables {
        tables::handle_tables(&combined)
    } else {
        combined
    }
}

fn normalize_markdown(raw_text: &str, config: &CleaningConfig) -> String {
    let text = code_blocks::apply(raw_text, config.code_block_rule);
    let text = if config.remove_non_text {
        links::remove_non_text(&text)
    } else {
        text
    };
    // Strip genuine prose parentheticals *before* handle_links inserts a
    // synthetic "(url)" for speak_urls — otherwise that trailing
    // parenthetical gets deleted right back out by the same pass.
    let text = if !config.preserve_parentheses {
        links::strip_parentheses(&text)
    } else {
        text
    };
    let text = links::handle_links(&text, config.speak_urls);
    if config.handle_tables {
        tables::handle_tables(&text)
    } else {
        text
    }
}

/// Collapse 3+ consecutive blank lines to exactly one, and trim
/// trailing whitespace from each line — keeps heading lines intact
/// (spec requires they survive for the Chunker to anchor on) while
/// tidying the whitespace code/table/link passes leave behind.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_streak = 0;
    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            blank_streak += 1;
            if blank_streak > 1 {
                continue;
            }
        } else {
            blank_streak = 0;
        }
        out.push_str(trimmed);
        out.push('\n');
    }
    out.trim_end_matches('\n').to_string() + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use episodeer_core::CodeBlockRule;

    fn cfg(overrides: impl FnOnce(&mut CleaningConfig)) -> CleaningConfig {
        let mut c = CleaningConfig::default();
        overrides(&mut c);
        c
    }

    #[test]
    fn deterministic_across_runs() {
        let config = CleaningConfig::default();
        let input = "# Title\n\nSome *text* with a [link](http://x.io) and ```code```.\n";
        assert_eq!(normalize(input, &config), normalize(input, &config));
    }

    #[test]
    fn skips_code_block_when_configured() {
        let config = cfg(|c| c.code_block_rule = CodeBlockRule::Skip);
        let input = "before\n```\nfn x() {}\n```\nafter\n";
        let out = normalize(input, &config);
        assert!(!out.contains("fn x"));
        assert!(out.contains("before"));
        assert!(out.contains("after"));
    }

    #[test]
    fn preserves_heading_lines() {
        let config = CleaningConfig::default();
        let out = normalize("# Chapter One\n\nBody text here.\n", &config);
        assert!(out.lines().next().unwrap().starts_with("# Chapter One"));
    }

    #[test]
    fn html_input_extracts_title_and_body() {
        let config = CleaningConfig::default();
        let html = "<html><head><title>A Post</title></head><body><article><p>Hello there.</p></article></body></html>";
        let out = normalize(html, &config);
        assert!(out.contains("A Post"));
        assert!(out.contains("Hello there."));
    }

    #[test]
    fn expands_abbreviations_when_enabled() {
        let config = cfg(|c| c.expand_abbreviations = true);
        let out = normalize("Deploy with k8s.\n", &config);
        assert!(out.contains("kubernetes"));
    }

    #[test]
    fn leaves_abbreviations_when_disabled() {
        let config = cfg(|c| c.expand_abbreviations = false);
        let out = normalize("Deploy with k8s.\n", &config);
        assert!(out.contains("k8s"));
    }

    #[test]
    fn spoken_url_survives_parenthesis_stripping() {
        let config = cfg(|c| {
            c.speak_urls = true;
            c.preserve_parentheses = false;
        });
        let out = normalize("see [docs](https://x.io) for more.\n", &config);
        assert!(out.contains("https://x.io"), "got: {out}");
    }

    #[test]
    fn html_path_honors_code_block_rule() {
        let config = cfg(|c| c.code_block_rule = CodeBlockRule::Skip);
        let html = "<html><body><article><p>before</p><pre><code>fn x() {}</code></pre><p>after</p></article></body></html>";
        let out = normalize(html, &config);
        assert!(!out.contains("fn x"));
        assert!(out.contains("before"));
        assert!(out.contains("after"));
    }

    #[test]
    fn html_path_honors_speak_urls() {
        let config = cfg(|c| c.speak_urls = true);
        let html = r#"<html><body><article><p>see <a href="https://x.io">docs</a> today</p></article></body></html>"#;
        let out = normalize(html, &config);
        assert!(out.contains("https://x.io"), "got: {out}");
    }
}
