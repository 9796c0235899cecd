//! Structural splitting: paragraph/sentence/heading/max_chars, plus the
//! hard-split fallback for any piece that still exceeds `max_chars`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sentence::split_sentences;

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());
static TOP_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#[^#\n]*$").unwrap());

/// A raw piece of text with a human-readable anchor label, before the
/// breathing pass is applied.
pub struct RawPiece {
    pub text: String,
    pub label: String,
}

pub fn split_paragraphs(text: &str) -> Vec<String> {
    BLANK_LINE
        .split(text.trim())
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// `(heading_title, section_body)` pairs. `heading_title` is `None` for
/// any preamble text preceding the first top-level heading.
pub fn split_headings(text: &str) -> Vec<(Option<String>, String)> {
    let matches: Vec<_> = TOP_HEADING.find_iter(text).collect();
    if matches.is_empty() {
        return vec![(None, text.trim().to_string())];
    }

    let mut sections = Vec::new();
    if matches[0].start() > 0 {
        let preamble = text[..matches[0].start()].trim();
        if !preamble.is_empty() {
            sections.push((None, preamble.to_string()));
        }
    }
    for (i, m) in matches.iter().enumerate() {
        let title = m.as_str().trim_start_matches('#').trim().to_string();
        let body_start = m.end();
        let body_end = matches.get(i + 1).map(|next| next.start()).unwrap_or(text.len());
        let body = text[body_start..body_end].trim().to_string();
        sections.push((Some(title), body));
    }
    sections
}

/// Greedily pack `sentences` into groups whose joined length stays at
/// or under `max_chars`, splitting to a new group only between
/// sentences — never mid-sentence.
pub fn pack_sentences(sentences: &[String], max_chars: usize) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        let candidate_len = if current.is_empty() {
            sentence.chars().count()
        } else {
            current.chars().count() + 1 + sentence.chars().count()
        };

        if !current.is_empty() && candidate_len > max_chars {
            groups.push(std::mem::take(&mut current));
        }

        if current.is_empty() {
            current.push_str(sentence);
        } else {
            current.push(' ');
            current.push_str(sentence);
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Greedily pack whitespace-separated words into groups at or under
/// `max_chars`. Never truncates a single word, even if it alone
/// exceeds `max_chars` — the caller's budget is a soft target here.
pub fn hard_split_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut groups = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if !current.is_empty() && candidate_len > max_chars {
            groups.push(std::mem::take(&mut current));
        }

        if current.is_empty() {
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Pack `body` paragraph-by-paragraph, subdividing oversized paragraphs
/// on sentence boundaries and, failing that, on word boundaries. Labels
/// are anchored under `label_prefix` (e.g. `"Paragraph"` or a heading
/// title).
pub fn plan_paragraph_pieces(body: &str, max_chars: usize, label_prefix: &str) -> Vec<RawPiece> {
    let mut out = Vec::new();

    for (pi, paragraph) in split_paragraphs(body).into_iter().enumerate() {
        if paragraph.chars().count() <= max_chars {
            out.push(RawPiece {
                text: paragraph,
                label: format!("{label_prefix} {}", pi + 1),
            });
            continue;
        }

        let sentences = split_sentences(&paragraph);
        let groups = pack_sentences(&sentences, max_chars);
        for (gi, group) in groups.into_iter().enumerate() {
            if group.chars().count() <= max_chars {
                out.push(RawPiece {
                    text: group,
                    label: format!("{label_prefix} {} part {}", pi + 1, gi + 1),
                });
            } else {
                for (wi, piece) in hard_split_words(&group, max_chars).into_iter().enumerate() {
                    out.push(RawPiece {
                        text: piece,
                        label: format!(
                            "{label_prefix} {} part {} (hard split {}, warning: exceeds max_chars)",
                            pi + 1,
                            gi + 1,
                            wi + 1
                        ),
                    });
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let paragraphs = split_paragraphs("first\n\nsecond\n\nthird");
        assert_eq!(paragraphs, vec!["first", "second", "third"]);
    }

    #[test]
    fn splits_top_level_headings_only() {
        let sections = split_headings("# One\nbody one\n\n## Not top\nstill body one\n\n# Two\nbody two");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].0.as_deref(), Some("One"));
        assert!(sections[0].1.contains("Not top"));
        assert_eq!(sections[1].0.as_deref(), Some("Two"));
    }

    #[test]
    fn pack_sentences_respects_budget() {
        let sentences = vec!["One.".to_string(), "Two.".to_string(), "Three is longer.".to_string()];
        let groups = pack_sentences(&sentences, 9);
        assert_eq!(groups, vec!["One. Two.", "Three is longer."]);
    }

    #[test]
    fn hard_split_never_truncates_a_word() {
        let groups = hard_split_words("supercalifragilisticexpialidocious word", 5);
        assert!(groups[0].contains("supercalifragilisticexpialidocious"));
    }
}
