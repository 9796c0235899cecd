//! Cleaned text → ordered, breath-paced chunk plans.
//!
//! `plan()` is a pure function of `(text, strategy, max_chars,
//! breathing_intensity)` — identical inputs always yield an identical
//! chunk sequence (byte-identical text and labels), the correctness
//! anchor the Library Service's selective chunk regeneration depends on.

mod breathing;
mod sentence;
mod strategies;

use episodeer_core::{BreathingIntensity, ChunkStrategy};

use strategies::RawPiece;

/// One planned chunk, before it is given an episode id, status, or
/// timestamp and persisted by the Store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChunk {
    pub index: i64,
    pub text: String,
    pub label: String,
}

/// Build the chunk plan for `text`. Empty or whitespace-only input
/// produces an empty plan — the caller (Library Service) turns that
/// into `Error::EmptyContent` rather than creating a zero-chunk episode.
pub fn plan(
    text: &str,
    strategy: ChunkStrategy,
    max_chars: i64,
    breathing_intensity: BreathingIntensity,
) -> Vec<PlannedChunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let max_chars = max_chars.max(1) as usize;

    let raw_pieces = match strategy {
        ChunkStrategy::Paragraph => strategies::plan_paragraph_pieces(text, max_chars, "Paragraph"),
        ChunkStrategy::Sentence => plan_sentence_strategy(text, max_chars),
        ChunkStrategy::Heading => plan_heading_strategy(text, max_chars),
        ChunkStrategy::MaxChars => plan_max_chars_strategy(text, max_chars),
    };

    raw_pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| PlannedChunk {
            index: i as i64,
            text: breathing::apply(&piece.text, breathing_intensity),
            label: piece.label,
        })
        .collect()
}

fn plan_sentence_strategy(text: &str, max_chars: usize) -> Vec<RawPiece> {
    let sentences = sentence::split_sentences(text);
    let groups = strategies::pack_sentences(&sentences, max_chars);

    let mut out = Vec::new();
    for (gi, group) in groups.into_iter().enumerate() {
        if group.chars().count() <= max_chars {
            out.push(RawPiece {
                text: group,
                label: format!("Sentence group {}", gi + 1),
            });
        } else {
            for (wi, piece) in strategies::hard_split_words(&group, max_chars).into_iter().enumerate() {
                out.push(RawPiece {
                    text: piece,
                    label: format!("Sentence group {} (hard split {}, warning: exceeds max_chars)", gi + 1, wi + 1),
                });
            }
        }
    }
    out
}

fn plan_heading_strategy(text: &str, max_chars: usize) -> Vec<RawPiece> {
    let sections = strategies::split_headings(text);
    let mut out = Vec::new();
    for (heading, body) in sections {
        if body.trim().is_empty() {
            continue;
        }
        let label_prefix = heading.unwrap_or_else(|| "Introduction".to_string());
        out.extend(strategies::plan_paragraph_pieces(&body, max_chars, &label_prefix));
    }
    out
}

fn plan_max_chars_strategy(text: &str, max_chars: usize) -> Vec<RawPiece> {
    strategies::hard_split_words(text, max_chars)
        .into_iter()
        .enumerate()
        .map(|(i, piece)| RawPiece {
            text: piece,
            label: format!("Block {}", i + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(plan("   \n\n  ", ChunkStrategy::Paragraph, 1000, BreathingIntensity::Normal).is_empty());
    }

    #[test]
    fn deterministic_across_calls() {
        let text = "# Intro\n\nFirst paragraph sentence one. Sentence two.\n\nSecond paragraph here.";
        let a = plan(text, ChunkStrategy::Heading, 80, BreathingIntensity::Normal);
        let b = plan(text, ChunkStrategy::Heading, 80, BreathingIntensity::Normal);
        assert_eq!(a, b);
    }

    #[test]
    fn paragraph_strategy_one_chunk_per_paragraph_when_small() {
        let text = "First paragraph.\n\nSecond paragraph.";
        let chunks = plan(text, ChunkStrategy::Paragraph, 1000, BreathingIntensity::None);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn oversized_paragraph_subdivides_on_sentences() {
        let text = "One sentence here. Another sentence follows. A third one trails off.";
        let chunks = plan(text, ChunkStrategy::Paragraph, 30, BreathingIntensity::None);
        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.text.chars().count() <= 60); // generous slack for breathing markers
        }
    }

    #[test]
    fn single_overlong_sentence_hard_splits_with_warning_label() {
        let long_word_sentence = "supercalifragilisticexpialidocious ".repeat(10) + ".";
        let chunks = plan(&long_word_sentence, ChunkStrategy::Sentence, 20, BreathingIntensity::None);
        assert!(chunks.iter().any(|c| c.label.contains("warning")));
        // never truncated: every original word should survive somewhere
        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join(" ");
        assert!(joined.contains("supercalifragilisticexpialidocious"));
    }

    #[test]
    fn heading_strategy_labels_use_heading_title() {
        let text = "# Chapter One\n\nSome body text.";
        let chunks = plan(text, ChunkStrategy::Heading, 1000, BreathingIntensity::None);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].label.starts_with("Chapter One"));
    }

    #[test]
    fn max_chars_strategy_ignores_structure() {
        let text = "# Heading\n\nParagraph text that keeps going on and on.";
        let chunks = plan(text, ChunkStrategy::MaxChars, 15, BreathingIntensity::None);
        assert!(chunks.len() > 1);
        assert!(chunks[0].label.starts_with("Block"));
    }
}
