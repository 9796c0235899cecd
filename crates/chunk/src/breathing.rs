//! Natural breath insertion — the inter-sentence pause pass
//!
//! Resolves the breathing-intensity Open Question the way SPEC_FULL.md
//! §4.3 pins it down: a deterministic, pure-text function of the
//! sentence boundary and `breathing_intensity`. No engine control codes.

use episodeer_core::BreathingIntensity;

use crate::sentence::split_sentences;

/// Re-join a chunk's sentences using the breathing separator for
/// `intensity`. Idempotent on single-sentence chunks.
pub fn apply(chunk_text: &str, intensity: BreathingIntensity) -> String {
    let sentences = split_sentences(chunk_text);
    if sentences.len() <= 1 {
        return chunk_text.trim().to_string();
    }

    let mut out = String::with_capacity(chunk_text.len() + sentences.len() * 2);
    for (i, sentence) in sentences.iter().enumerate() {
        out.push_str(sentence);
        if i + 1 < sentences.len() {
            out.push_str(&separator(sentence, intensity));
        }
    }
    out
}

fn separator(preceding_sentence: &str, intensity: BreathingIntensity) -> String {
    match intensity {
        BreathingIntensity::None => " ".to_string(),
        BreathingIntensity::Light => "  ".to_string(),
        BreathingIntensity::Normal => {
            let already_paused = preceding_sentence
                .chars()
                .last()
                .map(|c| matches!(c, '.' | '!' | '?' | ','))
                .unwrap_or(false);
            if already_paused {
                "  ".to_string()
            } else {
                ", ".to_string()
            }
        }
        BreathingIntensity::Heavy => "... ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_uses_single_space() {
        assert_eq!(apply("One. Two.", BreathingIntensity::None), "One. Two.");
    }

    #[test]
    fn light_uses_double_space() {
        assert_eq!(apply("One. Two.", BreathingIntensity::Light), "One.  Two.");
    }

    #[test]
    fn heavy_uses_ellipsis() {
        assert_eq!(apply("One. Two.", BreathingIntensity::Heavy), "One.... Two.");
    }

    #[test]
    fn single_sentence_is_untouched() {
        assert_eq!(apply("Only one.", BreathingIntensity::Heavy), "Only one.");
    }

    #[test]
    fn deterministic() {
        let a = apply("One. Two. Three.", BreathingIntensity::Normal);
        let b = apply("One. Two. Three.", BreathingIntensity::Normal);
        assert_eq!(a, b);
    }
}
