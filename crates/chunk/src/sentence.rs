//! Sentence boundary detection
//!
//! Adapted from the teacher's streaming sentence detector: scan
//! char-by-char, treat `.`/`!`/`?` as a boundary candidate, then look
//! ahead for trailing quotes/brackets to fold into the same sentence.
//! Unlike the streaming version this runs over a complete buffer, so it
//! can also look *behind* the terminator to reject abbreviations and
//! decimal numbers.

static ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "fig", "no",
    "vol", "approx", "dept", "inc", "ltd", "co",
];

/// Split `text` into sentences, respecting abbreviations and decimal
/// points. Trailing whitespace on each sentence is trimmed; sentences
/// are returned in order with nothing dropped between them.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        current.push(c);

        if matches!(c, '.' | '!' | '?') && !is_suppressed(&chars, i) {
            let mut end = i + 1;
            while end < chars.len() {
                let next = chars[end];
                if matches!(next, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}') {
                    current.push(next);
                    end += 1;
                } else {
                    break;
                }
            }
            i = end;
            let sentence = current.trim().to_string();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            current.clear();
        } else {
            i += 1;
        }
    }

    let tail = current.trim().to_string();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// `true` when the terminator at `i` is a decimal point or the tail of
/// a known abbreviation and should not end a sentence.
fn is_suppressed(chars: &[char], i: usize) -> bool {
    if chars[i] == '.' {
        let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
        let next_digit = chars.get(i + 1).map(|c| c.is_ascii_digit()).unwrap_or(false);
        if prev_digit && next_digit {
            return true;
        }
    }

    let word_start = {
        let mut s = i;
        while s > 0 && (chars[s - 1].is_alphanumeric() || chars[s - 1] == '.') {
            s -= 1;
        }
        s
    };
    let word: String = chars[word_start..=i]
        .iter()
        .filter(|c| c.is_alphanumeric() || **c == '.')
        .collect();
    let word = word.trim_end_matches('.').to_lowercase();
    ABBREVIATIONS.contains(&word.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_period() {
        assert_eq!(split_sentences("Hello world. How are you?"), vec!["Hello world.", "How are you?"]);
    }

    #[test]
    fn respects_decimal_numbers() {
        assert_eq!(split_sentences("The value is 3.14 exactly."), vec!["The value is 3.14 exactly."]);
    }

    #[test]
    fn respects_abbreviations() {
        assert_eq!(
            split_sentences("Dr. Smith arrived. He was early."),
            vec!["Dr. Smith arrived.", "He was early."]
        );
    }

    #[test]
    fn keeps_trailing_quote_with_sentence() {
        assert_eq!(split_sentences(r#"She said "hello." Then left."#), vec![r#"She said "hello.""#, "Then left."]);
    }

    #[test]
    fn no_trailing_terminator_still_emits_tail() {
        assert_eq!(split_sentences("just a fragment"), vec!["just a fragment"]);
    }
}
