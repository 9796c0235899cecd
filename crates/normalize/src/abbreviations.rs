//! Fixed abbreviation dictionary for `expand_abbreviations`
//!
//! Shaped like the teacher's domain abbreviation tables (`{short, full}`
//! pairs), populated for general technical writing instead of a single
//! vertical's jargon. Deliberately excludes prose contractions like
//! "e.g." or "i.e." — those read fine verbatim and expanding them would
//! fight the Chunker's sentence-boundary detection.

pub struct Abbreviation {
    pub short: &'static str,
    pub full: &'static str,
}

pub static DEFAULT: &[Abbreviation] = &[
    Abbreviation { short: "k8s", full: "kubernetes" },
    Abbreviation { short: "API", full: "A P I" },
    Abbreviation { short: "CLI", full: "command line interface" },
    Abbreviation { short: "CPU", full: "C P U" },
    Abbreviation { short: "GPU", full: "G P U" },
    Abbreviation { short: "URL", full: "U R L" },
    Abbreviation { short: "JSON", full: "jason" },
    Abbreviation { short: "SQL", full: "sequel" },
    Abbreviation { short: "HTTP", full: "H T T P" },
    Abbreviation { short: "HTTPS", full: "H T T P S" },
    Abbreviation { short: "repo", full: "repository" },
    Abbreviation { short: "config", full: "configuration" },
];

/// Replace each whole-word occurrence of a dictionary entry's `short`
/// form with its `full` form. Word-boundary matched so "API" inside
/// "APIs" isn't touched mid-token, keeping the pass conservative.
pub fn expand(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    let mut prev_char: Option<char> = None;

    'outer: while !rest.is_empty() {
        let at_word_start = prev_char.map(|c| !c.is_alphanumeric()).unwrap_or(true);
        if at_word_start {
            for entry in DEFAULT {
                if let Some(stripped) = match_word_at_start(rest, entry.short) {
                    output.push_str(entry.full);
                    rest = stripped;
                    prev_char = Some(' ');
                    continue 'outer;
                }
            }
        }
        let mut chars = rest.char_indices();
        let (_, c) = chars.next().expect("rest is non-empty");
        let next_boundary = chars.next().map(|(i, _)| i).unwrap_or(rest.len());
        output.push_str(&rest[..next_boundary]);
        prev_char = Some(c);
        rest = &rest[next_boundary..];
    }

    output
}

fn match_word_at_start<'a>(rest: &'a str, word: &str) -> Option<&'a str> {
    if !rest.starts_with(word) {
        return None;
    }
    let after = &rest[word.len()..];
    let after_ok = after
        .chars()
        .next()
        .map(|c| !c.is_alphanumeric())
        .unwrap_or(true);
    after_ok.then_some(after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_token() {
        assert_eq!(expand("deploy with k8s today"), "deploy with kubernetes today");
    }

    #[test]
    fn does_not_expand_substring() {
        assert_eq!(expand("several APIs exist"), "several APIs exist");
    }

    #[test]
    fn leaves_unknown_tokens_untouched() {
        assert_eq!(expand("hello world"), "hello world");
    }
}
