//! Title derivation shared by the `text` and `file` variants

const MAX_TITLE_LEN: usize = 120;

/// First non-empty line, trimmed of markdown heading markers and
/// truncated to `MAX_TITLE_LEN` bytes on a char boundary.
pub fn derive_from_content(text: &str) -> String {
    let line = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("Untitled");
    let line = line.trim_start_matches('#').trim();
    truncate(line)
}

fn truncate(s: &str) -> String {
    if s.len() <= MAX_TITLE_LEN {
        return s.to_string();
    }
    let mut end = MAX_TITLE_LEN;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_first_non_empty_line() {
        assert_eq!(derive_from_content("\n\n# My Title\n\nbody"), "My Title");
    }

    #[test]
    fn falls_back_when_blank() {
        assert_eq!(derive_from_content("   \n  "), "Untitled");
    }

    #[test]
    fn truncates_long_titles() {
        let long = "x".repeat(200);
        let title = derive_from_content(&long);
        assert!(title.len() <= MAX_TITLE_LEN + "…".len());
    }
}
