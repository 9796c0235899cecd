//! Markdown pipe-table → row-by-row sentence conversion

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\|?(\s*:?-{2,}:?\s*\|)+\s*:?-{2,}:?\s*\|?\s*$").unwrap());

/// Rewrite each contiguous pipe-table block into one sentence per data
/// row: `"column A: value; column B: value."`. Non-table lines pass
/// through unchanged.
pub fn handle_tables(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if is_table_header(&lines, i) {
            let headers = split_row(lines[i]);
            let mut j = i + 2;
            while j < lines.len() && is_row(lines[j]) {
                let cells = split_row(lines[j]);
                out.push(render_row(&headers, &cells));
                j += 1;
            }
            i = j;
        } else {
            out.push(lines[i].to_string());
            i += 1;
        }
    }

    out.join("\n")
}

fn is_table_header(lines: &[&str], i: usize) -> bool {
    is_row(lines[i]) && lines.get(i + 1).map(|l| SEPARATOR_ROW.is_match(l)).unwrap_or(false)
}

fn is_row(line: &str) -> bool {
    line.trim().starts_with('|') || line.contains('|')
}

fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn render_row(headers: &[String], cells: &[String]) -> String {
    let parts: Vec<String> = headers
        .iter()
        .zip(cells.iter())
        .map(|(h, c)| format!("{h}: {c}"))
        .collect();
    format!("{}.", parts.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_simple_table() {
        let input = "| Name | Age |\n|---|---|\n| Alice | 30 |\n| Bob | 40 |\n";
        let out = handle_tables(input);
        assert!(out.contains("Name: Alice; Age: 30."));
        assert!(out.contains("Name: Bob; Age: 40."));
    }

    #[test]
    fn leaves_non_table_text_untouched() {
        let input = "just a sentence with no pipes";
        assert_eq!(handle_tables(input), input);
    }
}
