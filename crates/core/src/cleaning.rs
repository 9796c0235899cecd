//! Cleaning configuration shared by the Normalizer and the Store
//!
//! A `Source`'s `cleaning_settings` field is a snapshot of this struct;
//! re-cleaning a source replaces `cleaned_text` with
//! `normalize(raw_text, cleaning_settings)` and must not touch `id`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeBlockRule {
    /// Remove fenced/indented code entirely.
    Skip,
    /// Keep the code's text verbatim.
    Inline,
    /// Replace each block with a short synthetic phrase.
    Describe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    pub code_block_rule: CodeBlockRule,
    pub remove_non_text: bool,
    pub speak_urls: bool,
    pub handle_tables: bool,
    pub expand_abbreviations: bool,
    pub preserve_parentheses: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            code_block_rule: CodeBlockRule::Describe,
            remove_non_text: true,
            speak_urls: false,
            handle_tables: true,
            expand_abbreviations: true,
            preserve_parentheses: true,
        }
    }
}
