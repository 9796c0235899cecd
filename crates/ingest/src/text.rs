//! `text` ingest variant — pass-through with a derived or supplied title

use crate::title;
use crate::IngestResult;

use episodeer_core::SourceType;

pub fn ingest(content: String, title: Option<String>) -> IngestResult {
    let title = title.unwrap_or_else(|| title::derive_from_content(&content));
    IngestResult {
        title,
        source_type: SourceType::Text,
        raw_text: content,
    }
}
