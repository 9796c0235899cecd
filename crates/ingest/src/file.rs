//! `file` ingest variant — UTF-8 decode an uploaded blob

use episodeer_core::{Error, Result, SourceType};

use crate::IngestResult;

pub fn ingest(filename: String, bytes: Vec<u8>) -> Result<IngestResult> {
    let raw_text = String::from_utf8(bytes)
        .map_err(|_| Error::UnsupportedType("file is not valid UTF-8 text".to_string()))?;

    Ok(IngestResult {
        title: filename,
        source_type: SourceType::File,
        raw_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_bytes() {
        let result = ingest("notes.txt".to_string(), b"hello world".to_vec()).unwrap();
        assert_eq!(result.title, "notes.txt");
        assert_eq!(result.raw_text, "hello world");
    }

    #[test]
    fn rejects_non_utf8() {
        let result = ingest("bin.dat".to_string(), vec![0xff, 0xfe, 0x00]);
        assert!(result.is_err());
    }
}
