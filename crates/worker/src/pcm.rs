//! Persist a chunk's raw PCM to a 24 kHz mono 16-bit WAV file

use std::path::Path;

use episodeer_core::{Error, Result};

const SAMPLE_RATE: u32 = 24_000;

/// Write `pcm` (signed 16-bit little-endian samples) to `path`,
/// creating parent directories as needed. Returns the clip's duration
/// in seconds.
pub fn write_wav(path: &Path, pcm: &[u8]) -> Result<f64> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(Error::from)?;
    }

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| Error::Internal(format!("wav writer init: {e}")))?;

    for frame in pcm.chunks_exact(2) {
        let sample = i16::from_le_bytes([frame[0], frame[1]]);
        writer
            .write_sample(sample)
            .map_err(|e| Error::Internal(format!("wav write: {e}")))?;
    }
    writer
        .finalize()
        .map_err(|e| Error::Internal(format!("wav finalize: {e}")))?;

    let sample_count = pcm.len() / 2;
    Ok(sample_count as f64 / SAMPLE_RATE as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_valid_wav_and_reports_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.wav");
        let pcm = vec![0u8; SAMPLE_RATE as usize * 2]; // 1 second of silence
        let duration = write_wav(&path, &pcm).unwrap();
        assert!((duration - 1.0).abs() < 1e-9);
        assert!(path.exists());
    }
}
