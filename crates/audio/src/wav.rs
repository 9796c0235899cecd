//! Raw WAV read/write matching the TTS contract: 24 kHz mono 16-bit PCM

use std::path::Path;

use episodeer_core::{Error, Result};

const SAMPLE_RATE: u32 = 24_000;

/// Read a chunk's WAV file back into raw little-endian `i16` sample
/// bytes, rejecting anything that doesn't match the 24 kHz mono
/// 16-bit contract every chunk file is written under.
pub fn read_pcm(path: &Path) -> Result<Vec<u8>> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| Error::Internal(format!("reading {}: {e}", path.display())))?;
    let spec = reader.spec();
    if spec.channels != 1 || spec.sample_rate != SAMPLE_RATE || spec.bits_per_sample != 16 {
        return Err(Error::AudioContractMismatch(format!(
            "{}: expected 24kHz mono 16-bit, got {}Hz {}ch {}-bit",
            path.display(),
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample
        )));
    }

    let mut bytes = Vec::with_capacity(reader.len() as usize * 2);
    for sample in reader.samples::<i16>() {
        let sample = sample.map_err(|e| Error::Internal(format!("decoding sample: {e}")))?;
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    Ok(bytes)
}

/// Write concatenated PCM bytes out as a single WAV file.
pub fn write_pcm(path: &Path, pcm: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
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
    Ok(())
}
