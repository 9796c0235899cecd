//! Core traits for the episode generation system
//!
//! The two external collaborators named by the system design — the TTS
//! model and the audio codec encoders — are represented here as narrow
//! trait boundaries. No component outside this module knows how either
//! is actually implemented.
//!
//! ```text
//! TextToSpeech: text + voice -> PCM samples
//! AudioCodec:   PCM samples  -> encoded bytes (mp3/opus/flac/wav)
//! ```

mod audio_codec;
mod speech;

pub use audio_codec::{AudioCodec, AudioFormat};
pub use speech::{TextToSpeech, VoiceInfo, VoiceKind};
