//! High-level API for running batch transcriptions.
//!
//! We expose a single entry point (`Sparrow`) that wraps the lower-level
//! decoding and recognition logic.
//!
//! The intent is:
//! - We load the Whisper model once (expensive).
//! - We reuse it to transcribe multiple inputs.
//! - Callers choose recognition behavior via `Opts`.
//!
//! Post-processing (speaker labels, script normalization) and serialization
//! stay in their own modules ([`crate::diarize`], [`crate::hanconv`],
//! [`crate::outputs`]) and operate on the returned [`Transcript`], which keeps
//! each stage testable without a loaded model.

use std::io::Read;
use std::path::Path;

use anyhow::Result;

use crate::audio;
use crate::opts::Opts;
use crate::segments::Transcript;
use crate::whisper::WhisperRecognizer;

/// The main high-level transcription entry point.
///
/// Typical usage:
/// - Construct once (model loading happens here).
/// - Call `transcribe_file` per input.
pub struct Sparrow {
    recognizer: WhisperRecognizer,
}

impl Sparrow {
    /// Create a new `Sparrow` instance, loading the model from `model_path`.
    pub fn new(model_path: impl AsRef<str>) -> Result<Self> {
        let recognizer = WhisperRecognizer::new(model_path.as_ref())?;
        Ok(Self { recognizer })
    }

    /// Decode an audio file and run recognition over it.
    pub fn transcribe_file(&self, audio_path: &Path, opts: &Opts) -> Result<Transcript> {
        let samples = audio::decode_file(audio_path)?;
        self.transcribe_samples(&samples, opts)
    }

    /// Decode an arbitrary byte stream and run recognition over it.
    ///
    /// `hint_extension` (e.g. "mp3") improves container probing.
    pub fn transcribe_reader<R>(
        &self,
        reader: R,
        hint_extension: Option<&str>,
        opts: &Opts,
    ) -> Result<Transcript>
    where
        R: Read + Send + 'static,
    {
        let samples = audio::decode_reader(reader, hint_extension)?;
        self.transcribe_samples(&samples, opts)
    }

    /// Run recognition over already-normalized mono 16 kHz samples.
    ///
    /// Useful when the caller keeps the decoded buffer around (for example to
    /// also persist it via [`crate::wav::write_mono_wav`]).
    pub fn transcribe_samples(&self, samples: &[f32], opts: &Opts) -> Result<Transcript> {
        self.recognizer.transcribe(samples, opts)
    }

    /// Access the underlying recognizer.
    ///
    /// This is primarily intended for advanced or experimental use-cases.
    pub fn recognizer(&self) -> &WhisperRecognizer {
        &self.recognizer
    }
}
