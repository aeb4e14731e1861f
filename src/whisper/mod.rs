//! Speech recognition backed by `whisper-rs` / whisper.cpp.
//!
//! The recognizer owns a loaded model context and turns mono 16 kHz `f32`
//! samples into a [`Transcript`]: ordered segments with timing, text,
//! speaker-turn flags, and (optionally) word-level timestamps.

use std::os::raw::{c_char, c_void};
use std::path::Path;
use std::sync::Once;

use anyhow::{Context, Result, ensure};
use whisper_rs::{WhisperContext, WhisperContextParameters};

mod segments;
mod token;

use crate::opts::Opts;
use crate::segments::Transcript;

/// A loaded whisper.cpp model, reusable across transcriptions.
///
/// Loading is expensive; construct once and call [`transcribe`](Self::transcribe)
/// per input.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
}

impl WhisperRecognizer {
    /// Load a whisper.cpp model from disk and initialize a recognizer.
    ///
    /// We fail fast on a missing or invalid model path so callers get a clear
    /// error before any audio work happens.
    pub fn new(model_path: &str) -> Result<Self> {
        ensure!(!model_path.trim().is_empty(), "model path must be provided");

        let path = Path::new(model_path);
        ensure!(path.exists(), "model not found at '{}'", model_path);
        ensure!(path.is_file(), "model path is not a file: '{}'", model_path);

        silence_whisper_logs();

        let ctx =
            WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
                .with_context(|| format!("failed to load model from path: {model_path}"))?;

        Ok(Self { ctx })
    }

    /// Access the underlying whisper context.
    ///
    /// This is primarily intended for advanced or experimental use-cases.
    pub fn context(&self) -> &WhisperContext {
        &self.ctx
    }

    /// Run a full recognition pass over a contiguous sample buffer.
    ///
    /// Empty input yields an empty transcript rather than an error.
    pub fn transcribe(&self, samples: &[f32], opts: &Opts) -> Result<Transcript> {
        if samples.is_empty() {
            return Ok(Transcript::empty(segments::DEFAULT_LANGUAGE_CODE));
        }

        segments::transcribe(&self.ctx, opts, samples)
    }
}

/// whisper.cpp writes its own progress and system info to stderr; route that
/// through a discarding callback, once per process, so `tracing` output stays
/// the only thing on the console.
fn silence_whisper_logs() {
    unsafe extern "C" fn discard(_level: u32, _msg: *const c_char, _data: *mut c_void) {}

    static SILENCE: Once = Once::new();
    SILENCE.call_once(|| unsafe {
        whisper_rs::set_log_callback(Some(discard), std::ptr::null_mut());
    });
}
