//! `sparrow` — batch audio transcription into caption and text files.
//!
//! This crate provides:
//! - Audio decoding into the recognizer's mono 16 kHz format
//! - Model loading and full-pass recognition (with word timing and
//!   speaker-turn detection)
//! - Turn-based speaker label assignment
//! - Chinese script normalization
//! - Pluggable output encoders (txt, SRT, WebVTT, TSV, JSON) and a
//!   per-format output tree writer
//!
//! The library is designed to be used by the `sparrow-cli` batch tool, with an
//! emphasis on clarity and testability of each pipeline stage.

// High-level API (most consumers should start here).
pub mod opts;
pub mod sparrow;

// Pipeline configuration.
pub mod config;

// Transcript data structures.
pub mod segments;
pub mod word;

// Audio decoding and normalization.
pub mod audio;
pub mod resample;
pub mod wav;

// Speech recognition.
pub mod whisper;

// Post-processing stages.
pub mod diarize;
pub mod hanconv;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod outputs;
pub mod segment_encoder;

// Output encoders that serialize segments into various formats.
pub mod json_writer;
pub mod srt_encoder;
pub mod text_encoder;
pub mod tsv_encoder;
pub mod vtt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub mod error;

pub use error::{Error, Result};
pub use segments::{Segment, Transcript};
pub use sparrow::Sparrow;
