use serde::Serialize;

/// A single word with timing recovered from recognizer token timestamps.
///
/// Field names serialize to the conventional transcript-JSON keys
/// (`word`, `start`, `end`, `score`).
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Word {
    /// Start time in seconds.
    #[serde(rename = "start")]
    pub start_seconds: f32,
    /// End time in seconds.
    #[serde(rename = "end")]
    pub end_seconds: f32,
    /// Word text, without surrounding whitespace.
    #[serde(rename = "word")]
    pub text: String,
    /// Mean probability of the tokens merged into this word.
    #[serde(rename = "score")]
    pub probability: f32,
}

/// Convert whisper centisecond timestamps to seconds.
///
/// whisper uses -1 for unknown; clamp to 0 so consumers don't see -0.01s.
pub(crate) fn centiseconds_to_seconds(value: i64) -> f32 {
    if value < 0 { 0.0 } else { value as f32 / 100.0 }
}
