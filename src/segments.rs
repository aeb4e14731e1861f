use serde::Serialize;

use crate::word::Word;

/// Speaker label rendered when diarization ran but a segment has no assignment.
pub const UNKNOWN_SPEAKER: &str = "Unknown Speaker";

/// A full transcription result: the detected language plus ordered segments.
///
/// The recognizer produces this; the diarization and text-normalization stages
/// mutate it in place before it is serialized.
#[derive(Debug, Serialize, Clone)]
pub struct Transcript {
    /// Detected (or hinted) language code, e.g. `"en"`, `"zh"`; `"und"` when unknown.
    #[serde(rename = "language")]
    pub language_code: String,

    /// Segments in recognition order.
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// An empty transcript carrying only a language code.
    pub fn empty(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            segments: Vec::new(),
        }
    }
}

/// One recognized span of speech.
#[derive(Debug, Serialize, Clone)]
pub struct Segment {
    /// Start time in seconds.
    #[serde(rename = "start")]
    pub start_seconds: f32,

    /// End time in seconds.
    #[serde(rename = "end")]
    pub end_seconds: f32,

    /// Segment text, trimmed.
    pub text: String,

    /// Speaker label assigned by diarization (`SPEAKER_00`, ...). `None` until
    /// diarization runs, and absent from JSON output in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,

    /// Word-level timing, present when word timestamps were requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,

    /// Whether the recognizer flagged a speaker change after this segment.
    #[serde(skip)]
    pub next_speaker_turn: bool,
}

impl Segment {
    /// The speaker label to render in speaker-prefixed output formats.
    pub fn speaker_label(&self) -> &str {
        self.speaker.as_deref().unwrap_or(UNKNOWN_SPEAKER)
    }
}
