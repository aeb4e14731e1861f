/// Options that control how a transcription is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// Optional language hint (e.g. `"en"`, `"zh"`).
    ///
    /// When `None`, the recognizer auto-detects the spoken language.
    pub language: Option<String>,

    /// Whether to translate speech to English instead of transcribing verbatim.
    pub enable_translate_to_english: bool,

    /// Whether the recognizer should detect speaker changes between segments.
    ///
    /// Required for speaker label assignment; see [`crate::diarize`].
    pub enable_speaker_turns: bool,

    /// Whether to attach word-level timing to each segment.
    pub word_timestamps: bool,

    /// Number of recognizer threads. Defaults to the CPU count when `None`.
    pub threads: Option<i32>,

    /// Beam width for beam-search decoding.
    pub beam_size: i32,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            language: None,
            enable_translate_to_english: false,
            enable_speaker_turns: false,
            word_timestamps: false,
            threads: None,
            beam_size: 5,
        }
    }
}
