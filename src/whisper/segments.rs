use anyhow::{Context, Result};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperSegment, WhisperState};

use crate::opts::Opts;
use crate::segments::{Segment, Transcript};
use crate::word::centiseconds_to_seconds;

use super::token::{Token, is_special_token, merge_tokens_into_words, tokens_from_segment};

/// Our placeholder language code when detection is unavailable.
///
/// Prefers `"und"` ("undetermined") over an empty string because it's a common
/// convention in language tagging systems and makes the meaning obvious.
pub(super) const DEFAULT_LANGUAGE_CODE: &str = "und";

pub(super) fn transcribe(
    ctx: &WhisperContext,
    opts: &Opts,
    samples: &[f32],
) -> Result<Transcript> {
    let state = run_whisper_full(ctx, opts, samples)?;

    let mut segments = Vec::new();
    for whisper_segment in state.as_iter() {
        segments.push(to_segment(whisper_segment, opts)?);
    }

    let language_code = detected_language(&state, opts);

    Ok(Transcript {
        language_code,
        segments,
    })
}

/// Language reported by the last full pass, falling back to the caller's hint.
fn detected_language(state: &WhisperState, opts: &Opts) -> String {
    Some(state.full_lang_id_from_state())
        .and_then(whisper_rs::get_lang_str)
        .map(str::to_owned)
        .or_else(|| opts.language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_owned())
}

fn to_segment(segment: WhisperSegment, opts: &Opts) -> Result<Segment> {
    let text = segment
        .to_str()
        .context("failed to get segment text")?
        .trim()
        .to_owned();

    let tokens = tokens_from_segment(&segment)?;

    // Prefer token-derived timing when available to avoid long segments that include
    // leading/trailing silence. Fall back to whisper's segment-level timestamps when token
    // timing is unavailable.
    let (start_seconds, end_seconds) = seconds_from_tokens_or_fallback(&segment, &tokens);

    let words = if opts.word_timestamps {
        merge_tokens_into_words(&tokens)
    } else {
        Vec::new()
    };

    Ok(Segment {
        start_seconds,
        end_seconds,
        text,
        speaker: None,
        words,
        next_speaker_turn: segment.next_segment_speaker_turn(),
    })
}

fn seconds_from_tokens_or_fallback(segment: &WhisperSegment, tokens: &[Token]) -> (f32, f32) {
    let mut min_start: Option<f32> = None;
    let mut max_end: Option<f32> = None;

    for token in tokens {
        if is_special_token(&token.text) {
            continue;
        }

        // Skip tokens with unknown timestamps (whisper uses -1, clamped to 0.0).
        if token.start_seconds <= 0.0 && token.end_seconds <= 0.0 {
            continue;
        }

        min_start = Some(min_start.map_or(token.start_seconds, |v| v.min(token.start_seconds)));
        max_end = Some(max_end.map_or(token.end_seconds, |v| v.max(token.end_seconds)));
    }

    match (min_start, max_end) {
        (Some(s), Some(e)) if e >= s => (s, e),
        _ => (
            centiseconds_to_seconds(segment.start_timestamp()),
            centiseconds_to_seconds(segment.end_timestamp()),
        ),
    }
}

fn build_full_params(opts: &Opts) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: opts.beam_size,
        patience: 1.0,
    });

    params.set_n_threads(opts.threads.unwrap_or_else(|| num_cpus::get() as i32));
    params.set_translate(opts.enable_translate_to_english);
    params.set_language(opts.language.as_deref());
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    // Token timing backs both word timestamps and segment boundary refinement.
    params.set_token_timestamps(true);

    // Speaker-turn detection (tinydiarize) feeds the diarization stage.
    params.set_tdrz_enable(opts.enable_speaker_turns);

    params
}

fn run_whisper_full(ctx: &WhisperContext, opts: &Opts, samples: &[f32]) -> Result<WhisperState> {
    let params = build_full_params(opts);

    let mut state = ctx
        .create_state()
        .context("failed to create whisper state")?;

    state
        .full(params, samples)
        .context("failed to run whisper full()")?;

    Ok(state)
}
