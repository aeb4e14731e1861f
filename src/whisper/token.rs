use anyhow::{Context, Result};
use whisper_rs::WhisperSegment;

use crate::word::{Word, centiseconds_to_seconds};

/// A single recognizer token with timing, before word merging.
#[derive(Debug, Clone)]
pub(super) struct Token {
    pub(super) start_seconds: f32,
    pub(super) end_seconds: f32,
    pub(super) text: String,
    pub(super) probability: f32,
}

pub(super) fn tokens_from_segment(segment: &WhisperSegment) -> Result<Vec<Token>> {
    let token_count = segment.n_tokens();
    let token_count_usize = usize::try_from(token_count)
        .with_context(|| format!("segment reported negative token count: {token_count}"))?;
    let mut tokens = Vec::with_capacity(token_count_usize);

    for token_idx in 0..token_count_usize {
        let token = segment
            .get_token(token_idx as i32)
            .context("failed to get token from segment")?;

        let data = token.token_data();
        let text = token
            .to_str()
            .with_context(|| format!("failed to get token text at index {token_idx}"))?
            .to_owned();

        tokens.push(Token {
            start_seconds: centiseconds_to_seconds(data.t0),
            end_seconds: centiseconds_to_seconds(data.t1),
            text,
            probability: data.p,
        });
    }

    Ok(tokens)
}

/// Whisper special/control tokens are formatted like `[_BEG_]`, `[_TT_50]`.
pub(super) fn is_special_token(text: &str) -> bool {
    text.starts_with("[_") && text.ends_with("_]")
}

/// Merge subword tokens into words with timing.
///
/// Whisper marks word boundaries with a leading space on the first token of a
/// word. CJK text carries no spaces, so a token starting with a CJK character
/// becomes its own word (per-character timing, the common convention for
/// Chinese/Japanese transcripts). A word's probability is the mean of its
/// tokens' probabilities.
pub(super) fn merge_tokens_into_words(tokens: &[Token]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Vec<&Token> = Vec::new();

    for token in tokens {
        if is_special_token(&token.text) {
            continue;
        }

        let boundary = token.text.starts_with(char::is_whitespace) || starts_with_cjk(&token.text);
        if boundary && !current.is_empty() {
            flush_word(&mut current, &mut words);
        }
        current.push(token);

        // CJK tokens never accumulate; emit immediately.
        if starts_with_cjk(&token.text) {
            flush_word(&mut current, &mut words);
        }
    }
    flush_word(&mut current, &mut words);

    words
}

fn flush_word(current: &mut Vec<&Token>, words: &mut Vec<Word>) {
    if current.is_empty() {
        return;
    }

    let text: String = current.iter().map(|t| t.text.as_str()).collect();
    let text = text.trim().to_owned();
    if text.is_empty() {
        current.clear();
        return;
    }

    let start_seconds = current[0].start_seconds;
    let end_seconds = current[current.len() - 1].end_seconds;
    let probability =
        current.iter().map(|t| t.probability).sum::<f32>() / current.len() as f32;

    words.push(Word {
        start_seconds,
        end_seconds,
        text,
        probability,
    });
    current.clear();
}

fn starts_with_cjk(text: &str) -> bool {
    let Some(c) = text.chars().next() else {
        return false;
    };
    matches!(c,
        '\u{3040}'..='\u{30FF}'    // hiragana + katakana
        | '\u{3400}'..='\u{4DBF}'  // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'  // CJK unified ideographs
        | '\u{F900}'..='\u{FAFF}'  // CJK compatibility ideographs
    )
}
