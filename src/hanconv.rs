//! Chinese script normalization.
//!
//! Converts transcript text between Chinese script variants (e.g. Simplified
//! to Traditional/Taiwan) using `zhconv`'s bundled conversion tables. Text in
//! other languages passes through unchanged, so the stage is safe to leave
//! enabled on mixed-language input.

use anyhow::{Result, bail};
use zhconv::{Variant, zhconv};

use crate::segments::Transcript;

/// Parse a variant name from configuration (e.g. `"zh-TW"`, `"zh-Hant"`).
pub fn parse_variant(name: &str) -> Result<Variant> {
    match name.parse::<Variant>() {
        Ok(variant) => Ok(variant),
        Err(_) => bail!("unsupported Chinese script variant: '{name}'"),
    }
}

/// Convert all segment and word text to the target variant, in place.
pub fn convert_transcript(transcript: &mut Transcript, variant: Variant) {
    for segment in &mut transcript.segments {
        segment.text = zhconv(&segment.text, variant);
        for word in &mut segment.words {
            word.text = zhconv(&word.text, variant);
        }
    }
}
