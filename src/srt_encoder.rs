use std::io::Write;

use crate::error::{Error, Result};
use crate::segment_encoder::{SegmentEncoder, format_timestamp};
use crate::segments::Segment;

/// A `SegmentEncoder` that writes segments in SubRip (SRT) format.
///
/// Each cue is a 1-based index line, a timing line with a comma millisecond
/// separator, the cue text, and a blank line.
pub struct SrtEncoder<W: Write> {
    w: W,

    /// Whether cue text carries a speaker prefix.
    with_speakers: bool,

    /// Index of the next cue (SRT counts from 1).
    next_index: u64,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    pub fn new(w: W, with_speakers: bool) -> Self {
        Self {
            w,
            with_speakers,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for SrtEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(Error::encoder("cannot write segment: encoder is already closed"));
        }

        let start = format_timestamp(seg.start_seconds, ',');
        let end = format_timestamp(seg.end_seconds, ',');

        writeln!(&mut self.w, "{}", self.next_index)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        if self.with_speakers {
            writeln!(&mut self.w, "{}: {}", seg.speaker_label(), seg.text)?;
        } else {
            writeln!(&mut self.w, "{}", seg.text)?;
        }
        writeln!(&mut self.w)?;

        self.next_index += 1;

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f32, end: f32, text: &str) -> Segment {
        Segment {
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
            speaker: None,
            words: Vec::new(),
            next_speaker_turn: false,
        }
    }

    #[test]
    fn srt_numbers_cues_from_one() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out, false);
        enc.write_segment(&seg(0.0, 1.5, "hello"))?;
        enc.write_segment(&seg(1.5, 2.0, "world"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert_eq!(
            s,
            "1\n00:00:00,000 --> 00:00:01,500\nhello\n\n2\n00:00:01,500 --> 00:00:02,000\nworld\n\n"
        );
        Ok(())
    }

    #[test]
    fn srt_uses_comma_millisecond_separator() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out, false);
        enc.write_segment(&seg(61.25, 62.0, "cue"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert!(s.contains("00:01:01,250 --> 00:01:02,000"));
        Ok(())
    }

    #[test]
    fn srt_prefixes_speakers_when_enabled() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out, true);
        let mut segment = seg(0.0, 1.0, "hi");
        segment.speaker = Some("SPEAKER_01".to_string());
        enc.write_segment(&segment)?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert!(s.contains("SPEAKER_01: hi\n"));
        Ok(())
    }

    #[test]
    fn srt_close_without_segments_emits_nothing() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out, false);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "");
        Ok(())
    }

    #[test]
    fn srt_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out, false);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
