use std::io::Write;

use crate::error::{Error, Result};
use crate::segment_encoder::{SegmentEncoder, format_timestamp};
use crate::segments::Segment;

/// A `SegmentEncoder` that writes segments as tab-separated rows.
///
/// The header row matches the data rows: the `Speaker` column is present only
/// when speaker output is enabled. Timestamps use `HH:MM:SS.mmm`.
pub struct TsvEncoder<W: Write> {
    w: W,

    /// Whether rows carry a leading speaker column.
    with_speakers: bool,

    /// Whether we've written the header row.
    started: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> TsvEncoder<W> {
    pub fn new(w: W, with_speakers: bool) -> Self {
        Self {
            w,
            with_speakers,
            started: false,
            closed: false,
        }
    }

    /// Write the header row if we haven't written it yet.
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            if self.with_speakers {
                self.w.write_all(b"Speaker\tStart\tEnd\tText\n")?;
            } else {
                self.w.write_all(b"Start\tEnd\tText\n")?;
            }
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for TsvEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(Error::encoder("cannot write segment: encoder is already closed"));
        }

        self.start_if_needed()?;

        let start = format_timestamp(seg.start_seconds, '.');
        let end = format_timestamp(seg.end_seconds, '.');

        if self.with_speakers {
            writeln!(
                &mut self.w,
                "{}\t{start}\t{end}\t{}",
                seg.speaker_label(),
                seg.text
            )?;
        } else {
            writeln!(&mut self.w, "{start}\t{end}\t{}", seg.text)?;
        }

        // Flush so streaming consumers (stdout, pipes) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Finalize the file and flush the underlying writer.
    ///
    /// This method is idempotent. An empty transcript still produces a header
    /// row so the file is valid TSV.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;
        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f32, end: f32, text: &str, speaker: Option<&str>) -> Segment {
        Segment {
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
            speaker: speaker.map(str::to_string),
            words: Vec::new(),
            next_speaker_turn: false,
        }
    }

    #[test]
    fn tsv_close_without_segments_emits_header_only() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TsvEncoder::new(&mut out, false);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "Start\tEnd\tText\n");
        Ok(())
    }

    #[test]
    fn tsv_header_matches_rows_without_speakers() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TsvEncoder::new(&mut out, false);
        enc.write_segment(&seg(0.0, 1.5, "hello", None))?;
        enc.close()?;

        assert_eq!(
            std::str::from_utf8(&out)?,
            "Start\tEnd\tText\n00:00:00.000\t00:00:01.500\thello\n"
        );
        Ok(())
    }

    #[test]
    fn tsv_header_matches_rows_with_speakers() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TsvEncoder::new(&mut out, true);
        enc.write_segment(&seg(0.0, 1.0, "hi", Some("SPEAKER_00")))?;
        enc.write_segment(&seg(1.0, 2.0, "unassigned", None))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert!(s.starts_with("Speaker\tStart\tEnd\tText\n"));
        assert!(s.contains("SPEAKER_00\t00:00:00.000\t00:00:01.000\thi\n"));
        assert!(s.contains("Unknown Speaker\t00:00:01.000\t00:00:02.000\tunassigned\n"));
        Ok(())
    }

    #[test]
    fn tsv_close_is_idempotent() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TsvEncoder::new(&mut out, false);
        enc.close()?;
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "Start\tEnd\tText\n");
        Ok(())
    }

    #[test]
    fn tsv_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = TsvEncoder::new(&mut out, false);
        enc.close()?;
        let err = enc.write_segment(&seg(0.0, 1.0, "nope", None)).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
