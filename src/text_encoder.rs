use std::io::Write;

use crate::error::{Error, Result};
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes one plain-text line per segment.
///
/// With speakers enabled each line reads `SPEAKER_00: text`; segments without
/// an assignment fall back to the unknown-speaker label.
pub struct TextEncoder<W: Write> {
    w: W,

    /// Whether lines carry a speaker prefix.
    with_speakers: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> TextEncoder<W> {
    pub fn new(w: W, with_speakers: bool) -> Self {
        Self {
            w,
            with_speakers,
            closed: false,
        }
    }
}

impl<W: Write> SegmentEncoder for TextEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(Error::encoder("cannot write segment: encoder is already closed"));
        }

        if self.with_speakers {
            writeln!(&mut self.w, "{}: {}", seg.speaker_label(), seg.text)?;
        } else {
            writeln!(&mut self.w, "{}", seg.text)?;
        }

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
