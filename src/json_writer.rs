use std::io::Write;

use crate::error::Result;
use crate::segments::Transcript;

/// Serialize the full transcript as pretty-printed JSON.
///
/// Unlike the line-based formats this is not a per-segment encoder: the JSON
/// output carries transcript-level fields (the language code) alongside the
/// segment array, so it serializes the whole object at once. serde_json leaves
/// non-ASCII text unescaped, which keeps CJK transcripts readable.
pub fn write_json<W: Write>(mut w: W, transcript: &Transcript) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, transcript)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}
