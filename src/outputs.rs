//! Fan a transcript out to its serialized forms.
//!
//! The batch pipeline writes one file per requested format under
//! `<output_dir>/<format>/<stem>.<format>`, creating the per-format
//! directories on demand.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::json_writer::write_json;
use crate::output_type::OutputType;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Transcript;
use crate::srt_encoder::SrtEncoder;
use crate::text_encoder::TextEncoder;
use crate::tsv_encoder::TsvEncoder;
use crate::vtt_encoder::VttEncoder;

/// Serialize a transcript into one format on the given writer.
///
/// `with_speakers` controls speaker prefixes/columns in the line-based formats;
/// JSON always carries whatever speaker labels the segments hold.
pub fn write_transcript<W: Write>(
    w: W,
    transcript: &Transcript,
    output_type: OutputType,
    with_speakers: bool,
) -> crate::error::Result<()> {
    // Select an encoder based on the requested output type.
    // We keep this explicit (no trait objects) to avoid lifetime surprises.
    match output_type {
        OutputType::Txt => stream_segments(TextEncoder::new(w, with_speakers), transcript),
        OutputType::Srt => stream_segments(SrtEncoder::new(w, with_speakers), transcript),
        OutputType::Vtt => stream_segments(VttEncoder::new(w, with_speakers), transcript),
        OutputType::Tsv => stream_segments(TsvEncoder::new(w, with_speakers), transcript),
        OutputType::Json => write_json(w, transcript),
    }
}

fn stream_segments<E: SegmentEncoder>(
    mut encoder: E,
    transcript: &Transcript,
) -> crate::error::Result<()> {
    let mut run_res = Ok(());
    for seg in &transcript.segments {
        run_res = encoder.write_segment(seg);
        if run_res.is_err() {
            break;
        }
    }

    // Always close, but prefer surfacing the write error if both fail.
    let close_res = encoder.close();
    match (run_res, close_res) {
        (Ok(()), res) => res,
        (Err(err), _) => Err(err),
    }
}

/// Write the transcript to `<output_dir>/<format>/<stem>.<format>` for each
/// requested format, creating directories as needed.
///
/// Returns the written paths in format order.
pub fn write_output_files(
    transcript: &Transcript,
    output_dir: &Path,
    stem: &str,
    formats: &[OutputType],
    with_speakers: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(formats.len());

    for &format in formats {
        let ext = format.extension();
        let dir = output_dir.join(ext);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;

        let path = dir.join(format!("{stem}.{ext}"));
        let file = File::create(&path)
            .with_context(|| format!("failed to create output file '{}'", path.display()))?;

        write_transcript(BufWriter::new(file), transcript, format, with_speakers)
            .with_context(|| format!("failed to write '{}'", path.display()))?;

        info!(path = %path.display(), "saved transcript output");
        written.push(path);
    }

    Ok(written)
}
