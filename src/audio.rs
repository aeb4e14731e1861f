//! Decode media containers into mono `f32` at the recognizer's sample rate.
//!
//! This replaces an external converter step: any container/codec symphonia can
//! probe is decoded, downmixed, and resampled in-process. Inputs are consumed
//! in **unseekable** mode (`Read` only), which works for files as well as pipes
//! and stream-friendly container layouts; some MP4/MOV files that keep their
//! metadata at the end of the stream may still require a seekable source and
//! will fail to probe here.

use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use symphonia::core::codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet, Track};
use symphonia::core::io::{MediaSource, MediaSourceStream, MediaSourceStreamOptions, ReadOnlySource};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::resample::SampleNormalizer;

/// Decode an audio file into mono samples at [`crate::resample::TARGET_SAMPLE_RATE`].
///
/// The file extension is passed to the prober as a format hint.
pub fn decode_file(path: &Path) -> Result<Vec<f32>> {
    let hint = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase);

    let file =
        File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;

    decode_reader(file, hint.as_deref())
        .with_context(|| format!("failed to decode '{}'", path.display()))
}

/// Decode an unseekable byte stream into mono samples at the target rate.
///
/// We accept a generic `Read` rather than a filename so callers can pass:
/// - `File`
/// - stdin
/// - any other byte stream
///
/// `hint_extension` (e.g. "mp3", "ogg", "wav") improves probe accuracy for
/// ambiguous inputs.
pub fn decode_reader<R>(reader: R, hint_extension: Option<&str>) -> Result<Vec<f32>>
where
    R: Read + Send + 'static,
{
    // Symphonia's `MediaSource` is `Read + Send + Sync`. We only ever read the
    // source from one place, so a mutex wrapper is enough to satisfy `Sync`.
    let source = ReadOnlySource::new(LockedRead::new(reader));
    let (mut format, track) = probe_default_audio_track(Box::new(source), hint_extension)?;

    let mut decoder = decoder_for_track(&track)?;
    let mut normalizer = SampleNormalizer::new();
    let mut samples = Vec::new();

    loop {
        let Some(packet) = next_packet(&mut format)? else {
            break;
        };

        // Ignore packets from non-audio tracks.
        if packet.track_id() != track.id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => normalizer
                .push(&decoded, &mut samples)
                .context("failed to normalize decoded samples")?,

            // Recoverable: corrupted frame, but decoding can continue.
            Err(SymphoniaError::DecodeError(_)) => continue,

            // Treat IO errors as graceful end-of-stream.
            Err(SymphoniaError::IoError(_)) => break,

            // Anything else is considered fatal.
            Err(e) => return Err(anyhow!(e)).context("decoder failure"),
        }
    }

    // Flush any buffered resampler tail.
    normalizer
        .finish(&mut samples)
        .context("failed to flush resampler")?;

    Ok(samples)
}

/// Probe the container and pick a default audio track.
///
/// Track selection policy:
/// - choose the first track that looks decodable (codec != NULL)
/// - and has a known sample rate (required for resampling decisions downstream)
fn probe_default_audio_track(
    source: Box<dyn MediaSource>,
    hint_extension: Option<&str>,
) -> Result<(Box<dyn FormatReader>, Track)> {
    let mss_opts = MediaSourceStreamOptions {
        // Symphonia expects a power-of-two buffer > 32KiB for good probing behavior.
        buffer_len: 256 * 1024,
    };

    let mss = MediaSourceStream::new(source, mss_opts);

    let mut hint = Hint::new();
    if let Some(ext) = hint_extension {
        hint.with_extension(ext);
    }

    let format_opts: FormatOptions = Default::default();
    let metadata_opts: MetadataOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .map_err(|e| anyhow!(e))
        .context("failed to probe media stream")?;

    let format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
        .cloned()
        .ok_or_else(|| anyhow!("no audio track found"))?;

    Ok((format, track))
}

fn decoder_for_track(track: &Track) -> Result<Box<dyn Decoder>> {
    let decoder_opts: DecoderOptions = Default::default();

    symphonia::default::get_codecs()
        .make(&track.codec_params, &decoder_opts)
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")
}

/// Read the next packet, treating IO errors as "end of stream".
fn next_packet(format: &mut Box<dyn FormatReader>) -> Result<Option<Packet>> {
    match format.next_packet() {
        Ok(p) => Ok(Some(p)),
        Err(SymphoniaError::IoError(_)) => Ok(None),
        Err(e) => Err(anyhow!(e)).context("failed reading packet"),
    }
}

struct LockedRead<R> {
    inner: Mutex<R>,
}

impl<R> LockedRead<R> {
    fn new(inner: R) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }
}

impl<R: Read> Read for LockedRead<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner
            .lock()
            .map_err(|_| std::io::Error::other("decoder input mutex poisoned"))?
            .read(buf)
    }
}
