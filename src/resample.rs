//! PCM normalization for the recognizer.
//!
//! Responsibilities:
//! - Convert decoded PCM into interleaved `f32`
//! - Downmix to mono
//! - Resample to the recognizer's sample rate (when needed)
//!
//! `finish()` should be called at end-of-stream to flush any remaining
//! resampler input.

use anyhow::{Context, Result, anyhow, bail};
use rubato::{Resampler, SincFixedIn, WindowFunction};
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};

/// The sample rate the recognizer expects (Hz), mono.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// How many source frames we feed rubato per `process()` call.
///
/// Tradeoff: larger blocks = better throughput; smaller blocks = lower peak memory.
const RESAMPLE_BLOCK_FRAMES: usize = 2048;

/// A small stateful normalizer that turns decoded audio into mono 16 kHz `f32`.
///
/// Decoded buffers are pushed in container order; normalized samples are
/// appended to the caller's output buffer.
pub struct SampleNormalizer {
    // Scratch buffer used to copy decoded PCM into an interleaved `Vec<f32>`.
    scratch: Option<SampleBuffer<f32>>,

    // Lazily initialized resampler (only needed when the source rate != 16 kHz).
    resampler: Option<SincFixedIn<f32>>,

    // Mono source samples accumulated until a full rubato input block is available.
    pending: Vec<f32>,
}

impl Default for SampleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleNormalizer {
    pub fn new() -> Self {
        Self {
            scratch: None,
            resampler: None,
            pending: Vec::new(),
        }
    }

    /// Normalize one decoded buffer and append the mono 16 kHz result to `out`.
    pub fn push(&mut self, decoded: &AudioBufferRef<'_>, out: &mut Vec<f32>) -> Result<()> {
        let (interleaved, src_rate, channels) = self.interleave(decoded)?;
        let mono = downmix_to_mono(&interleaved, channels);

        // Fast path: already at the target sample rate.
        if src_rate == TARGET_SAMPLE_RATE {
            out.extend_from_slice(&mono);
            return Ok(());
        }

        self.ensure_resampler(src_rate)?;
        self.pending.extend_from_slice(&mono);
        self.drain_full_blocks(out)
    }

    /// Flush remaining buffered samples at end-of-stream.
    ///
    /// If resampling was never needed, this is a no-op.
    pub fn finish(&mut self, out: &mut Vec<f32>) -> Result<()> {
        let Some(rs) = self.resampler.as_ref() else {
            return Ok(());
        };

        if self.pending.is_empty() {
            return Ok(());
        }

        // rubato expects exact block sizes; pad the remainder with zeros.
        let block = rs.input_frames_max();
        let rem = self.pending.len() % block;
        if rem != 0 {
            self.pending.resize(self.pending.len() + (block - rem), 0.0);
        }

        self.drain_full_blocks(out)
    }

    fn interleave(&mut self, decoded: &AudioBufferRef<'_>) -> Result<(Vec<f32>, u32, usize)> {
        if self.scratch.is_none() {
            let spec = *decoded.spec();
            let duration = decoded.capacity() as u64;
            self.scratch = Some(SampleBuffer::<f32>::new(duration, spec));
        }

        let buf = self
            .scratch
            .as_mut()
            .ok_or_else(|| anyhow!("sample buffer not initialized"))?;

        // Copy decoded PCM into our interleaved scratch buffer.
        buf.copy_interleaved_ref(decoded.clone());

        let src_rate = decoded.spec().rate;
        let channels = decoded.spec().channels.count();
        if channels == 0 {
            bail!("decoded audio had zero channels");
        }

        Ok((buf.samples().to_vec(), src_rate, channels))
    }

    fn ensure_resampler(&mut self, src_rate: u32) -> Result<()> {
        if self.resampler.is_some() {
            return Ok(());
        }

        let rs = SincFixedIn::<f32>::new(
            TARGET_SAMPLE_RATE as f64 / src_rate as f64,
            2.0,
            rubato::SincInterpolationParameters {
                sinc_len: 256,
                f_cutoff: 0.95,
                interpolation: rubato::SincInterpolationType::Linear,
                oversampling_factor: 256,
                window: WindowFunction::BlackmanHarris2,
            },
            RESAMPLE_BLOCK_FRAMES,
            1, // mono
        )
        .map_err(|e| anyhow!(e))
        .context("failed to init resampler")?;

        self.resampler = Some(rs);
        Ok(())
    }

    /// Run every complete input block through the resampler, appending to `out`.
    fn drain_full_blocks(&mut self, out: &mut Vec<f32>) -> Result<()> {
        loop {
            let rs = self
                .resampler
                .as_mut()
                .ok_or_else(|| anyhow!("resampler not initialized"))?;
            let block = rs.input_frames_max();

            if self.pending.len() < block {
                return Ok(());
            }

            let input: Vec<f32> = self.pending.drain(..block).collect();
            let mut resampled = rs
                .process(&[input], None)
                .map_err(|e| anyhow!(e))
                .context("resampler process failed")?;

            if resampled.len() != 1 {
                bail!("expected mono output from resampler");
            }
            out.append(&mut resampled[0]);
        }
    }
}

/// Downmix interleaved samples into mono by averaging channels.
///
/// Policy: equal-weight average across channels (simple, predictable).
fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0.0;
        for c in 0..channels {
            acc += interleaved[base + c];
        }
        mono.push(acc / channels as f32);
    }

    mono
}
