use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::resample::TARGET_SAMPLE_RATE;

/// Persist normalized mono samples as a 16-bit PCM WAV file.
///
/// The batch pipeline uses this to keep a copy of the converted audio next to
/// the transcription outputs when a converted-audio directory is configured.
/// Samples are clamped to `[-1.0, 1.0]` before quantization.
pub fn write_mono_wav(path: &Path, samples: &[f32]) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create WAV file '{}'", path.display()))?;

    for &sample in samples {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(quantized)
            .context("failed to write WAV sample")?;
    }

    writer
        .finalize()
        .with_context(|| format!("failed to finalize WAV file '{}'", path.display()))?;

    Ok(())
}
