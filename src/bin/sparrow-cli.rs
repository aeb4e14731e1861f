use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info};

use sparrow::Sparrow;
use sparrow::audio;
use sparrow::config::Config;
use sparrow::diarize::{self, DiarizeOpts};
use sparrow::hanconv;
use sparrow::logging;
use sparrow::opts::Opts;
use sparrow::output_type::OutputType;
use sparrow::outputs;
use sparrow::wav;

#[derive(Parser, Debug)]
#[command(name = "sparrow")]
#[command(about = "Batch-transcribe an audio file into caption and text formats")]
struct Args {
    /// Audio file to transcribe. A relative path is resolved against the
    /// configured audio directory.
    audio: Option<PathBuf>,

    /// Assign speaker labels to segments.
    #[arg(short = 'd', long = "diarize", default_value_t = false)]
    diarize: bool,

    /// Path to a sparrow.toml config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Whisper model path (overrides the config file).
    #[arg(short = 'm', long = "model")]
    model: Option<String>,

    /// Language hint (overrides the config file); auto-detected when absent.
    #[arg(short = 'l', long = "language")]
    language: Option<String>,

    /// Output formats to write. May be repeated; defaults to all five.
    #[arg(short = 'f', long = "format", value_enum)]
    formats: Vec<OutputType>,

    /// Output directory root (overrides the config file).
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Chinese script variant to normalize text to (overrides the config file).
    #[arg(long = "han-variant")]
    han_variant: Option<String>,

    /// Translate speech to English instead of transcribing verbatim.
    #[arg(short = 't', long = "translate", default_value_t = false)]
    translate: bool,

    /// Write a commented default config file to the given path and exit.
    #[arg(long = "init-config", value_name = "PATH")]
    init_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.init_config {
        std::fs::write(path, Config::generate_default_commented())
            .with_context(|| format!("failed to write config to '{}'", path.display()))?;
        println!("wrote default config to {}", path.display());
        return Ok(());
    }

    let Some(audio) = args.audio.clone() else {
        bail!("missing audio file argument");
    };

    let (config, config_path) = Config::load_with_path(args.config.as_deref())?;
    logging::init(config.paths.log_dir.as_deref())?;

    if let Some(path) = config_path {
        info!(config = %path.display(), "loaded configuration");
    }
    info!(
        audio = %audio.display(),
        diarize = args.diarize,
        "received transcription request"
    );

    if let Err(err) = run(&audio, &args, &config) {
        // Log-and-reraise so failures land in the log file as well as stderr.
        error!("transcription run failed: {err:#}");
        return Err(err);
    }

    info!("process completed successfully");
    Ok(())
}

fn run(audio: &Path, args: &Args, config: &Config) -> Result<()> {
    let audio_path = resolve_audio_path(audio, &config.paths.audio_dir);
    let stem = audio_path
        .file_stem()
        .with_context(|| format!("audio path has no file stem: '{}'", audio_path.display()))?
        .to_string_lossy()
        .into_owned();

    let model_path = match &args.model {
        Some(path) => path.clone(),
        None if !config.whisper.model_path.is_empty() => config.whisper.model_path.clone(),
        None => bail!("no model path configured; pass --model or set whisper.model_path"),
    };

    let opts = Opts {
        language: args.language.clone().or_else(|| config.whisper.language.clone()),
        enable_translate_to_english: args.translate || config.whisper.translate,
        enable_speaker_turns: args.diarize,
        word_timestamps: config.whisper.word_timestamps,
        threads: config.whisper.threads,
        beam_size: config.whisper.beam_size,
    };

    info!(audio = %audio_path.display(), "decoding audio to mono 16 kHz");
    let samples = audio::decode_file(&audio_path)?;

    if let Some(dir) = &config.paths.converted_dir {
        std::fs::create_dir_all(dir).with_context(|| {
            format!("failed to create converted-audio directory '{}'", dir.display())
        })?;
        let converted_path = dir.join(format!("{stem}.wav"));
        wav::write_mono_wav(&converted_path, &samples)?;
        info!(path = %converted_path.display(), "saved converted audio");
    }

    info!(model = %model_path, "loading model");
    let engine = Sparrow::new(&model_path)?;

    info!(
        seconds = samples.len() as f64 / f64::from(sparrow::resample::TARGET_SAMPLE_RATE),
        "transcribing"
    );
    let mut transcript = engine.transcribe_samples(&samples, &opts)?;
    info!(
        language = %transcript.language_code,
        segments = transcript.segments.len(),
        "transcription complete"
    );

    if args.diarize {
        diarize::assign_speakers(
            &mut transcript,
            &DiarizeOpts {
                max_speakers: config.diarize.max_speakers,
            },
        );
        info!(max_speakers = config.diarize.max_speakers, "assigned speaker labels");
    }

    if let Some(name) = args
        .han_variant
        .as_deref()
        .or(config.text.han_variant.as_deref())
    {
        let variant = hanconv::parse_variant(name)?;
        hanconv::convert_transcript(&mut transcript, variant);
        info!(variant = name, "normalized transcript text");
    }

    let formats: Vec<OutputType> = if args.formats.is_empty() {
        OutputType::ALL.to_vec()
    } else {
        args.formats.clone()
    };
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.paths.output_dir.clone());

    let written =
        outputs::write_output_files(&transcript, &output_dir, &stem, &formats, args.diarize)?;
    info!(files = written.len(), "wrote transcription outputs");

    Ok(())
}

fn resolve_audio_path(audio: &Path, audio_dir: &Path) -> PathBuf {
    if audio.is_absolute() || audio.exists() {
        audio.to_path_buf()
    } else {
        audio_dir.join(audio)
    }
}
