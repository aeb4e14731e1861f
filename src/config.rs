use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Batch pipeline configuration, loaded from a TOML file.
///
/// Every field has a default so a partial (or absent) config file works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub whisper: WhisperConfig,
    pub diarize: DiarizeConfig,
    pub text: TextConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory relative audio filenames are resolved against.
    pub audio_dir: PathBuf,
    /// When set, the converted mono 16 kHz WAV is written here.
    pub converted_dir: Option<PathBuf>,
    /// Root of the per-format output tree (`txt/`, `srt/`, ...).
    pub output_dir: PathBuf,
    /// When set, logs are appended to a dated file here as well as the console.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhisperConfig {
    /// Path to a whisper.cpp GGML model file.
    pub model_path: String,
    /// Language hint; leave unset to auto-detect.
    pub language: Option<String>,
    /// Translate speech to English instead of transcribing verbatim.
    pub translate: bool,
    /// Recognizer threads; defaults to the CPU count when unset.
    pub threads: Option<i32>,
    /// Beam width for beam-search decoding.
    pub beam_size: i32,
    /// Attach word-level timing to segments (visible in JSON output).
    pub word_timestamps: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiarizeConfig {
    /// Upper bound on distinct speaker labels.
    pub max_speakers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Chinese script variant transcript text is normalized to
    /// (e.g. "zh-TW", "zh-Hant"). Unset disables normalization.
    pub han_variant: Option<String>,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            whisper: WhisperConfig::default(),
            diarize: DiarizeConfig::default(),
            text: TextConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("."),
            converted_dir: None,
            output_dir: PathBuf::from("transcripts"),
            log_dir: None,
        }
    }
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model_path: String::new(),
            language: None,
            translate: false,
            threads: None,
            beam_size: 5,
            word_timestamps: false,
        }
    }
}

impl Default for DiarizeConfig {
    fn default() -> Self {
        Self { max_speakers: 10 }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { han_variant: None }
    }
}

// --- Config loading ---

impl Config {
    /// Load config and return the resolved file path (if any).
    ///
    /// Resolution order:
    /// 1. an explicit path (an error if unreadable)
    /// 2. `sparrow.toml` beside the executable
    /// 3. the platform config directory (e.g. `~/.config/sparrow/config.toml`)
    /// 4. built-in defaults
    pub fn load_with_path(path: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        if let Some(p) = path {
            let content = std::fs::read_to_string(p).map_err(|e| {
                anyhow::anyhow!("failed to read config file {}: {}", p.display(), e)
            })?;
            let config: Config = toml::from_str(&content)?;
            return Ok((config, Some(p.to_path_buf())));
        }

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(p) = exe_path.parent().map(|p| p.join("sparrow.toml")) {
                if p.exists() {
                    let content = std::fs::read_to_string(&p)?;
                    let config: Config = toml::from_str(&content)?;
                    return Ok((config, Some(p)));
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let platform_config = config_dir.join("sparrow").join("config.toml");
            if platform_config.exists() {
                let content = std::fs::read_to_string(&platform_config)?;
                let config: Config = toml::from_str(&content)?;
                return Ok((config, Some(platform_config)));
            }
        }

        tracing::info!("no config file found, using defaults");
        Ok((Config::default(), None))
    }

    /// Load config (without tracking the resolved path).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_path(path).map(|(config, _)| config)
    }

    /// Generate a default config file with all fields and inline documentation.
    pub fn generate_default_commented() -> String {
        r#"# sparrow configuration
# Edit this file to customize transcription and output settings.

[paths]
# Directory relative audio filenames are resolved against.
audio_dir = "."
# Root directory for transcription outputs; one subdirectory per format
# (txt/, srt/, vtt/, tsv/, json/).
output_dir = "transcripts"
# Persist the converted mono 16 kHz WAV here. Comment out to skip.
# converted_dir = "converted"
# Append logs to sparrow-YYYY-MM-DD.log in this directory as well as the
# console. Comment out for console-only logging.
# log_dir = "logs"

[whisper]
# Path to a whisper.cpp GGML model file (e.g. ggml-large-v3.bin).
model_path = ""
# Language hint ("en", "zh", ...). Comment out to auto-detect.
# language = "zh"
# Translate speech to English instead of transcribing verbatim.
translate = false
# Recognizer threads. Comment out to use the CPU count.
# threads = 8
# Beam width for beam-search decoding.
beam_size = 5
# Attach word-level timing to segments (visible in JSON output).
word_timestamps = false

[diarize]
# Upper bound on distinct speaker labels when --diarize is passed.
max_speakers = 10

[text]
# Chinese script variant transcript text is normalized to. Comment out to
# disable normalization.
# han_variant = "zh-TW"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.paths.audio_dir, PathBuf::from("."));
        assert_eq!(config.paths.output_dir, PathBuf::from("transcripts"));
        assert!(config.paths.converted_dir.is_none());
        assert!(config.paths.log_dir.is_none());
        assert!(config.whisper.model_path.is_empty());
        assert_eq!(config.whisper.beam_size, 5);
        assert!(config.whisper.threads.is_none());
        assert!(!config.whisper.word_timestamps);
        assert_eq!(config.diarize.max_speakers, 10);
        assert!(config.text.han_variant.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults_for_unspecified_fields() {
        let toml_str = r#"
            [whisper]
            model_path = "/models/ggml-large-v3.bin"
            language = "zh"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.whisper.model_path, "/models/ggml-large-v3.bin");
        assert_eq!(config.whisper.language.as_deref(), Some("zh"));
        // Defaults still applied for unspecified fields
        assert_eq!(config.whisper.beam_size, 5);
        assert_eq!(config.diarize.max_speakers, 10);
        assert_eq!(config.paths.output_dir, PathBuf::from("transcripts"));
    }

    #[test]
    fn full_toml_parses() {
        let toml_str = r#"
            [paths]
            audio_dir = "/srv/audio"
            converted_dir = "/srv/audio-mono"
            output_dir = "/srv/transcripts"
            log_dir = "/var/log/sparrow"

            [whisper]
            model_path = "/models/ggml-large-v3.bin"
            language = "zh"
            translate = false
            threads = 8
            beam_size = 3
            word_timestamps = true

            [diarize]
            max_speakers = 4

            [text]
            han_variant = "zh-TW"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.paths.audio_dir, PathBuf::from("/srv/audio"));
        assert_eq!(
            config.paths.converted_dir,
            Some(PathBuf::from("/srv/audio-mono"))
        );
        assert_eq!(config.paths.log_dir, Some(PathBuf::from("/var/log/sparrow")));
        assert_eq!(config.whisper.threads, Some(8));
        assert_eq!(config.whisper.beam_size, 3);
        assert!(config.whisper.word_timestamps);
        assert_eq!(config.diarize.max_speakers, 4);
        assert_eq!(config.text.han_variant.as_deref(), Some("zh-TW"));
    }

    #[test]
    fn config_roundtrip_serialize() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.whisper.beam_size, config.whisper.beam_size);
        assert_eq!(parsed.diarize.max_speakers, config.diarize.max_speakers);
    }

    #[test]
    fn load_nonexistent_path_errors() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_with_path_returns_resolved_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config_file = tmp.path().join("sparrow.toml");
        std::fs::write(&config_file, "[whisper]\nbeam_size = 2\n").unwrap();

        let (config, resolved) = Config::load_with_path(Some(config_file.as_path())).unwrap();
        assert_eq!(config.whisper.beam_size, 2);
        assert_eq!(resolved, Some(config_file));
    }

    #[test]
    fn generate_default_commented_is_valid_toml() {
        let content = Config::generate_default_commented();
        // Should be parseable as valid TOML (comments are stripped by the parser)
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.whisper.beam_size, 5);
        assert_eq!(config.diarize.max_speakers, 10);
        assert_eq!(config.paths.output_dir, PathBuf::from("transcripts"));
    }

    #[test]
    fn generate_default_commented_has_all_sections() {
        let content = Config::generate_default_commented();
        assert!(content.contains("[paths]"));
        assert!(content.contains("[whisper]"));
        assert!(content.contains("[diarize]"));
        assert!(content.contains("[text]"));
    }
}
