use std::fs;

use sparrow::output_type::OutputType;
use sparrow::outputs::write_output_files;
use sparrow::segments::{Segment, Transcript};
use sparrow::word::Word;

fn transcript() -> Transcript {
    Transcript {
        language_code: "en".to_string(),
        segments: vec![
            Segment {
                start_seconds: 0.0,
                end_seconds: 1.5,
                text: "Treat yo self.".to_string(),
                speaker: Some("SPEAKER_00".to_string()),
                words: vec![Word {
                    start_seconds: 0.1,
                    end_seconds: 0.4,
                    text: "Treat".to_string(),
                    probability: 0.97,
                }],
                next_speaker_turn: true,
            },
            Segment {
                start_seconds: 1.5,
                end_seconds: 3.0,
                text: "The best day of the year.".to_string(),
                speaker: Some("SPEAKER_01".to_string()),
                words: Vec::new(),
                next_speaker_turn: false,
            },
        ],
    }
}

#[test]
fn writes_all_five_formats_into_per_format_directories() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let t = transcript();

    let written = write_output_files(&t, dir.path(), "meeting", &OutputType::ALL, true)?;

    assert_eq!(written.len(), 5);
    for (format, path) in OutputType::ALL.iter().zip(&written) {
        let ext = format.extension();
        assert_eq!(path, &dir.path().join(ext).join(format!("meeting.{ext}")));
        assert!(path.is_file(), "missing output file {}", path.display());
    }

    let txt = fs::read_to_string(dir.path().join("txt/meeting.txt"))?;
    assert_eq!(
        txt,
        "SPEAKER_00: Treat yo self.\nSPEAKER_01: The best day of the year.\n"
    );

    let srt = fs::read_to_string(dir.path().join("srt/meeting.srt"))?;
    assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:01,500\n"));
    assert!(srt.contains("2\n00:00:01,500 --> 00:00:03,000\n"));

    let vtt = fs::read_to_string(dir.path().join("vtt/meeting.vtt"))?;
    assert!(vtt.starts_with("WEBVTT\n\n"));
    assert!(vtt.contains("00:00:00.000 --> 00:00:01.500\nSPEAKER_00: Treat yo self.\n"));

    let tsv = fs::read_to_string(dir.path().join("tsv/meeting.tsv"))?;
    assert!(tsv.starts_with("Speaker\tStart\tEnd\tText\n"));
    assert_eq!(tsv.lines().count(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("json/meeting.json"))?)?;
    assert_eq!(json["language"], "en");
    assert_eq!(json["segments"][0]["speaker"], "SPEAKER_00");
    assert_eq!(json["segments"][0]["words"][0]["word"], "Treat");
    Ok(())
}

#[test]
fn writes_only_requested_formats() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let t = transcript();

    let written = write_output_files(
        &t,
        dir.path(),
        "meeting",
        &[OutputType::Srt, OutputType::Json],
        false,
    )?;

    assert_eq!(written.len(), 2);
    assert!(dir.path().join("srt/meeting.srt").is_file());
    assert!(dir.path().join("json/meeting.json").is_file());
    assert!(!dir.path().join("txt").exists());
    assert!(!dir.path().join("vtt").exists());
    assert!(!dir.path().join("tsv").exists());
    Ok(())
}

#[test]
fn empty_transcript_still_produces_valid_files() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let t = Transcript::empty("und");

    write_output_files(&t, dir.path(), "silence", &OutputType::ALL, false)?;

    assert_eq!(fs::read_to_string(dir.path().join("txt/silence.txt"))?, "");
    assert_eq!(fs::read_to_string(dir.path().join("srt/silence.srt"))?, "");
    assert_eq!(fs::read_to_string(dir.path().join("vtt/silence.vtt"))?, "");
    assert_eq!(
        fs::read_to_string(dir.path().join("tsv/silence.tsv"))?,
        "Start\tEnd\tText\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("json/silence.json"))?)?;
    assert_eq!(json["language"], "und");
    assert_eq!(json["segments"].as_array().map(Vec::len), Some(0));
    Ok(())
}
