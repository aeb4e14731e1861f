//! Turn-based speaker label assignment.
//!
//! The recognizer flags segments after which the speaker changes
//! ([`crate::segments::Segment::next_speaker_turn`]). This stage walks the
//! segments in order and assigns ordinal labels (`SPEAKER_00`, `SPEAKER_01`,
//! ...), advancing the ordinal at each flagged turn. Enable
//! [`crate::opts::Opts::enable_speaker_turns`] during recognition or every
//! segment lands on `SPEAKER_00`.

use crate::segments::Transcript;

/// Options that control speaker label assignment.
#[derive(Debug, Clone)]
pub struct DiarizeOpts {
    /// Upper bound on distinct speaker labels. Turns beyond the bound wrap
    /// back to `SPEAKER_00`, which matches the common alternating-speaker case
    /// when the bound is 2.
    pub max_speakers: usize,
}

impl Default for DiarizeOpts {
    fn default() -> Self {
        Self { max_speakers: 10 }
    }
}

/// Assign a speaker label to every segment, in place.
pub fn assign_speakers(transcript: &mut Transcript, opts: &DiarizeOpts) {
    let bound = opts.max_speakers.max(1);
    let mut current = 0usize;

    for segment in &mut transcript.segments {
        segment.speaker = Some(speaker_label(current));
        if segment.next_speaker_turn {
            current = (current + 1) % bound;
        }
    }
}

fn speaker_label(index: usize) -> String {
    format!("SPEAKER_{index:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::Segment;

    fn seg(text: &str, next_speaker_turn: bool) -> Segment {
        Segment {
            start_seconds: 0.0,
            end_seconds: 1.0,
            text: text.to_string(),
            speaker: None,
            words: Vec::new(),
            next_speaker_turn,
        }
    }

    fn transcript(segments: Vec<Segment>) -> Transcript {
        Transcript {
            language_code: "en".to_string(),
            segments,
        }
    }

    #[test]
    fn labels_advance_at_speaker_turns() {
        let mut t = transcript(vec![
            seg("a", false),
            seg("b", true),
            seg("c", false),
            seg("d", true),
            seg("e", false),
        ]);

        assign_speakers(&mut t, &DiarizeOpts::default());

        let labels: Vec<_> = t
            .segments
            .iter()
            .map(|s| s.speaker.as_deref().unwrap().to_string())
            .collect();
        assert_eq!(
            labels,
            vec!["SPEAKER_00", "SPEAKER_00", "SPEAKER_01", "SPEAKER_01", "SPEAKER_02"]
        );
    }

    #[test]
    fn labels_wrap_at_max_speakers() {
        let mut t = transcript(vec![seg("a", true), seg("b", true), seg("c", true), seg("d", false)]);

        assign_speakers(&mut t, &DiarizeOpts { max_speakers: 2 });

        let labels: Vec<_> = t
            .segments
            .iter()
            .map(|s| s.speaker.as_deref().unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["SPEAKER_00", "SPEAKER_01", "SPEAKER_00", "SPEAKER_01"]);
    }

    #[test]
    fn zero_max_speakers_still_assigns_one_label() {
        let mut t = transcript(vec![seg("a", true), seg("b", false)]);

        assign_speakers(&mut t, &DiarizeOpts { max_speakers: 0 });

        assert!(t.segments.iter().all(|s| s.speaker.as_deref() == Some("SPEAKER_00")));
    }

    #[test]
    fn labels_are_zero_padded() {
        assert_eq!(speaker_label(0), "SPEAKER_00");
        assert_eq!(speaker_label(7), "SPEAKER_07");
        assert_eq!(speaker_label(10), "SPEAKER_10");
    }
}
