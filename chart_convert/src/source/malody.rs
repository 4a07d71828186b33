use chart_schema::BeatEntry;
use log::{debug, warn};
use serde_json::Value;

use super::{integer, normalize, number, TempoSource};
use crate::FieldError;

/// Malody `.mc` chart: `time` holds `{beat: [whole, num, den], bpm}` changes
/// and the last entry of `note` carries the audio offset in milliseconds.
///
/// `ThisStartBPM` holds the absolute beat of the change rather than a tempo.
#[derive(Debug, Clone, Copy)]
pub struct Malody<'a> {
    root: &'a Value,
}

impl<'a> Malody<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Raw `offset` of the last note, in milliseconds.
    pub fn last_note_offset(&self) -> Result<f64, FieldError> {
        let notes = self
            .root
            .get("note")
            .and_then(Value::as_array)
            .ok_or(FieldError::NotArray("note"))?;
        let last = notes.last().ok_or(FieldError::Empty("note"))?;
        number(last, "offset")
    }

    fn entry(event: &Value) -> Result<BeatEntry, FieldError> {
        let bpm = number(event, "bpm")?;
        let beat = event
            .get("beat")
            .and_then(Value::as_array)
            .ok_or(FieldError::BeatShape)?;
        let part = |i: usize| {
            beat.get(i)
                .and_then(integer)
                .and_then(|v| i32::try_from(v).ok())
                .ok_or(FieldError::BeatShape)
        };
        let fraction = (part(0)?, part(1)?, part(2)?);

        let mut entry = BeatEntry::new(fraction, bpm, 0.0);
        entry.this_start_bpm = entry.beat();
        Ok(entry)
    }
}

impl TempoSource for Malody<'_> {
    /// Offset in seconds.
    fn offset(&self) -> f64 {
        match self.last_note_offset() {
            Ok(ms) => {
                debug!("offset: {ms}ms");
                ms / 1000.0
            }
            Err(err) => {
                warn!("no usable offset ({err}); using 0");
                0.0
            }
        }
    }

    fn timeline(&self) -> Vec<BeatEntry> {
        normalize("time", self.root.get("time"), Malody::entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart() -> Value {
        json!({
            "meta": {"mode": 0, "version": "4.3.7"},
            "time": [
                {"beat": [0, 0, 1], "bpm": 170.0},
                {"beat": [32, 1, 2], "bpm": 85.0}
            ],
            "note": [
                {"beat": [0, 0, 1], "column": 0},
                {"beat": [0, 0, 1], "sound": "song.ogg", "vol": 100, "offset": 254, "type": 1}
            ]
        })
    }

    #[test]
    fn offset_comes_from_last_note_in_seconds() {
        let root = chart();
        let source = Malody::new(&root);
        assert_eq!(source.last_note_offset(), Ok(254.0));
        assert_eq!(source.offset(), 0.254);
    }

    #[test]
    fn beat_fraction_is_copied_and_start_field_holds_beat() {
        let root = chart();
        let timeline = Malody::new(&root).timeline();

        assert_eq!(
            timeline,
            vec![
                BeatEntry::new((0, 0, 1), 170.0, 0.0),
                BeatEntry::new((32, 1, 2), 85.0, 32.5),
            ]
        );
    }

    #[test]
    fn zero_denominator_uses_whole_beat() {
        let root = json!({"time": [{"beat": [4, 1, 0], "bpm": 130.0}]});
        let timeline = Malody::new(&root).timeline();

        assert_eq!(timeline, vec![BeatEntry::new((4, 1, 0), 130.0, 4.0)]);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let root = json!({
            "time": [
                {"beat": [0, 0, 1], "bpm": 120},
                {"beat": 3, "bpm": 140},
                {"beat": [8, 0], "bpm": 140},
                {"beat": [16, 0, 1], "bpm": "fast"},
                {"beat": [24, 0, 1], "bpm": 150}
            ]
        });

        let timeline = Malody::new(&root).timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[1].integer, 24);
        assert_eq!(timeline[1].current_bpm, 150.0);
    }

    #[test]
    fn missing_offset_falls_back_to_zero() {
        let root = json!({"time": [], "note": []});
        let source = Malody::new(&root);
        assert_eq!(source.last_note_offset(), Err(FieldError::Empty("note")));
        assert_eq!(source.offset(), 0.0);

        let root = json!({"time": [], "note": [{"beat": [0, 0, 1]}]});
        assert_eq!(
            Malody::new(&root).last_note_offset(),
            Err(FieldError::Missing("offset"))
        );

        let root = json!({"time": []});
        assert_eq!(
            Malody::new(&root).last_note_offset(),
            Err(FieldError::NotArray("note"))
        );
    }
}
