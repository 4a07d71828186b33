use chart_schema::BeatEntry;
use serde_json::Value;

use super::{integer, normalize, number, TempoSource};
use crate::{fraction::reduce, tempo::timing_and_bpm, ConvertError, FieldError};

/// Tick based chart: `time_base` ticks per beat and a `tempo_list` of
/// microsecond-per-beat tempos anchored at ticks.
///
/// Both the `{tempo, start_tick}` and the `{value, tick}` spellings of a tempo
/// event are accepted.
#[derive(Debug, Clone, Copy)]
pub struct Cylheim<'a> {
    time_base: i64,
    tempo_list: Option<&'a Value>,
}

impl<'a> Cylheim<'a> {
    pub fn new(root: &'a Value) -> Result<Self, ConvertError> {
        let time_base = root
            .get("time_base")
            .and_then(integer)
            .filter(|tb| *tb > 0)
            .ok_or_else(|| {
                ConvertError::new("E1202", "`time_base` must be a positive integer")
            })?;

        Ok(Self {
            time_base,
            tempo_list: root.get("tempo_list"),
        })
    }

    fn entry(&self, event: &Value) -> Result<BeatEntry, FieldError> {
        let tempo = number(event, "tempo")
            .or_else(|_| number(event, "value"))
            .map_err(|_| FieldError::Missing("tempo"))?;
        let tick = event
            .get("start_tick")
            .or_else(|| event.get("tick"))
            .and_then(integer)
            .ok_or(FieldError::Missing("start_tick"))?;
        if tempo == 0.0 {
            return Err(FieldError::ZeroTempo);
        }

        let (timing_ms, bpm) = timing_and_bpm(self.time_base, tempo, tick);
        Ok(BeatEntry::new(reduce(timing_ms), bpm, bpm))
    }
}

impl TempoSource for Cylheim<'_> {
    fn offset(&self) -> f64 {
        0.0
    }

    fn timeline(&self) -> Vec<BeatEntry> {
        normalize("tempo_list", self.tempo_list, |event| self.entry(event))
    }
}
