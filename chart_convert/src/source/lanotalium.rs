use chart_schema::BeatEntry;
use serde_json::Value;

use super::{normalize, number, TempoSource};
use crate::{fraction::reduce, FieldError};

/// Lanotalium chart: a flat list of `{Timing, Bpm}` pairs, either as the
/// document root or under its `bpm` key.
#[derive(Debug, Clone, Copy)]
pub struct Lanotalium<'a> {
    bpm: Option<&'a Value>,
}

impl<'a> Lanotalium<'a> {
    pub fn new(root: &'a Value) -> Self {
        let bpm = match root {
            Value::Array(_) => Some(root),
            _ => root.get("bpm"),
        };
        Self { bpm }
    }

    fn entry(event: &Value) -> Result<BeatEntry, FieldError> {
        let timing = number(event, "Timing")?;
        let bpm = number(event, "Bpm")?;

        // Negative timing has no anchor on the beat grid.
        let fraction = if timing < 0.0 { (0, 0, 0) } else { reduce(timing) };
        Ok(BeatEntry::new(fraction, bpm, bpm))
    }
}

impl TempoSource for Lanotalium<'_> {
    fn offset(&self) -> f64 {
        0.0
    }

    fn timeline(&self) -> Vec<BeatEntry> {
        normalize("bpm", self.bpm, Lanotalium::entry)
    }
}
