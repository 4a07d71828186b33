use std::{fmt, str::FromStr};

use chart_schema::BeatEntry;
use log::warn;
use serde_json::Value;

use crate::{ConvertError, FieldError};

mod cylheim;
mod lanotalium;
mod malody;

pub use cylheim::Cylheim;
pub use lanotalium::Lanotalium;
pub use malody::Malody;

/// Offset and tempo timeline of one source chart.
pub trait TempoSource {
    /// Chart offset in the output's unit.
    fn offset(&self) -> f64;

    /// Tempo changes in source order. Malformed events are skipped with a warning.
    fn timeline(&self) -> Vec<BeatEntry>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Tick based: `time_base` + `tempo_list`.
    Cylheim,
    /// Beat fraction based: `time` + `note`.
    Malody,
    /// Flat `Timing`/`Bpm` pairs.
    Lanotalium,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 3] = [Self::Cylheim, Self::Malody, Self::Lanotalium];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cylheim => "cylheim",
            Self::Malody => "malody",
            Self::Lanotalium => "lanotalium",
        }
    }

    /// Guess the format from the shape of the parsed tree.
    pub fn detect(root: &Value) -> Option<Self> {
        match root {
            Value::Array(_) => Some(Self::Lanotalium),
            Value::Object(map) => {
                if map.contains_key("tempo_list") {
                    Some(Self::Cylheim)
                } else if map.contains_key("time") || map.contains_key("note") {
                    Some(Self::Malody)
                } else if map.get("bpm").is_some_and(Value::is_array) {
                    Some(Self::Lanotalium)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Bind an adapter for this format to `root`.
    pub fn open<'a>(self, root: &'a Value) -> Result<Box<dyn TempoSource + 'a>, ConvertError> {
        let source: Box<dyn TempoSource + 'a> = match self {
            Self::Cylheim => Box::new(Cylheim::new(root)?),
            Self::Malody => Box::new(Malody::new(root)),
            Self::Lanotalium => Box::new(Lanotalium::new(root)),
        };
        Ok(source)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConvertError::new("E1201", format!("unknown source format: {s}")))
    }
}

/// Run `entry` over every event of the list `name`, keeping the successes.
pub(crate) fn normalize(
    name: &'static str,
    events: Option<&Value>,
    entry: impl Fn(&Value) -> Result<BeatEntry, FieldError>,
) -> Vec<BeatEntry> {
    let Some(events) = events.and_then(Value::as_array) else {
        warn!("{}; no tempo changes converted", FieldError::NotArray(name));
        return Vec::new();
    };

    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match entry(event) {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("skipping {name}[{i}]: {err}");
                None
            }
        })
        .collect()
}

pub(crate) fn number(event: &Value, key: &'static str) -> Result<f64, FieldError> {
    event
        .get(key)
        .and_then(Value::as_f64)
        .ok_or(FieldError::Missing(key))
}

/// Integer coercion the way chart files are actually written: integral
/// numbers as is, fractional ones truncated toward zero.
pub(crate) fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detect_by_top_level_keys() {
        assert_eq!(
            SourceFormat::detect(&json!({"time_base": 480, "tempo_list": []})),
            Some(SourceFormat::Cylheim)
        );
        assert_eq!(
            SourceFormat::detect(&json!({"meta": {}, "time": [], "note": []})),
            Some(SourceFormat::Malody)
        );
        assert_eq!(
            SourceFormat::detect(&json!({"bpm": [{"Timing": 0, "Bpm": 120}]})),
            Some(SourceFormat::Lanotalium)
        );
        assert_eq!(SourceFormat::detect(&json!([])), Some(SourceFormat::Lanotalium));
        assert_eq!(SourceFormat::detect(&json!({"bpm": 120})), None);
        assert_eq!(SourceFormat::detect(&json!("chart")), None);
    }

    #[test]
    fn parse_format_name_case_insensitively() {
        assert_eq!("Malody".parse::<SourceFormat>().unwrap(), SourceFormat::Malody);
        let err = "osu".parse::<SourceFormat>().unwrap_err();
        assert_eq!(err.code, "E1201");
    }

    #[test]
    fn normalize_drops_failed_events_and_keeps_order() {
        let events = json!([1.0, "x", 3.0]);
        let out = normalize("list", Some(&events), |v| {
            let f = v.as_f64().ok_or(FieldError::Missing("value"))?;
            Ok(BeatEntry::new((f as i32, 0, 1), f, f))
        });
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].integer, 1);
        assert_eq!(out[1].integer, 3);
    }

    #[test]
    fn normalize_non_array_is_empty() {
        assert!(normalize("list", Some(&json!({})), |_| unreachable!()).is_empty());
        assert!(normalize("list", None, |_| unreachable!()).is_empty());
    }

    #[test]
    fn integer_truncates_fractional_numbers() {
        assert_eq!(integer(&json!(7)), Some(7));
        assert_eq!(integer(&json!(2.9)), Some(2));
        assert_eq!(integer(&json!(-2.9)), Some(-2));
        assert_eq!(integer(&json!("7")), None);
    }
}
