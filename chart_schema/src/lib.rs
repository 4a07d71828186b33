use serde::{Deserialize, Serialize};

/// Root of a `Chart.json` document. Field order is the serialized order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDocument {
    pub y_scale: f64,
    pub beat_subdivision: u32,
    pub vertical_subdivision: u32,
    pub event_vertical_subdivision: u32,
    pub play_speed: f64,
    pub offset: f64,
    /// `-1.0` means unknown.
    pub music_length: f64,
    pub loop_play_back: bool,
    pub bpm_list: Vec<BeatEntry>,
    pub boxes: Vec<ChartBox>,
}

impl ChartDocument {
    /// Pretty JSON with a trailing newline, as written to `Chart.json`.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// A beat position `integer + molecule / denominator` paired with tempo data.
///
/// Used both for `bpmList` entries and for the beat anchors of event
/// keyframes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BeatEntry {
    pub integer: i32,
    pub molecule: i32,
    pub denominator: i32,
    #[serde(rename = "currentBPM")]
    pub current_bpm: f64,
    #[serde(rename = "ThisStartBPM")]
    pub this_start_bpm: f64,
}

impl BeatEntry {
    pub fn new(
        (integer, molecule, denominator): (i32, i32, i32),
        current_bpm: f64,
        this_start_bpm: f64,
    ) -> Self {
        Self {
            integer,
            molecule,
            denominator,
            current_bpm,
            this_start_bpm,
        }
    }

    /// Absolute beat as a float. A zero denominator collapses to the integer part.
    pub fn beat(&self) -> f64 {
        if self.denominator != 0 {
            self.integer as f64 + self.molecule as f64 / self.denominator as f64
        } else {
            self.integer as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartBox {
    pub box_events: BoxEvents,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoxEvents {
    pub speed: Vec<Keyframe>,
    pub move_x: Vec<Keyframe>,
    pub move_y: Vec<Keyframe>,
    pub rotate: Vec<Keyframe>,
    pub alpha: Vec<Keyframe>,
    pub scale_x: Vec<Keyframe>,
    pub scale_y: Vec<Keyframe>,
    pub center_x: Vec<Keyframe>,
    pub center_y: Vec<Keyframe>,
    pub line_alpha: Vec<Keyframe>,

    #[serde(rename = "LengthSpeed")]
    pub length_speed: u32,
    #[serde(rename = "LengthMoveX")]
    pub length_move_x: u32,
    #[serde(rename = "LengthMoveY")]
    pub length_move_y: u32,
    #[serde(rename = "LengthRotate")]
    pub length_rotate: u32,
    #[serde(rename = "LengthAlpha")]
    pub length_alpha: u32,
    #[serde(rename = "LengthScaleX")]
    pub length_scale_x: u32,
    #[serde(rename = "LengthScaleY")]
    pub length_scale_y: u32,
    #[serde(rename = "LengthCenterX")]
    pub length_center_x: u32,
    #[serde(rename = "LengthCenterY")]
    pub length_center_y: u32,
    #[serde(rename = "LengthLineAlpha")]
    pub length_line_alpha: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub start_beats: BeatEntry,
    pub end_beats: BeatEntry,
    pub start_value: f64,
    pub end_value: f64,
    pub curve_index: u32,
    #[serde(rename = "IsSelected")]
    pub is_selected: bool,
}

/// A playfield lane. Notes are opaque to the converter and always empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub online_notes: Vec<serde_json::Value>,
    pub online_notes_length: u32,
    pub offline_notes: Vec<serde_json::Value>,
    pub offline_notes_length: u32,
}
