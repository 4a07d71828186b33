use chart_schema::{BeatEntry, BoxEvents, ChartBox, ChartDocument, Keyframe, Line};

pub const Y_SCALE: f64 = 6.0;
pub const BEAT_SUBDIVISION: u32 = 4;
pub const VERTICAL_SUBDIVISION: u32 = 16;
pub const EVENT_VERTICAL_SUBDIVISION: u32 = 10;
pub const PLAY_SPEED: f64 = 1.0;
/// Music length is not known at conversion time.
pub const UNKNOWN_MUSIC_LENGTH: f64 = -1.0;
pub const LINE_COUNT: usize = 5;

/// Build the output document around an already normalized timeline.
///
/// `offset` is written as given; unit conversion belongs to the source adapter.
pub fn assemble(offset: f64, bpm_list: Vec<BeatEntry>) -> ChartDocument {
    ChartDocument {
        y_scale: Y_SCALE,
        beat_subdivision: BEAT_SUBDIVISION,
        vertical_subdivision: VERTICAL_SUBDIVISION,
        event_vertical_subdivision: EVENT_VERTICAL_SUBDIVISION,
        play_speed: PLAY_SPEED,
        offset,
        music_length: UNKNOWN_MUSIC_LENGTH,
        loop_play_back: true,
        bpm_list,
        boxes: vec![placeholder_box()],
    }
}

fn placeholder_box() -> ChartBox {
    ChartBox {
        box_events: BoxEvents {
            speed: vec![default_speed()],
            move_x: Vec::new(),
            move_y: Vec::new(),
            rotate: Vec::new(),
            alpha: Vec::new(),
            scale_x: Vec::new(),
            scale_y: Vec::new(),
            center_x: Vec::new(),
            center_y: Vec::new(),
            line_alpha: Vec::new(),

            length_speed: 1,
            length_move_x: 1,
            length_move_y: 1,
            length_rotate: 1,
            length_alpha: 1,
            length_scale_x: 1,
            length_scale_y: 1,
            length_center_x: 1,
            length_center_y: 1,
            length_line_alpha: 1,
        },
        lines: vec![Line::default(); LINE_COUNT],
    }
}

/// Constant scroll speed 3.0 across the first beat.
fn default_speed() -> Keyframe {
    Keyframe {
        start_beats: BeatEntry::new((0, 0, 1), 0.0, 0.0),
        end_beats: BeatEntry::new((0, 0, 1), 1.0, 1.0),
        start_value: 3.0,
        end_value: 3.0,
        curve_index: 0,
        is_selected: false,
    }
}
