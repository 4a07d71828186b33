/// Microseconds per minute.
const US_PER_MINUTE: f64 = 60_000_000.0;

/// Elapsed milliseconds at `tick` and the BPM for a `tempo` given in
/// microseconds per `time_base` ticks.
///
/// `time_base` and `tempo` must be non-zero; callers check this.
pub fn timing_and_bpm(time_base: i64, tempo: f64, tick: i64) -> (f64, f64) {
    let tick_duration_us = (tempo / time_base as f64) * tick as f64;
    let timing_ms = tick_duration_us / 1000.0;
    let bpm = US_PER_MINUTE / tempo;
    (timing_ms, bpm)
}
