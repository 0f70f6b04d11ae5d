//! Octave transition encoding

use super::token::OctaveShift;

/// Choose the octave change to write before a note
///
/// Small moves use relative `<`/`>` steps, anything further than
/// `threshold` octaves (or the first note of a channel) an absolute `o<n>`.
/// Returns `None` when the octave is unchanged.
pub fn octave_prefix(previous: Option<i32>, current: i32, threshold: i32) -> Option<OctaveShift> {
    let Some(previous) = previous else {
        return Some(OctaveShift::Absolute(current));
    };

    let diff = current - previous;
    if diff == 0 {
        None
    } else if diff.abs() > threshold {
        Some(OctaveShift::Absolute(current))
    } else if diff > 0 {
        Some(OctaveShift::Up(diff as u32))
    } else {
        Some(OctaveShift::Down((-diff) as u32))
    }
}
