//! Note materialization from track events

use super::pitch::{map_pitch, Pitch, PitchClass};
use crate::midi::{EventKind, TrackEvent};
use serde::Serialize;
use tracing::debug;

/// A sounded pitch at an absolute tick position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Ticks from the start of the piece
    pub absolute_time: u64,
    pub octave: i32,
    pub pitch_class: PitchClass,
}

impl Note {
    pub fn new(absolute_time: u64, octave: i32, pitch_class: PitchClass) -> Self {
        Self {
            absolute_time,
            octave,
            pitch_class,
        }
    }
}

/// Walk one track and collect its notes in event order
///
/// Every event advances the clock by its delta, whatever its kind.
pub fn materialize_track(events: &[TrackEvent]) -> Vec<Note> {
    let mut current_time = 0u64;
    let mut notes = Vec::new();

    for event in events {
        current_time += event.delta;
        match event.kind {
            EventKind::NoteOn { key, velocity } => match map_pitch(key, velocity) {
                Pitch::Note { octave, class } => {
                    notes.push(Note::new(current_time, octave, class));
                }
                Pitch::Rest => {}
            },
            EventKind::Meta | EventKind::Other => {
                debug!(time = current_time, kind = ?event.kind, "skipping event");
            }
        }
    }

    notes
}

/// Materialize every track and concatenate the results, track by track
pub fn materialize<'a, I>(tracks: I) -> Vec<Note>
where
    I: IntoIterator<Item = &'a Vec<TrackEvent>>,
{
    let mut notes = Vec::new();
    for (index, track) in tracks.into_iter().enumerate() {
        let track_notes = materialize_track(track);
        debug!(track = index, notes = track_notes.len(), "materialized track");
        notes.extend(track_notes);
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_all_deltas() {
        let events = vec![
            TrackEvent::meta(100),
            TrackEvent::note_on(10, 60, 100),
            TrackEvent::other(5),
            TrackEvent::note_on(0, 60, 0),
            TrackEvent::note_on(20, 62, 90),
        ];

        let notes = materialize_track(&events);
        assert_eq!(
            notes,
            vec![
                Note::new(110, 4, PitchClass::C),
                Note::new(135, 4, PitchClass::D),
            ]
        );
    }

    #[test]
    fn test_release_advances_time() {
        let events = vec![
            TrackEvent::note_on(0, 48, 80),
            TrackEvent::note_on(480, 48, 0),
            TrackEvent::note_on(0, 50, 80),
        ];

        let notes = materialize_track(&events);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].absolute_time, 480);
        assert_eq!(notes[1].octave, 3);
    }

    #[test]
    fn test_tracks_start_at_zero() {
        let tracks = vec![
            vec![TrackEvent::note_on(500, 60, 1)],
            vec![TrackEvent::note_on(100, 67, 1)],
        ];

        let notes = materialize(&tracks);
        assert_eq!(
            notes,
            vec![
                Note::new(500, 4, PitchClass::C),
                Note::new(100, 4, PitchClass::G),
            ]
        );
    }

    #[test]
    fn test_empty_track() {
        assert!(materialize_track(&[]).is_empty());
    }
}
